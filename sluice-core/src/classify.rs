use crate::{Error, NativeError};
use std::borrow::Cow;

/// SQLSTATE codes that mean the connection itself is gone.
///
/// | code    | meaning                                  |
/// |---------|------------------------------------------|
/// | `HY000` | generic driver level failure             |
/// | `57P01` | PostgreSQL `admin_shutdown`              |
/// | `57P02` | PostgreSQL `crash_shutdown`              |
/// | `57P03` | PostgreSQL `cannot_connect_now`          |
pub const SQLSTATE_RECONNECT_CODES: &[&str] = &["HY000", "57P01", "57P02", "57P03"];

/// Where the native failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prepare,
    Execute,
}

/// Outcome of the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Reconnect,
    Syntax,
    Execution,
}

/// Table driven mapping from native state codes to [`Failure`].
///
/// Only codes present in the reconnect table are treated as connection losses, the message text is
/// never inspected. Every native client may ship its own table, callers can replace or extend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    reconnect: Vec<Cow<'static, str>>,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(SQLSTATE_RECONNECT_CODES.iter().copied())
    }
}

impl ErrorClassifier {
    pub fn new<I, S>(reconnect: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            reconnect: reconnect.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        let code = code.into();
        if !self.reconnect.contains(&code) {
            self.reconnect.push(code);
        }
        self
    }

    pub fn without_code(mut self, code: &str) -> Self {
        self.reconnect.retain(|v| v != code);
        self
    }

    pub fn reconnect_codes(&self) -> impl Iterator<Item = &str> {
        self.reconnect.iter().map(AsRef::as_ref)
    }

    pub fn is_reconnect(&self, code: &str) -> bool {
        self.reconnect.iter().any(|v| v == code)
    }

    pub fn classify(&self, code: &str, phase: Phase) -> Failure {
        if self.is_reconnect(code) {
            Failure::Reconnect
        } else {
            match phase {
                Phase::Prepare => Failure::Syntax,
                Phase::Execute => Failure::Execution,
            }
        }
    }

    /// Classifies and wraps the native failure. `query` is only used by syntax errors.
    pub fn to_error(&self, error: NativeError, phase: Phase, query: &str) -> Error {
        match self.classify(&error.code, phase) {
            Failure::Reconnect => Error::ConnectionLost(error),
            Failure::Syntax => Error::Syntax {
                query: query.to_owned(),
                source: error,
            },
            Failure::Execution => Error::Execution(error),
        }
    }
}
