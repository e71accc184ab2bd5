use crate::ParamType;
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

pub type Result<T> = std::result::Result<T, Error>;

/// Structured failure reported by a native client primitive.
///
/// `code` is the native state code the [`ErrorClassifier`](crate::ErrorClassifier) looks up
/// (an SQLSTATE like `57P01`, or a backend specific name like `SQLITE_IOERR`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    pub code: Cow<'static, str>,
    pub message: String,
}

impl NativeError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for NativeError {}

/// Every failure surfaced by the adapter. Native failures never escape unwrapped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The explicit parameter type is not implemented by the adapter.
    #[error("Parameter type {0} is not supported")]
    UnsupportedType(ParamType),
    /// A single parameter could not be attached, the statement must be abandoned.
    #[error("Cannot bind parameter `{name}` with value `{value}`")]
    Bind {
        name: String,
        value: String,
        #[source]
        source: Option<NativeError>,
    },
    /// The native client asks for a full reconnect before anything else can succeed.
    #[error("The connection was lost")]
    ConnectionLost(#[source] NativeError),
    /// The query text was rejected while preparing it.
    #[error("Syntax error while preparing the query:\n{query}")]
    Syntax {
        query: String,
        #[source]
        source: NativeError,
    },
    /// Runtime failure not classified as a connection loss.
    #[error("Error while executing the statement")]
    Execution(#[source] NativeError),
    /// The connection factory could not open a native connection.
    #[error("Could not connect to `{url}`")]
    Connect {
        url: String,
        #[source]
        source: NativeError,
    },
    /// A value read back from the database cannot be converted into the requested type.
    #[error("Cannot convert `{value}` to {target}")]
    Conversion { value: String, target: &'static str },
    #[error("The statement was already executed")]
    AlreadyExecuted,
    /// A previous bind or execution failed, the query must be prepared again.
    #[error("The statement was abandoned after a failure")]
    Abandoned,
    #[error("The statement is closed")]
    Closed,
    #[error("The connection is disconnected")]
    Disconnected,
}

/// Closed set of failure kinds callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedType,
    Bind,
    ConnectionLost,
    Syntax,
    Execution,
    Connect,
    Conversion,
    Misuse,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedType(..) => ErrorKind::UnsupportedType,
            Error::Bind { .. } => ErrorKind::Bind,
            Error::ConnectionLost(..) => ErrorKind::ConnectionLost,
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::Execution(..) => ErrorKind::Execution,
            Error::Connect { .. } => ErrorKind::Connect,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::AlreadyExecuted | Error::Abandoned | Error::Closed | Error::Disconnected => {
                ErrorKind::Misuse
            },
        }
    }

    /// The caller must re-establish the connection and retry the whole operation.
    pub fn is_reconnect(&self) -> bool {
        self.kind() == ErrorKind::ConnectionLost
    }

    /// The native diagnostic this error wraps, if any.
    pub fn native(&self) -> Option<&NativeError> {
        match self {
            Error::Bind { source, .. } => source.as_ref(),
            Error::ConnectionLost(source)
            | Error::Syntax { source, .. }
            | Error::Execution(source)
            | Error::Connect { source, .. } => Some(source),
            _ => None,
        }
    }
}
