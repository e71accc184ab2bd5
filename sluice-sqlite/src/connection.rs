use crate::{CBox, SQLITE_RECONNECT_CODES, SqliteDriver, SqliteStatement, native_error};
use libsqlite3_sys::*;
use sluice_core::{
    Driver, Error, ErrorClassifier, NativeConnection, NativeError, Result, log_error,
};
use std::{
    ffi::{CStr, CString, c_int},
    ptr,
    sync::Arc,
};

/// Native SQLite connection.
///
/// Opened from an url like `sqlite://path/to/file.sqlite?mode=rwc`, the path is percent-decoded and
/// `sqlite://:memory:` opens a private in-memory database. Recognized parameters:
/// - `mode`: `ro`, `rw`, `rwc` (default) or `memory`
/// - `cache`: `shared` or `private`
///
/// Statements prepared from it keep the database open, it is closed once the connection and every
/// statement are dropped.
pub struct SqliteConnection {
    pub(crate) connection: Arc<CBox<sqlite3>>,
}

// Opened with `SQLITE_OPEN_FULLMUTEX`, sqlite serializes the calls on a shared handle.
unsafe impl Sync for CBox<sqlite3> {}

impl SqliteConnection {
    pub fn open(url: &str) -> Result<SqliteConnection> {
        let context = |message: String| {
            let error = Error::Connect {
                url: url.to_string(),
                source: NativeError::new("SQLITE_CANTOPEN", message),
            };
            log_error(&error);
            error
        };
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            return Err(context(format!(
                "Expected sqlite connection url to start with `{prefix}`"
            )));
        };
        let (path, params) = location.split_once('?').unwrap_or((location, ""));
        let path = urlencoding::decode(path)
            .map_err(|e| context(format!("Error while decoding the path `{path}`: {e}")))?;
        let mut flags = SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_FULLMUTEX;
        for (key, value) in params
            .split('&')
            .filter(|v| !v.is_empty())
            .map(|v| v.split_once('=').unwrap_or((v, "")))
        {
            let value = urlencoding::decode(value)
                .map_err(|e| context(format!("Error while decoding the parameter `{key}`: {e}")))?;
            flags = match (key, value.as_ref()) {
                ("mode", "ro") => flags & !(SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE) | SQLITE_OPEN_READONLY,
                ("mode", "rw") => flags & !SQLITE_OPEN_CREATE,
                ("mode", "rwc") => flags | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ("mode", "memory") => flags | SQLITE_OPEN_MEMORY,
                ("cache", "shared") => flags | SQLITE_OPEN_SHAREDCACHE,
                ("cache", "private") => flags | SQLITE_OPEN_PRIVATECACHE,
                _ => {
                    log::warn!("Ignoring the unknown sqlite connection parameter `{key}={value}`");
                    flags
                }
            };
        }
        let path = CString::new(path.as_bytes())
            .map_err(|e| context(format!("Error while decoding the path: {e}")))?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe { sqlite3_open_v2(path.as_ptr(), &mut *connection, flags, ptr::null()) };
        if rc != SQLITE_OK {
            let source = native_error(*connection, rc);
            let error = Error::Connect {
                url: url.to_string(),
                source,
            };
            log_error(&error);
            return Err(error);
        }
        log::debug!("Opened sqlite database `{}`", path.to_string_lossy());
        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    fn db(&self) -> *mut sqlite3 {
        self.connection.ptr
    }

    fn exec(&mut self, sql: &CStr) -> std::result::Result<(), NativeError> {
        let rc = unsafe {
            sqlite3_exec(
                self.db(),
                sql.as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        if rc != SQLITE_OK {
            return Err(native_error(self.db(), rc));
        }
        Ok(())
    }
}

impl NativeConnection for SqliteConnection {
    type Statement = SqliteStatement;

    fn classifier(&self) -> ErrorClassifier {
        ErrorClassifier::new(SQLITE_RECONNECT_CODES.iter().copied())
    }

    fn prepare(&mut self, sql: &str) -> std::result::Result<Self::Statement, NativeError> {
        let query = CString::new(sql).map_err(|e| {
            NativeError::new(
                "SQLITE_MISUSE",
                format!("Could not create a CString from the query: {e}"),
            )
        })?;
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v2(
                self.db(),
                query.as_ptr(),
                sql.len() as c_int,
                &mut *statement,
                &mut tail,
            )
        };
        if rc != SQLITE_OK {
            return Err(native_error(self.db(), rc));
        }
        if statement.is_null() {
            return Err(NativeError::new(
                "SQLITE_MISUSE",
                "The query does not contain any statement",
            ));
        }
        if !tail.is_null()
            && !unsafe { CStr::from_ptr(tail) }
                .to_bytes()
                .iter()
                .all(u8::is_ascii_whitespace)
        {
            return Err(NativeError::new(
                "SQLITE_MISUSE",
                "Cannot prepare more than one statement at a time",
            ));
        }
        let statement = SqliteStatement::new(statement, self.connection.clone());
        log::trace!("Prepared {statement}");
        Ok(statement)
    }

    fn begin(&mut self) -> std::result::Result<(), NativeError> {
        self.exec(c"BEGIN")
    }

    fn commit(&mut self) -> std::result::Result<(), NativeError> {
        self.exec(c"COMMIT")
    }

    fn rollback(&mut self) -> std::result::Result<(), NativeError> {
        self.exec(c"ROLLBACK")
    }
}
