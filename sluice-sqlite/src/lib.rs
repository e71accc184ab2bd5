mod cbox;
mod connection;
mod driver;
mod extract;
mod statement;

use libsqlite3_sys::*;
use sluice_core::NativeError;
use std::{
    borrow::Cow,
    ffi::{CStr, c_char, c_int},
};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use statement::*;

/// Result codes that mean the database file itself is unusable and must be reopened.
pub const SQLITE_RECONNECT_CODES: &[&str] = &[
    "SQLITE_IOERR",
    "SQLITE_CANTOPEN",
    "SQLITE_NOTADB",
    "SQLITE_CORRUPT",
];

pub(crate) fn error_message_from_ptr<'a>(ptr: *const c_char) -> &'a str {
    if ptr.is_null() {
        return "Unknown error (could not extract the error message)";
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("Unknown error (the error message was not a valid C string)")
}

/// Symbolic name of the primary result code, used as the native state code.
pub fn code_name(rc: c_int) -> Cow<'static, str> {
    Cow::Borrowed(match rc & 0xff {
        SQLITE_ERROR => "SQLITE_ERROR",
        SQLITE_INTERNAL => "SQLITE_INTERNAL",
        SQLITE_PERM => "SQLITE_PERM",
        SQLITE_ABORT => "SQLITE_ABORT",
        SQLITE_BUSY => "SQLITE_BUSY",
        SQLITE_LOCKED => "SQLITE_LOCKED",
        SQLITE_NOMEM => "SQLITE_NOMEM",
        SQLITE_READONLY => "SQLITE_READONLY",
        SQLITE_INTERRUPT => "SQLITE_INTERRUPT",
        SQLITE_IOERR => "SQLITE_IOERR",
        SQLITE_CORRUPT => "SQLITE_CORRUPT",
        SQLITE_NOTFOUND => "SQLITE_NOTFOUND",
        SQLITE_FULL => "SQLITE_FULL",
        SQLITE_CANTOPEN => "SQLITE_CANTOPEN",
        SQLITE_PROTOCOL => "SQLITE_PROTOCOL",
        SQLITE_SCHEMA => "SQLITE_SCHEMA",
        SQLITE_TOOBIG => "SQLITE_TOOBIG",
        SQLITE_CONSTRAINT => "SQLITE_CONSTRAINT",
        SQLITE_MISMATCH => "SQLITE_MISMATCH",
        SQLITE_MISUSE => "SQLITE_MISUSE",
        SQLITE_NOLFS => "SQLITE_NOLFS",
        SQLITE_AUTH => "SQLITE_AUTH",
        SQLITE_RANGE => "SQLITE_RANGE",
        SQLITE_NOTADB => "SQLITE_NOTADB",
        _ => return Cow::Owned(format!("SQLITE_{rc}")),
    })
}

/// Structured failure for `rc`, with the last message recorded on `db`.
pub(crate) fn native_error(db: *mut sqlite3, rc: c_int) -> NativeError {
    let message = if db.is_null() {
        error_message_from_ptr(unsafe { sqlite3_errstr(rc) })
    } else {
        error_message_from_ptr(unsafe { sqlite3_errmsg(db) })
    };
    NativeError::new(code_name(rc), message)
}
