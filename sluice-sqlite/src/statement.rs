use crate::{
    CBox,
    extract::{extract_name, extract_value},
    native_error,
};
use libsqlite3_sys::*;
use sluice_core::{
    NativeBindType, NativeError, NativeStatement, RowLabeled, RowNames, Value, truncate_long,
};
use std::{
    collections::VecDeque,
    ffi::{CStr, CString, c_char, c_int, c_uchar, c_void},
    fmt::{self, Display},
    sync::Arc,
};

/// Prepared SQLite statement.
///
/// `execute` performs the first step, its row (if any) is handed out by the first `fetch`.
/// Statements writing to the database run to completion inside `execute` so that their changes
/// are counted, the rows they return (`RETURNING`) are buffered.
pub struct SqliteStatement {
    // Finalized before the database handle is released.
    pub(crate) statement: CBox<sqlite3_stmt>,
    _connection: Arc<CBox<sqlite3>>,
    labels: Option<RowNames>,
    executed: bool,
    rows: VecDeque<RowLabeled>,
    done: bool,
    affected: u64,
}

enum Step {
    Row,
    Done,
}

impl SqliteStatement {
    pub(crate) fn new(statement: CBox<sqlite3_stmt>, connection: Arc<CBox<sqlite3>>) -> Self {
        Self {
            statement,
            _connection: connection,
            labels: None,
            executed: false,
            rows: VecDeque::new(),
            done: false,
            affected: 0,
        }
    }

    fn db(&self) -> *mut sqlite3 {
        unsafe { sqlite3_db_handle(*self.statement) }
    }

    fn step(&mut self) -> Result<Step, NativeError> {
        loop {
            match unsafe { sqlite3_step(*self.statement) } {
                SQLITE_BUSY => {
                    log::trace!("Database is busy, stepping again");
                    continue;
                }
                SQLITE_ROW => return Ok(Step::Row),
                SQLITE_DONE => {
                    self.done = true;
                    return Ok(Step::Done);
                }
                rc => {
                    let error = native_error(self.db(), rc);
                    self.done = true;
                    unsafe {
                        sqlite3_reset(*self.statement);
                    }
                    return Err(error);
                }
            }
        }
    }

    fn reset(&mut self) {
        self.rows.clear();
        self.done = true;
        unsafe {
            sqlite3_reset(*self.statement);
        }
    }

    fn run(&mut self, readonly: bool) -> Result<(), NativeError> {
        if let Step::Row = self.step()? {
            let row = self.current_row()?;
            self.rows.push_back(row);
            if !readonly {
                while let Step::Row = self.step()? {
                    let row = self.current_row()?;
                    self.rows.push_back(row);
                }
            }
        }
        Ok(())
    }

    fn labels(&mut self) -> Result<RowNames, NativeError> {
        if let Some(labels) = &self.labels {
            return Ok(labels.clone());
        }
        let statement = *self.statement;
        let count = unsafe { sqlite3_column_count(statement) };
        let labels = (0..count)
            .map(|i| extract_name(statement, i))
            .collect::<Result<RowNames, _>>()?;
        self.labels = Some(labels.clone());
        Ok(labels)
    }

    fn current_row(&mut self) -> Result<RowLabeled, NativeError> {
        let labels = self.labels()?;
        let statement = *self.statement;
        let values = (0..labels.len() as c_int)
            .map(|i| extract_value(statement, i))
            .collect::<Result<_, _>>()?;
        Ok(RowLabeled::new(labels, values))
    }

    fn bind_text(&mut self, index: c_int, text: &str) -> c_int {
        unsafe {
            sqlite3_bind_text64(
                *self.statement,
                index,
                text.as_ptr() as *const c_char,
                text.len() as u64,
                SQLITE_TRANSIENT(),
                SQLITE_UTF8 as c_uchar,
            )
        }
    }

    fn bind_blob(&mut self, index: c_int, blob: &[u8]) -> c_int {
        unsafe {
            sqlite3_bind_blob64(
                *self.statement,
                index,
                blob.as_ptr() as *const c_void,
                blob.len() as u64,
                SQLITE_TRANSIENT(),
            )
        }
    }
}

impl NativeStatement for SqliteStatement {
    const SUPPORTS_BOOLEAN: bool = false;

    fn bind(
        &mut self,
        name: &str,
        value: &Value,
        bind_type: NativeBindType,
        size: usize,
    ) -> Result<bool, NativeError> {
        let Ok(name) = CString::new(name) else {
            return Ok(false);
        };
        let index = unsafe { sqlite3_bind_parameter_index(*self.statement, name.as_ptr()) };
        if index == 0 {
            log::debug!("Placeholder {name:?} is not part of the statement");
            return Ok(false);
        }
        let rc = if value.is_null() {
            unsafe { sqlite3_bind_null(*self.statement, index) }
        } else {
            match bind_type {
                NativeBindType::Integer | NativeBindType::Boolean => match value.to_i64() {
                    Some(v) => unsafe { sqlite3_bind_int64(*self.statement, index, v) },
                    None => return Ok(false),
                },
                NativeBindType::String => match value {
                    Value::Blob(Some(v)) => self.bind_blob(index, v),
                    _ => match value.to_text() {
                        Some(v) => self.bind_text(index, &v),
                        None => return Ok(false),
                    },
                },
                NativeBindType::LargeObject => {
                    let Some(bytes) = value.to_bytes() else {
                        return Ok(false);
                    };
                    if size > 0 && bytes.len() > size {
                        log::debug!(
                            "Large object of {} bytes exceeds the declared size {size}",
                            bytes.len()
                        );
                        return Ok(false);
                    }
                    self.bind_blob(index, &bytes)
                }
            }
        };
        if rc != SQLITE_OK {
            return Err(native_error(self.db(), rc));
        }
        Ok(true)
    }

    fn execute(&mut self) -> Result<(), NativeError> {
        let db = self.db();
        let readonly = unsafe { sqlite3_stmt_readonly(*self.statement) } != 0;
        self.rows.clear();
        self.done = false;
        let before = unsafe { sqlite3_total_changes64(db) };
        if let Err(error) = self.run(readonly) {
            self.reset();
            return Err(error);
        }
        self.executed = true;
        self.affected = if readonly {
            0
        } else {
            let after = unsafe { sqlite3_total_changes64(db) };
            after.saturating_sub(before).max(0) as u64
        };
        Ok(())
    }

    fn fetch(&mut self) -> Result<Option<RowLabeled>, NativeError> {
        if !self.executed {
            return Err(NativeError::new(
                "SQLITE_MISUSE",
                "The statement must be executed before fetching",
            ));
        }
        if let Some(row) = self.rows.pop_front() {
            return Ok(Some(row));
        }
        if self.done {
            return Ok(None);
        }
        match self.step()? {
            Step::Row => self.current_row().map(Some),
            Step::Done => Ok(None),
        }
    }

    fn row_count(&self) -> u64 {
        self.affected
    }

    fn set_fetch_size(&mut self, size: u32) -> Result<(), NativeError> {
        log::trace!("Ignoring the fetch size {size}, sqlite steps one row at a time");
        Ok(())
    }

    fn close_cursor(&mut self) {
        self.reset();
    }
}

impl Display for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sql = unsafe { sqlite3_sql(*self.statement) };
        if sql.is_null() {
            return write!(f, "{:p}", *self.statement);
        }
        let sql = unsafe { CStr::from_ptr(sql) }.to_string_lossy();
        write!(f, "{}", truncate_long!(sql))
    }
}
