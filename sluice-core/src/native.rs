use crate::{ErrorClassifier, FetchMode, NativeBindType, NativeError, RowLabeled, Value};

/// Connection level primitives of a native database client.
///
/// Implementations are driven from a single thread, one call at a time. Every failure must be
/// reported as a [`NativeError`] carrying the native state code.
pub trait NativeConnection {
    type Statement: NativeStatement;

    /// Reconnect table for this client.
    fn classifier(&self) -> ErrorClassifier {
        ErrorClassifier::default()
    }

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement, NativeError>;
    fn begin(&mut self) -> Result<(), NativeError>;
    fn commit(&mut self) -> Result<(), NativeError>;
    fn rollback(&mut self) -> Result<(), NativeError>;
}

/// Prepared statement primitives of a native database client.
pub trait NativeStatement {
    /// Whether the client has a dedicated boolean bind type.
    const SUPPORTS_BOOLEAN: bool = true;

    /// Attaches `value` to the placeholder `name` (including its `:` prefix).
    ///
    /// `size` is the maximum length hint for large objects, 0 means unspecified. `Ok(false)` means
    /// the client refused the bind without a structured error.
    fn bind(
        &mut self,
        name: &str,
        value: &Value,
        bind_type: NativeBindType,
        size: usize,
    ) -> Result<bool, NativeError>;

    fn execute(&mut self) -> Result<(), NativeError>;

    fn set_fetch_mode(&mut self, _mode: FetchMode) {}

    /// Next row of the executed statement, `None` once exhausted.
    fn fetch(&mut self) -> Result<Option<RowLabeled>, NativeError>;

    /// Rows affected by the executed statement.
    fn row_count(&self) -> u64;

    /// Prefetch hint, it must not change the rows produced.
    fn set_fetch_size(&mut self, _size: u32) -> Result<(), NativeError> {
        Ok(())
    }

    /// Releases the resources held for the current result set.
    fn close_cursor(&mut self) {}
}
