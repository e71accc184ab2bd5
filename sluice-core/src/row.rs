use crate::Value;
use std::sync::Arc;

/// Alias a query must give the generated identifier so that it can be captured after execution,
/// e.g. `INSERT INTO t (..) VALUES (..) RETURNING id AS _insertedid`.
pub const INSERTED_ID_COLUMN: &str = "_insertedid";

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;

/// A native row with its column labels, as produced by the native fetch primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Box<[Value]>,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Box<[Value]>) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .and_then(|i| self.values.get(i))
    }
    pub fn take_column(self, name: &str) -> Option<Value> {
        let index = self.labels.iter().position(|v| v == name)?;
        self.values.into_vec().into_iter().nth(index)
    }
}

/// Shape of the rows yielded by a result set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// Fields addressed by column name.
    #[default]
    Associative,
    /// Fields addressed by position.
    Positional,
    /// Both.
    Both,
}

impl FetchMode {
    pub fn by_name(&self) -> bool {
        matches!(self, FetchMode::Associative | FetchMode::Both)
    }
    pub fn by_position(&self) -> bool {
        matches!(self, FetchMode::Positional | FetchMode::Both)
    }
}

/// A row shaped according to a [`FetchMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    mode: FetchMode,
    row: RowLabeled,
}

impl Row {
    pub fn new(mode: FetchMode, row: RowLabeled) -> Self {
        Self { mode, row }
    }
    pub fn mode(&self) -> FetchMode {
        self.mode
    }
    pub fn len(&self) -> usize {
        self.row.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.row.values.is_empty()
    }
    /// Field by column name, `None` for positional rows.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        if !self.mode.by_name() {
            return None;
        }
        self.row.get_column(name)
    }
    /// Field by position (from 0), `None` for associative rows.
    pub fn get(&self, index: usize) -> Option<&Value> {
        if !self.mode.by_position() {
            return None;
        }
        self.row.values.get(index)
    }
    /// Column names, empty for positional rows.
    pub fn names(&self) -> &[String] {
        if self.mode.by_name() {
            self.row.names()
        } else {
            &[]
        }
    }
    pub fn values(&self) -> &[Value] {
        self.row.values()
    }
    pub fn into_labeled(self) -> RowLabeled {
        self.row
    }
}

impl From<Row> for Box<[Value]> {
    fn from(value: Row) -> Self {
        value.row.values
    }
}
