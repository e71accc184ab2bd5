use crate::{
    AsValue, ErrorClassifier, FetchMode, NativeStatement, Phase, Result, Row, Value, log_error,
};
use std::iter::FusedIterator;

/// Outcome of an executed statement.
///
/// The affected row count and the inserted identifier are captured once, when the statement is
/// executed, and never change while rows are consumed. Rows can be iterated a single time: once the
/// sequence is exhausted (or the result set closed) further iteration yields nothing.
pub struct ResultSet<'s, S: NativeStatement> {
    statement: &'s mut S,
    classifier: &'s ErrorClassifier,
    inserted_id: Option<Value>,
    affected_rows: u64,
    exhausted: bool,
}

impl<'s, S: NativeStatement> ResultSet<'s, S> {
    pub(crate) fn new(
        statement: &'s mut S,
        classifier: &'s ErrorClassifier,
        inserted_id: Option<Value>,
        affected_rows: u64,
    ) -> Self {
        Self {
            statement,
            classifier,
            inserted_id,
            affected_rows,
            exhausted: false,
        }
    }

    /// Lazy sequence of the remaining rows, shaped by `mode`.
    pub fn rows(&mut self, mode: FetchMode) -> Rows<'_, 's, S> {
        if !self.exhausted {
            self.statement.set_fetch_mode(mode);
        }
        Rows { result: self, mode }
    }

    /// Collects the remaining rows.
    pub fn fetch_all(&mut self, mode: FetchMode) -> Result<Vec<Row>> {
        self.rows(mode).collect()
    }

    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Identifier captured at execution, never triggers any I/O.
    pub fn inserted_id(&self) -> Option<&Value> {
        self.inserted_id.as_ref()
    }

    pub fn inserted_id_as<T: AsValue>(&self) -> Result<Option<T>> {
        self.inserted_id.clone().map(T::try_from_value).transpose()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Stops the iteration and releases the native cursor. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.exhausted {
            self.exhausted = true;
            self.statement.close_cursor();
        }
    }
}

impl<S: NativeStatement> Drop for ResultSet<'_, S> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Iterator over the rows of a [`ResultSet`], one native fetch per item.
pub struct Rows<'r, 's, S: NativeStatement> {
    result: &'r mut ResultSet<'s, S>,
    mode: FetchMode,
}

impl<S: NativeStatement> Iterator for Rows<'_, '_, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.result.exhausted {
            return None;
        }
        match self.result.statement.fetch() {
            Ok(Some(row)) => Some(Ok(Row::new(self.mode, row))),
            Ok(None) => {
                self.result.close();
                None
            }
            Err(e) => {
                self.result.close();
                let error = self.result.classifier.to_error(e, Phase::Execute, "");
                log_error(&error);
                Some(Err(error))
            }
        }
    }
}

impl<S: NativeStatement> FusedIterator for Rows<'_, '_, S> {}
