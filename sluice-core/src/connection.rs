use crate::{
    Error, ErrorClassifier, FetchMode, NativeConnection, NativeError, Params, Phase, Result, Row,
    Statement, log_error, truncate_long,
};

/// Owns one native connection: prepares statements and drives transaction boundaries.
///
/// Transactions are plain pass-throughs: no nesting, no savepoints, no retry. Once
/// [`disconnect`](Connection::disconnect)ed every operation fails with [`Error::Disconnected`].
pub struct Connection<C: NativeConnection> {
    connection: Option<C>,
    classifier: ErrorClassifier,
}

impl<C: NativeConnection> Connection<C> {
    pub fn new(connection: C) -> Self {
        let classifier = connection.classifier();
        Self {
            connection: Some(connection),
            classifier,
        }
    }

    /// Replaces the reconnect table supplied by the native client.
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn native(&self) -> Result<&C> {
        self.connection.as_ref().ok_or(Error::Disconnected)
    }

    pub fn native_mut(&mut self) -> Result<&mut C> {
        self.connection.as_mut().ok_or(Error::Disconnected)
    }

    pub fn prepare(&mut self, query: impl Into<String>) -> Result<Statement<C::Statement>> {
        let query = query.into();
        let connection = self.connection.as_mut().ok_or(Error::Disconnected)?;
        match connection.prepare(&query) {
            Ok(statement) => Ok(Statement::new(statement, query, self.classifier.clone())),
            Err(e) => {
                let error = self
                    .classifier
                    .to_error(e, Phase::Prepare, &truncate_long!(query).to_string());
                log_error(&error);
                Err(error)
            }
        }
    }

    /// Prepares, binds and executes `query`, returning the affected row count.
    pub fn execute(&mut self, query: impl Into<String>, params: &mut Params) -> Result<u64> {
        let mut statement = self.prepare(query)?;
        statement.bind(params)?;
        let result = statement.exec()?;
        Ok(result.affected_rows())
    }

    /// Prepares, binds and executes `query`, collecting every row.
    pub fn fetch_all(
        &mut self,
        query: impl Into<String>,
        params: &mut Params,
        mode: FetchMode,
    ) -> Result<Vec<Row>> {
        let mut statement = self.prepare(query)?;
        statement.bind(params)?;
        let mut result = statement.exec()?;
        result.fetch_all(mode)
    }

    pub fn start_transaction(&mut self) -> Result<()> {
        self.transaction_call("BEGIN", C::begin)
    }

    /// Commits the current transaction. With `autocommit` the native implicit commit is the
    /// boundary and nothing is sent.
    pub fn commit(&mut self, autocommit: bool) -> Result<()> {
        if autocommit {
            return self.native().map(|_| ());
        }
        self.transaction_call("COMMIT", C::commit)
    }

    pub fn rollback(&mut self) -> Result<()> {
        self.transaction_call("ROLLBACK", C::rollback)
    }

    /// Drops the native connection. Safe to call more than once.
    pub fn disconnect(&mut self) {
        if self.connection.take().is_some() {
            log::debug!("Disconnected");
        }
    }

    fn transaction_call(
        &mut self,
        name: &str,
        call: fn(&mut C) -> std::result::Result<(), NativeError>,
    ) -> Result<()> {
        let connection = self.connection.as_mut().ok_or(Error::Disconnected)?;
        log::debug!("{name}");
        call(connection).map_err(|e| {
            let error = self.classifier.to_error(e, Phase::Execute, name);
            log_error(&error);
            error
        })
    }
}
