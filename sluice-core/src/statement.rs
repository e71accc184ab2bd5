use crate::{
    Bindable, Coercion, Error, ErrorClassifier, INSERTED_ID_COLUMN, Key, NativeStatement, Params,
    Phase, Result, ResultSet, Value, log_error, truncate_long,
};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Prepared,
    Executed,
    Failed,
}

/// Owns one prepared native statement and drives its bind → execute lifecycle.
///
/// `bind` may be called once, `exec` transitions the statement to executed exactly once and hands
/// out a [`ResultSet`] borrowing it. A failed bind or execution abandons the statement, later calls
/// fail with [`Error::Abandoned`]. After `close` every operation fails with [`Error::Closed`].
pub struct Statement<S: NativeStatement> {
    statement: Option<S>,
    query: String,
    state: State,
    bound: bool,
    has_inserted_id: bool,
    coercion: Coercion,
    classifier: ErrorClassifier,
}

impl<S: NativeStatement> Statement<S> {
    pub fn new(statement: S, query: impl Into<String>, classifier: ErrorClassifier) -> Self {
        Self {
            statement: Some(statement),
            query: query.into(),
            state: State::Prepared,
            bound: false,
            has_inserted_id: false,
            coercion: Coercion::new(S::SUPPORTS_BOOLEAN),
            classifier,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    pub fn has_inserted_id(&self) -> bool {
        self.has_inserted_id
    }

    pub fn is_executed(&self) -> bool {
        self.state == State::Executed
    }

    pub fn is_closed(&self) -> bool {
        self.statement.is_none()
    }

    /// Binds every entry of `params`, in order.
    ///
    /// Placeholder names come from the string key, then from the descriptor name, otherwise they
    /// are synthesized as `:p1`, `:p2`, ... counting only the unnamed entries. The descriptor
    /// reserved for the inserted identifier is skipped. Lazy values are drained before binding.
    ///
    /// A second call with a non empty parameter set is ignored. When any entry fails the statement
    /// is abandoned, even if earlier entries already reached the native client.
    pub fn bind(&mut self, params: &mut Params) -> Result<()> {
        let Some(statement) = self.statement.as_mut() else {
            return Err(Error::Closed);
        };
        if params.is_empty() {
            return Ok(());
        }
        match self.state {
            State::Prepared => {}
            State::Executed => return Err(Error::AlreadyExecuted),
            State::Failed => return Err(Error::Abandoned),
        }
        if self.bound {
            log::warn!(
                "Parameters were already bound, ignoring {} more for the query:\n{}",
                params.len(),
                truncate_long!(self.query)
            );
            return Ok(());
        }
        self.bound = true;
        let mut index = 0;
        for (key, bindable) in params.iter_mut() {
            if let Bindable::Param(param) = bindable
                && param.is_inserted_id()
            {
                self.has_inserted_id = true;
                continue;
            }
            let name = match (&*key, &*bindable) {
                (Key::Name(name), _) if !name.is_empty() => format!(":{name}"),
                (_, Bindable::Param(param)) if param.name().is_some() => {
                    format!(":{}", param.name().unwrap_or_default())
                }
                _ => {
                    index += 1;
                    format!(":p{index}")
                }
            };
            let bind_type = match self.coercion.coerce(bindable) {
                Ok(bind_type) => bind_type,
                Err(error) => {
                    self.state = State::Failed;
                    log_error(&error);
                    return Err(error);
                }
            };
            let (value, size): (&Value, usize) = match bindable {
                Bindable::Raw(value) => (&*value, 0),
                Bindable::Param(param) => {
                    let size = param.size().unwrap_or(0);
                    (param.value_mut().materialize(), size)
                }
            };
            log::debug!("Binding {name} as {bind_type}: {value}");
            let source = match statement.bind(&name, value, bind_type, size) {
                Ok(true) => None,
                Ok(false) => Some(None),
                Err(e) => Some(Some(e)),
            };
            if let Some(source) = source {
                let error = Error::Bind {
                    value: value.render().into_owned(),
                    name,
                    source,
                };
                self.state = State::Failed;
                log_error(&error);
                return Err(error);
            }
            if let Bindable::Param(param) = bindable {
                param.set_bound();
            }
        }
        Ok(())
    }

    /// Executes the statement.
    ///
    /// When a descriptor was marked for the inserted identifier, the first row is fetched and its
    /// `_insertedid` column captured; that row is not yielded by the result set.
    pub fn exec(&mut self) -> Result<ResultSet<'_, S>> {
        let Some(statement) = self.statement.as_mut() else {
            return Err(Error::Closed);
        };
        match self.state {
            State::Prepared => {}
            State::Executed => return Err(Error::AlreadyExecuted),
            State::Failed => return Err(Error::Abandoned),
        }
        log::debug!("Executing the query:\n{}", truncate_long!(self.query));
        if let Err(e) = statement.execute() {
            self.state = State::Failed;
            let error = self.classifier.to_error(e, Phase::Execute, &self.query);
            log_error(&error);
            return Err(error);
        }
        let inserted_id = if self.has_inserted_id {
            match statement.fetch() {
                Ok(Some(row)) => {
                    let value = row.take_column(INSERTED_ID_COLUMN);
                    if value.is_none() {
                        log::warn!(
                            "Column `{INSERTED_ID_COLUMN}` is missing, no inserted id for the query:\n{}",
                            truncate_long!(self.query)
                        );
                    }
                    value.filter(|v| !v.is_null())
                }
                Ok(None) => {
                    log::warn!(
                        "No row returned, no inserted id for the query:\n{}",
                        truncate_long!(self.query)
                    );
                    None
                }
                Err(e) => {
                    self.state = State::Failed;
                    let error = self.classifier.to_error(e, Phase::Execute, &self.query);
                    log_error(&error);
                    return Err(error);
                }
            }
        } else {
            None
        };
        self.state = State::Executed;
        let affected_rows = statement.row_count();
        Ok(ResultSet::new(
            statement,
            &self.classifier,
            inserted_id,
            affected_rows,
        ))
    }

    /// Prefetch hint forwarded to the native client. Rows and their order are unaffected.
    pub fn set_fetch_size(&mut self, size: u32) -> Result<()> {
        let Some(statement) = self.statement.as_mut() else {
            return Err(Error::Closed);
        };
        statement.set_fetch_size(size).map_err(|e| {
            let error = self.classifier.to_error(e, Phase::Execute, &self.query);
            log_error(&error);
            error
        })
    }

    /// Releases the native handle. Safe to call more than once.
    pub fn close(&mut self) {
        self.statement = None;
    }
}

impl<S: NativeStatement> Display for Statement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.query))
    }
}
