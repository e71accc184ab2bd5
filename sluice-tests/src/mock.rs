use sluice::{
    FetchMode, NativeBindType, NativeConnection, NativeError, NativeStatement, RowLabeled,
    RowNames, Value,
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

/// A native call observed by the scripted client.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare(String),
    Bind {
        name: String,
        value: Value,
        bind_type: NativeBindType,
        size: usize,
    },
    Execute,
    FetchMode(FetchMode),
    Fetch,
    FetchSize(u32),
    CloseCursor,
    Begin,
    Commit,
    Rollback,
}

/// Journal of every native call, shared by a connection and its statements.
#[derive(Debug, Clone, Default)]
pub struct MockLog(Rc<RefCell<Vec<Call>>>);

impl MockLog {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }
    pub fn binds(&self) -> Vec<(String, Value, NativeBindType, usize)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|v| match v {
                Call::Bind {
                    name,
                    value,
                    bind_type,
                    size,
                } => Some((name.clone(), value.clone(), *bind_type, *size)),
                _ => None,
            })
            .collect()
    }
    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|v| *v == call).count()
    }
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug, Default)]
struct Script {
    rows: HashMap<String, (RowNames, Vec<Box<[Value]>>)>,
    affected: HashMap<String, u64>,
    prepare_errors: HashMap<String, NativeError>,
    execute_errors: HashMap<String, NativeError>,
    fetch_errors: HashMap<String, (usize, NativeError)>,
    refused_binds: HashSet<String>,
    bind_errors: HashMap<String, NativeError>,
    transaction_error: Option<NativeError>,
}

/// Scripted in-memory native client.
///
/// Queries are not parsed: every behavior (rows, affected counts, failures) is registered up front
/// for an exact query string. `BOOLEAN` selects whether the client has a boolean bind type.
#[derive(Debug, Default)]
pub struct MockConnection<const BOOLEAN: bool = true> {
    script: Rc<RefCell<Script>>,
    log: MockLog,
}

impl<const BOOLEAN: bool> MockConnection<BOOLEAN> {
    pub fn new() -> Self {
        Self {
            script: Default::default(),
            log: Default::default(),
        }
    }

    pub fn log(&self) -> MockLog {
        self.log.clone()
    }

    pub fn with_rows<const N: usize>(
        self,
        query: &str,
        labels: [&str; N],
        rows: impl IntoIterator<Item = [Value; N]>,
    ) -> Self {
        let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
        let rows = rows.into_iter().map(Box::from).collect();
        self.script
            .borrow_mut()
            .rows
            .insert(query.into(), (labels, rows));
        self
    }

    pub fn with_affected(self, query: &str, affected: u64) -> Self {
        self.script
            .borrow_mut()
            .affected
            .insert(query.into(), affected);
        self
    }

    pub fn fail_prepare(self, query: &str, error: NativeError) -> Self {
        self.script
            .borrow_mut()
            .prepare_errors
            .insert(query.into(), error);
        self
    }

    pub fn fail_execute(self, query: &str, error: NativeError) -> Self {
        self.script
            .borrow_mut()
            .execute_errors
            .insert(query.into(), error);
        self
    }

    /// The fetch following the first `after` rows fails.
    pub fn fail_fetch(self, query: &str, after: usize, error: NativeError) -> Self {
        self.script
            .borrow_mut()
            .fetch_errors
            .insert(query.into(), (after, error));
        self
    }

    /// Binding the placeholder `name` returns `false`.
    pub fn refuse_bind(self, name: &str) -> Self {
        self.script.borrow_mut().refused_binds.insert(name.into());
        self
    }

    pub fn fail_bind(self, name: &str, error: NativeError) -> Self {
        self.script
            .borrow_mut()
            .bind_errors
            .insert(name.into(), error);
        self
    }

    pub fn fail_transactions(self, error: NativeError) -> Self {
        self.script.borrow_mut().transaction_error = Some(error);
        self
    }

    fn transaction_call(&mut self, call: Call) -> Result<(), NativeError> {
        self.log.push(call);
        match &self.script.borrow().transaction_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl<const BOOLEAN: bool> NativeConnection for MockConnection<BOOLEAN> {
    type Statement = MockStatement<BOOLEAN>;

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement, NativeError> {
        self.log.push(Call::Prepare(sql.into()));
        if let Some(error) = self.script.borrow().prepare_errors.get(sql) {
            return Err(error.clone());
        }
        Ok(MockStatement {
            query: sql.into(),
            script: self.script.clone(),
            log: self.log.clone(),
            executed: false,
            position: 0,
        })
    }

    fn begin(&mut self) -> Result<(), NativeError> {
        self.transaction_call(Call::Begin)
    }

    fn commit(&mut self) -> Result<(), NativeError> {
        self.transaction_call(Call::Commit)
    }

    fn rollback(&mut self) -> Result<(), NativeError> {
        self.transaction_call(Call::Rollback)
    }
}

#[derive(Debug)]
pub struct MockStatement<const BOOLEAN: bool = true> {
    query: String,
    script: Rc<RefCell<Script>>,
    log: MockLog,
    executed: bool,
    position: usize,
}

impl<const BOOLEAN: bool> NativeStatement for MockStatement<BOOLEAN> {
    const SUPPORTS_BOOLEAN: bool = BOOLEAN;

    fn bind(
        &mut self,
        name: &str,
        value: &Value,
        bind_type: NativeBindType,
        size: usize,
    ) -> Result<bool, NativeError> {
        self.log.push(Call::Bind {
            name: name.into(),
            value: value.clone(),
            bind_type,
            size,
        });
        let script = self.script.borrow();
        if let Some(error) = script.bind_errors.get(name) {
            return Err(error.clone());
        }
        Ok(!script.refused_binds.contains(name))
    }

    fn execute(&mut self) -> Result<(), NativeError> {
        self.log.push(Call::Execute);
        if let Some(error) = self.script.borrow().execute_errors.get(&self.query) {
            return Err(error.clone());
        }
        self.executed = true;
        Ok(())
    }

    fn set_fetch_mode(&mut self, mode: FetchMode) {
        self.log.push(Call::FetchMode(mode));
    }

    fn fetch(&mut self) -> Result<Option<RowLabeled>, NativeError> {
        self.log.push(Call::Fetch);
        if !self.executed {
            return Err(NativeError::new("HY010", "Function sequence error"));
        }
        let script = self.script.borrow();
        if let Some((after, error)) = script.fetch_errors.get(&self.query)
            && self.position == *after
        {
            return Err(error.clone());
        }
        let Some((labels, rows)) = script.rows.get(&self.query) else {
            return Ok(None);
        };
        let row = rows
            .get(self.position)
            .map(|v| RowLabeled::new(labels.clone(), v.clone()));
        if row.is_some() {
            self.position += 1;
        }
        Ok(row)
    }

    fn row_count(&self) -> u64 {
        self.script
            .borrow()
            .affected
            .get(&self.query)
            .copied()
            .unwrap_or_default()
    }

    fn set_fetch_size(&mut self, size: u32) -> Result<(), NativeError> {
        self.log.push(Call::FetchSize(size));
        Ok(())
    }

    fn close_cursor(&mut self) {
        self.log.push(Call::CloseCursor);
    }
}
