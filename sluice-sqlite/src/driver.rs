use crate::SqliteConnection;
use sluice_core::{Connection, Driver, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqliteDriver {
    type NativeConnection = SqliteConnection;

    const NAME: &'static str = "sqlite";

    fn connect(&self, url: &str) -> Result<Connection<SqliteConnection>> {
        Ok(Connection::new(SqliteConnection::open(url)?))
    }
}
