use crate::{Connection, NativeConnection, Result};

/// Connection factory for a native backend.
pub trait Driver {
    type NativeConnection: NativeConnection;

    /// Scheme expected in the connection url, as in `sqlite://`.
    const NAME: &'static str;

    /// Opens a connection from an url starting with `<NAME>://`.
    fn connect(&self, url: &str) -> Result<Connection<Self::NativeConnection>>;
}
