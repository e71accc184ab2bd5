//! Synchronous adapter between a database agnostic SQL layer and native database clients.
//!
//! A [`Connection`] wraps a [`NativeConnection`] and prepares [`Statement`]s. A statement binds a
//! [`Params`] set and executes into a single pass [`ResultSet`]. Native failures are classified into
//! the closed [`Error`] set, connection losses included.
//!
//! ```rust
//! use sluice::{Driver, FetchMode, Param, Params};
//! use sluice_sqlite::SqliteDriver;
//!
//! let mut connection = SqliteDriver::new().connect("sqlite://:memory:")?;
//! connection.execute(
//!     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
//!     &mut Params::new(),
//! )?;
//! let mut statement =
//!     connection.prepare("INSERT INTO users (name) VALUES (:name) RETURNING id AS _insertedid")?;
//! statement.bind(
//!     &mut Params::new()
//!         .with_named("name", "Ada")
//!         .with(Param::inserted_id()),
//! )?;
//! let result = statement.exec()?;
//! assert_eq!(result.affected_rows(), 1);
//! assert_eq!(result.inserted_id_as::<i64>()?, Some(1));
//! drop(result);
//!
//! let rows = connection.fetch_all("SELECT name FROM users", &mut Params::new(), FetchMode::Both)?;
//! assert_eq!(rows[0].get(0), rows[0].get_column("name"));
//! # Ok::<(), sluice::Error>(())
//! ```
pub use sluice_core::*;
