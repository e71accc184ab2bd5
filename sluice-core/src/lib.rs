mod as_value;
mod classify;
mod coerce;
mod connection;
mod driver;
mod error;
mod native;
mod param;
mod result_set;
mod row;
mod statement;
mod util;
mod value;

pub use as_value::*;
pub use classify::*;
pub use coerce::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use native::*;
pub use param::*;
pub use result_set::*;
pub use row::*;
pub use statement::*;
pub use util::*;
pub use value::*;
