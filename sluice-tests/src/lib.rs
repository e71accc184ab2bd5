mod errors;
#[cfg(not(feature = "disable-returning"))]
mod inserted_id;
pub mod mock;
mod shapes;
mod simple;
mod single_pass;
mod streaming;
#[cfg(not(feature = "disable-transactions"))]
mod transactions;

use crate::{
    errors::{disconnected, errors},
    shapes::shapes,
    simple::simple,
    single_pass::single_pass,
    streaming::streaming,
};
#[cfg(not(feature = "disable-returning"))]
use inserted_id::inserted_id;
use log::LevelFilter;
use sluice::{Connection, NativeConnection};
use std::env;
#[cfg(not(feature = "disable-transactions"))]
use transactions::transactions;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Runs the backend conformance suite on a live connection, consuming it.
pub fn execute_tests<C: NativeConnection>(mut connection: Connection<C>) {
    simple(&mut connection);
    shapes(&mut connection);
    single_pass(&mut connection);
    streaming(&mut connection).expect("Streaming parameters test did not succeed");
    #[cfg(not(feature = "disable-returning"))]
    inserted_id(&mut connection).expect("Inserted id test did not succeed");
    #[cfg(not(feature = "disable-transactions"))]
    transactions(&mut connection).expect("Transactions test did not succeed");
    errors(&mut connection);
    disconnected(connection);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
