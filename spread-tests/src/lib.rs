mod batch;
mod crud;
mod errors;
mod named;
mod transaction;

use crate::{
    batch::{batch_insert, fetch_by_ids},
    crud::crud,
    errors::builder_errors,
    named::named,
};
pub use log;
use log::LevelFilter;
use spread::Connection;
use std::env;
#[cfg(not(feature = "disable-transactions"))]
use transaction::transaction;

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

pub async fn execute_tests<C: Connection>(mut connection: C) {
    crud(&mut connection).await;
    named(&mut connection).await;
    batch_insert(&mut connection).await;
    fetch_by_ids(&mut connection).await;
    builder_errors(&mut connection).await;
    #[cfg(not(feature = "disable-transactions"))]
    transaction(&mut connection).await;
    connection
        .disconnect()
        .await
        .expect("Could not disconnect at the end of the tests");
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        $($code)+
        $crate::log::set_max_level(level);
    }};
}
