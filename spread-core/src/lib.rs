mod arg;
mod as_value;
mod connection;
mod driver;
mod error;
mod executor;
mod expand;
mod named;
mod prepared;
mod query;
mod rebind;
mod scan;
mod sql_writer;
mod statement;
mod transaction;
mod util;
mod value;

pub use ::anyhow::Context;
pub use arg::*;
pub use as_value::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use expand::*;
pub use named::*;
pub use prepared::*;
pub use query::*;
pub use rebind::*;
pub use sql_writer::*;
pub use statement::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
