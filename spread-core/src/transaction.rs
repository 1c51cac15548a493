use crate::{Executor, Result};
use std::future::Future;

/// An open transaction borrowing its connection.
///
/// Dropping it without calling `commit` or `rollback` rolls it back.
pub trait Transaction<'c>: Executor {
    fn commit(self) -> impl Future<Output = Result<()>>;
    fn rollback(self) -> impl Future<Output = Result<()>>;
}
