use crate::{Executor, Result, Transaction};
use std::{borrow::Cow, future::Future};

/// An owned database connection.
///
/// Created once with `connect`, handed by `&mut` to every operation, closed with
/// `disconnect`.
pub trait Connection: Executor {
    /// Open a connection to the given URL.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>>;

    /// Start a transaction, every statement executed through it belongs to the
    /// transaction until it is committed or rolled back.
    fn begin(&mut self) -> impl Future<Output = Result<impl Transaction<'_>>>;

    /// Close the connection, reporting failures instead of swallowing them in `Drop`.
    fn disconnect(self) -> impl Future<Output = Result<()>>;
}
