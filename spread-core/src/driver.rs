use crate::{BindStyle, Connection, Prepared, Result, SqlWriter};
use std::{borrow::Cow, future::Future};

pub trait Driver: Send + Sync + Sized {
    type Connection: Connection<Driver = Self>;
    type SqlWriter: SqlWriter;
    type Prepared: Prepared;

    /// Scheme of the connection URLs (`sqlite://...`).
    const NAME: &'static str;
    /// Placeholder syntax statements are rebound into before preparing.
    const BIND_STYLE: BindStyle;

    fn sql_writer(&self) -> Self::SqlWriter;

    fn connect(&self, url: Cow<'static, str>) -> impl Future<Output = Result<Self::Connection>> {
        Self::Connection::connect(url)
    }
}
