use crate::{
    CBox, SqliteDriver, SqlitePrepared, SqliteTransaction, error_message,
    extract::{extract_name, extract_value},
    prepared::statement_sql,
};
use async_stream::stream;
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI,
    SQLITE_ROW, sqlite3, sqlite3_busy_timeout, sqlite3_changes64, sqlite3_close,
    sqlite3_column_count, sqlite3_db_handle, sqlite3_finalize,
    sqlite3_last_insert_rowid, sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt,
};
use spread_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, Row, RowLabeled,
    RowNames, RowsAffected, Transaction,
    future::Either,
    stream::{Stream, StreamExt},
    truncate_long,
};
use std::{
    borrow::Cow,
    ffi::{CString, c_char, c_int},
    future::Future,
    pin::pin,
    ptr,
    sync::{
        Arc,
        atomic::{AtomicPtr, Ordering},
    },
};
use tokio::task::spawn_blocking;

const BUSY_TIMEOUT_MS: c_int = 5_000;

pub struct SqliteConnection {
    pub(crate) connection: CBox<sqlite3>,
}

/// Prepare the first statement in `sql`.
///
/// Returns the statement (`None` when the text holds only whitespace or
/// comments) and the number of bytes sqlite consumed.
fn prepare_next(
    connection: *mut sqlite3,
    sql: &str,
) -> Result<(Option<CBox<sqlite3_stmt>>, usize)> {
    let mut statement = CBox::<sqlite3_stmt>::new(ptr::null_mut(), |p| unsafe {
        sqlite3_finalize(p);
    });
    let mut tail: *const c_char = ptr::null();
    let rc = unsafe {
        sqlite3_prepare_v2(
            connection,
            sql.as_ptr() as *const c_char,
            sql.len() as c_int,
            &mut *statement,
            &mut tail,
        )
    };
    if rc != SQLITE_OK {
        let error = Error::msg(error_message(connection, rc)).context(format!(
            "While preparing the query:\n{}",
            truncate_long!(sql)
        ));
        log::error!("{:#}", error);
        return Err(error);
    }
    let consumed = if tail.is_null() {
        sql.len()
    } else {
        tail as usize - sql.as_ptr() as usize
    };
    Ok(((!statement.is_null()).then_some(statement), consumed))
}

/// Step through a prepared statement until it is done.
///
/// Yields every row, then one `RowsAffected` if the statement has no result
/// columns. Stops at the first error.
fn run_statement(statement: CBox<sqlite3_stmt>) -> impl Stream<Item = Result<QueryResult>> + Send {
    stream! {
        let count = unsafe { sqlite3_column_count(*statement) };
        let labels = (0..count)
            .map(|i| extract_name(*statement, i))
            .collect::<Result<RowNames>>();
        'run: {
            let labels = match labels {
                Ok(labels) => labels,
                Err(error) => {
                    log::error!("{:#}", error);
                    yield Err(error);
                    break 'run;
                }
            };
            loop {
                let rc = unsafe { sqlite3_step(*statement) };
                match rc {
                    SQLITE_ROW => {
                        let values = (0..count)
                            .map(|i| extract_value(*statement, i))
                            .collect::<Result<Row>>();
                        match values {
                            Ok(values) => {
                                yield Ok(QueryResult::Row(RowLabeled::new(labels.clone(), values)));
                            }
                            Err(error) => {
                                log::error!("{:#}", error);
                                yield Err(error);
                                break 'run;
                            }
                        }
                    }
                    SQLITE_DONE => {
                        if count == 0 {
                            let affected = unsafe {
                                let connection = sqlite3_db_handle(*statement);
                                RowsAffected {
                                    rows_affected: sqlite3_changes64(connection) as u64,
                                    last_affected_id: Some(sqlite3_last_insert_rowid(connection)),
                                }
                            };
                            yield Ok(QueryResult::Affected(affected));
                        }
                        break 'run;
                    }
                    _ => {
                        let error = Error::msg(error_message(
                            unsafe { sqlite3_db_handle(*statement) },
                            rc,
                        ))
                        .context(format!(
                            "While executing the query:\n{}",
                            truncate_long!(statement_sql(*statement))
                        ));
                        log::error!("{:#}", error);
                        yield Err(error);
                        break 'run;
                    }
                }
            }
        }
    }
}

impl SqliteConnection {
    /// Run every statement of a raw SQL text, one after the other.
    pub(crate) fn run_unprepared(
        &mut self,
        sql: String,
    ) -> impl Stream<Item = Result<QueryResult>> + Send {
        let connection = &self.connection;
        let sql: Arc<str> = sql.into();
        stream! {
            let mut offset = 0;
            while let Some(remaining) = sql.get(offset..) {
                if remaining.trim().is_empty() {
                    break;
                }
                let prepared = {
                    let connection = AtomicPtr::new(**connection);
                    let sql = sql.clone();
                    spawn_blocking(move || {
                        prepare_next(
                            connection.load(Ordering::Relaxed),
                            sql.get(offset..).unwrap_or_default(),
                        )
                    })
                    .await
                };
                let (statement, consumed) = match prepared {
                    Ok(Ok(v)) => v,
                    Ok(Err(error)) => {
                        yield Err(error);
                        break;
                    }
                    Err(error) => {
                        let error = Error::new(error).context("The prepare task did not complete");
                        log::error!("{:#}", error);
                        yield Err(error);
                        break;
                    }
                };
                if consumed == 0 {
                    break;
                }
                offset += consumed;
                let Some(statement) = statement else {
                    continue;
                };
                let mut results = pin!(run_statement(statement));
                let mut failed = false;
                while let Some(result) = results.next().await {
                    failed = result.is_err();
                    yield result;
                    if failed {
                        break;
                    }
                }
                if failed {
                    break;
                }
            }
        }
    }
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        &SqliteDriver {}
    }

    async fn prepare(&mut self, sql: String) -> Result<Query<SqliteDriver>> {
        let connection = AtomicPtr::new(*self.connection);
        let statement = spawn_blocking(move || {
            let connection = connection.load(Ordering::Relaxed);
            let (statement, consumed) = prepare_next(connection, &sql)?;
            let Some(statement) = statement else {
                let error = Error::msg("Cannot prepare an empty query");
                log::error!("{:#}", error);
                return Err(error);
            };
            if !sql.get(consumed..).unwrap_or_default().trim().is_empty() {
                let error = Error::msg("Cannot prepare more than one statement at a time")
                    .context(format!("While preparing the query:\n{}", truncate_long!(sql)));
                log::error!("{:#}", error);
                return Err(error);
            }
            Ok(statement)
        })
        .await??;
        Ok(Query::Prepared(SqlitePrepared::new(statement)))
    }

    fn run(&mut self, query: Query<SqliteDriver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        match query {
            Query::Raw(sql) => Either::Left(self.run_unprepared(sql)),
            Query::Prepared(prepared) => Either::Right(run_statement(prepared.statement)),
        }
    }
}

impl Connection for SqliteConnection {
    async fn connect(url: Cow<'static, str>) -> Result<SqliteConnection> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(path) = url.strip_prefix(prefix.as_str()) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let uri = CString::new(format!("file:{}", path))
            .with_context(|| format!("Error while decoding connection URL: `{}`", url))?;
        let connection = spawn_blocking(move || {
            let mut connection = CBox::<sqlite3>::new(ptr::null_mut(), |p| unsafe {
                sqlite3_close(p);
            });
            let rc = unsafe {
                sqlite3_open_v2(
                    uri.as_ptr(),
                    &mut *connection,
                    SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                    ptr::null(),
                )
            };
            if rc != SQLITE_OK {
                return Err(Error::msg(error_message(*connection, rc)));
            }
            unsafe {
                sqlite3_busy_timeout(*connection, BUSY_TIMEOUT_MS);
            }
            Ok(connection)
        })
        .await?;
        match connection {
            Ok(connection) => {
                log::debug!("Connected to `{}`", url);
                Ok(Self { connection })
            }
            Err(error) => {
                let error = error.context(format!("Could not open `{}`", url));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn begin(&mut self) -> impl Future<Output = Result<impl Transaction<'_>>> {
        SqliteTransaction::new(self)
    }

    async fn disconnect(mut self) -> Result<()> {
        let connection = self.connection.take();
        let rc = unsafe { sqlite3_close(connection) };
        if rc != SQLITE_OK {
            // Statements still alive keep the handle open
            let error =
                Error::msg(error_message(connection, rc)).context("While closing the connection");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }
}
