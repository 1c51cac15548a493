use crate::{SqliteConnection, SqliteDriver, error_message};
use libsqlite3_sys::{SQLITE_OK, sqlite3_exec, sqlite3_get_autocommit};
use spread_core::{
    Driver, Executor, Query, QueryResult, Result, SqlWriter, Transaction, stream::Stream,
};
use std::{future::Future, ptr};

pub struct SqliteTransaction<'c> {
    connection: &'c mut SqliteConnection,
    finished: bool,
}

impl<'c> SqliteTransaction<'c> {
    pub async fn new(connection: &'c mut SqliteConnection) -> Result<Self> {
        let mut sql = String::new();
        connection
            .driver()
            .sql_writer()
            .write_transaction_begin(&mut sql);
        connection.execute(sql.into()).await?;
        Ok(Self {
            connection,
            finished: false,
        })
    }

    async fn finish(mut self, commit: bool) -> Result<()> {
        let mut sql = String::new();
        let writer = self.connection.driver().sql_writer();
        if commit {
            writer.write_transaction_commit(&mut sql);
        } else {
            log::warn!("Rolling back the transaction");
            writer.write_transaction_rollback(&mut sql);
        }
        // On failure the transaction is still open and `Drop` rolls it back
        self.connection.execute(sql.into()).await?;
        self.finished = true;
        Ok(())
    }
}

impl<'c> Executor for SqliteTransaction<'c> {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        self.connection.driver()
    }

    fn prepare(&mut self, sql: String) -> impl Future<Output = Result<Query<SqliteDriver>>> + Send {
        self.connection.prepare(sql)
    }

    fn run(&mut self, query: Query<SqliteDriver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.connection.run(query)
    }
}

impl<'c> Transaction<'c> for SqliteTransaction<'c> {
    fn commit(self) -> impl Future<Output = Result<()>> {
        self.finish(true)
    }

    fn rollback(self) -> impl Future<Output = Result<()>> {
        self.finish(false)
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let connection = *self.connection.connection;
        if connection.is_null() || unsafe { sqlite3_get_autocommit(connection) } != 0 {
            return;
        }
        log::warn!("Transaction dropped while still open, rolling it back");
        let rc = unsafe {
            sqlite3_exec(
                connection,
                c"ROLLBACK;".as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        if rc != SQLITE_OK {
            log::error!(
                "Could not roll back the dropped transaction: {}",
                error_message(connection, rc)
            );
        }
    }
}
