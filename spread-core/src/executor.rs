use crate::{
    Driver, Error, FromRow, Prepared, Query, QueryResult, Result, RowLabeled, RowsAffected,
    Statement, truncate_long,
    stream::{Stream, StreamExt, TryStreamExt},
};
use futures::{TryFutureExt, future};
use std::{future::Future, pin::pin};

pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Prepare a single statement, the SQL must already use the driver placeholder syntax.
    fn prepare(&mut self, sql: String) -> impl Future<Output = Result<Query<Self::Driver>>> + Send;

    /// General method to send any query and return any result type (either row or count).
    fn run(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(query).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query<Self::Driver>) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(query)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }

    /// Rebind the statement into the driver syntax, prepare it and bind every
    /// argument by position.
    fn bind(&mut self, statement: Statement) -> impl Future<Output = Result<Query<Self::Driver>>> + Send {
        async move {
            let sql = statement.rebind(<Self::Driver as Driver>::BIND_STYLE)?;
            log::debug!("Binding {} arguments to:\n{}", statement.args.len(), truncate_long!(sql));
            let mut query = self.prepare(sql).await?;
            if let Query::Prepared(prepared) = &query {
                let expected = prepared.parameter_count();
                if expected != statement.args.len() {
                    let error = Error::msg(format!(
                        "The prepared statement expects {} parameters but {} arguments were supplied",
                        expected,
                        statement.args.len()
                    ));
                    log::error!("{:#}", error);
                    return Err(error);
                }
            }
            for value in statement.args {
                query.bind(value)?;
            }
            Ok(query)
        }
    }

    /// Bind and execute a statement, returning the rows affected.
    fn execute_statement(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        async move {
            let query = self.bind(statement).await?;
            self.execute(query).await
        }
    }

    /// Bind and execute a statement, returning its rows.
    fn fetch_statement(
        &mut self,
        statement: Statement,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send {
        async move {
            let query = self.bind(statement).await?;
            Ok::<_, Error>(self.fetch(query))
        }
        .try_flatten_stream()
    }

    /// Bind and execute a statement, decoding every row into `T`.
    fn fetch_all_as<T: FromRow + Send>(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<T>>> + Send {
        self.fetch_statement(statement)
            .and_then(|row| future::ready(T::from_row(row)))
            .try_collect()
    }

    /// Bind and execute a statement, decoding the first row into `T`.
    ///
    /// The remaining rows are not read, the cursor is released as soon as the
    /// first row arrives.
    fn fetch_one_as<T: FromRow + Send>(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<Option<T>>> + Send {
        let stream = self.fetch_statement(statement);
        async move {
            let mut stream = pin!(stream);
            match stream.try_next().await? {
                Some(row) => T::from_row(row).map(Some),
                None => Ok(None),
            }
        }
    }
}
