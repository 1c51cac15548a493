use crate::{
    Arg, AsValue, BindError, Connection, Driver, Error, Executor, FromRow, NamedArgs, Result,
    RowLabeled, RowsAffected, SqlWriter, Statement, Transaction, args, ordinal_list, separated_by,
    truncate_long,
};

/// Table the user operations work on.
pub const USER_TABLE: &str = "demo_user";

/// A row of the `demo_user` table.
///
/// `id` is `None` until the database assigns it, and for queries that do not
/// select it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
}

impl User {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
        }
    }
}

impl FromRow for User {
    fn from_row(row: RowLabeled) -> Result<Self> {
        let id = match row.get_column("id") {
            Some(_) => row.get::<Option<i64>>("id")?,
            None => None,
        };
        Ok(Self {
            id,
            name: row.get("name")?,
            age: row.get("age")?,
        })
    }
}

impl NamedArgs for User {
    fn named_arg(&self, name: &str) -> Option<Arg> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "age" => Some(self.age.into()),
            _ => None,
        }
    }
}

/// A user spread into a `(?)` group expands to `(name, age)`.
impl From<&User> for Arg {
    fn from(user: &User) -> Self {
        Arg::List(vec![user.name.as_str().as_value(), user.age.as_value()])
    }
}

fn inserted_id(affected: RowsAffected) -> Result<i64> {
    affected.last_affected_id.ok_or_else(|| {
        let error = Error::msg("The database did not report the id of the inserted row");
        log::error!("{:#}", error);
        error
    })
}

/// Create the `demo_user` table if missing.
pub async fn create_table<E: Executor>(executor: &mut E) -> Result<()> {
    let writer = executor.driver().sql_writer();
    let mut sql = String::from("CREATE TABLE IF NOT EXISTS ");
    writer.write_identifier_quoted(&mut sql, USER_TABLE);
    sql.push_str(" (\n    ");
    writer.write_primary_key_autoincrement(&mut sql, "id");
    sql.push_str(",\n    ");
    writer.write_identifier_quoted(&mut sql, "name");
    sql.push_str(" VARCHAR(20) NOT NULL DEFAULT '',\n    ");
    writer.write_identifier_quoted(&mut sql, "age");
    sql.push_str(" INTEGER NOT NULL DEFAULT 0\n);");
    executor.execute(sql.into()).await.map(|_| ())
}

pub async fn drop_table<E: Executor>(executor: &mut E, if_exists: bool) -> Result<()> {
    let mut sql = String::new();
    executor
        .driver()
        .sql_writer()
        .write_drop_table(&mut sql, USER_TABLE, if_exists);
    executor.execute(sql.into()).await.map(|_| ())
}

/// The user with the given id, if any.
pub async fn find_one<E: Executor>(executor: &mut E, id: i64) -> Result<Option<User>> {
    let statement = Statement::new(
        "select id, name, age from demo_user where id = ?",
        args![id],
    )?;
    executor.fetch_one_as(statement).await
}

/// Every user with an id greater than `id`.
pub async fn find_after<E: Executor>(executor: &mut E, id: i64) -> Result<Vec<User>> {
    let statement = Statement::new(
        "select id, name, age from demo_user where id > ?",
        args![id],
    )?;
    executor.fetch_all_as(statement).await
}

/// Insert a user, returns the id assigned by the database.
pub async fn insert<E: Executor>(executor: &mut E, name: &str, age: i32) -> Result<i64> {
    let statement = Statement::new(
        "insert into demo_user(name, age) values(?,?)",
        args![name, age],
    )?;
    inserted_id(executor.execute_statement(statement).await?)
}

/// Returns the number of rows updated.
pub async fn update_age<E: Executor>(executor: &mut E, id: i64, age: i32) -> Result<u64> {
    let statement = Statement::new("update demo_user set age = ? where id = ?", args![age, id])?;
    Ok(executor.execute_statement(statement).await?.rows_affected)
}

/// Returns the number of rows deleted.
pub async fn delete<E: Executor>(executor: &mut E, id: i64) -> Result<u64> {
    let statement = Statement::new("delete from demo_user where id = ?", args![id])?;
    Ok(executor.execute_statement(statement).await?.rows_affected)
}

/// Insert with `:name` and `:age` taken from `source`, returns the new id.
pub async fn insert_named<E: Executor>(executor: &mut E, source: &impl NamedArgs) -> Result<i64> {
    let statement = Statement::named(
        "insert into demo_user(name, age) values(:name, :age)",
        source,
    )?;
    inserted_id(executor.execute_statement(statement).await?)
}

/// Users whose name equals the `:name` parameter of `source`.
pub async fn find_by_name<E: Executor>(
    executor: &mut E,
    source: &impl NamedArgs,
) -> Result<Vec<User>> {
    let statement = Statement::named(
        "select id, name, age from demo_user where name = :name",
        source,
    )?;
    executor.fetch_all_as(statement).await
}

async fn abort<'c, T: Transaction<'c>>(transaction: T, error: Error) -> Error {
    if let Err(rollback) = transaction.rollback().await {
        log::error!("Could not roll back the transaction: {:#}", rollback);
    }
    error
}

/// Set the age of every user in `ids` inside one transaction.
///
/// Each update must touch exactly one row, otherwise nothing is applied and the
/// error is returned.
pub async fn set_age_atomically<C: Connection>(
    connection: &mut C,
    ids: &[i64],
    age: i32,
) -> Result<()> {
    let statements = ids
        .iter()
        .map(|id| Statement::new("update demo_user set age = ? where id = ?", args![age, *id]))
        .collect::<std::result::Result<Vec<_>, BindError>>()?;
    let mut transaction = connection.begin().await?;
    for (id, statement) in ids.iter().zip(statements) {
        let result = transaction.execute_statement(statement).await;
        let affected = match result {
            Ok(affected) => affected,
            Err(error) => return Err(abort(transaction, error).await),
        };
        if affected.rows_affected != 1 {
            let error = Error::msg(format!(
                "Updating the user {} affected {} rows instead of 1",
                id, affected.rows_affected
            ));
            log::error!("{:#}", error);
            return Err(abort(transaction, error).await);
        }
    }
    transaction.commit().await
}

/// Insert all `users` with one statement, one `(?,?)` group per user.
pub async fn insert_many<E: Executor>(executor: &mut E, users: &[User]) -> Result<u64> {
    let statement = Statement::insert_rows(
        "insert into demo_user (name, age)",
        users
            .iter()
            .map(|user| [user.name.as_str().as_value(), user.age.as_value()]),
    )?;
    Ok(executor.execute_statement(statement).await?.rows_affected)
}

/// Insert all `users` by spreading each record into its own `(?)` group.
pub async fn insert_many_spread<E: Executor>(executor: &mut E, users: &[User]) -> Result<u64> {
    if users.is_empty() {
        return Err(BindError::EmptyList { position: 0 }.into());
    }
    let mut template = String::from("insert into demo_user (name, age) values ");
    separated_by(&mut template, users, |out, _| out.push_str("(?)"), ", ");
    let statement = Statement::new(&template, users.iter().map(Arg::from))?;
    log::debug!("Spread insert: {}", truncate_long!(statement.sql));
    Ok(executor.execute_statement(statement).await?.rows_affected)
}

/// Users whose id is in `ids`, in whatever order the database returns them.
pub async fn find_by_ids<E: Executor>(executor: &mut E, ids: &[i64]) -> Result<Vec<User>> {
    let statement = Statement::new(
        "select id, name, age from demo_user where id in (?)",
        args![Arg::list(ids.iter().copied())],
    )?;
    executor.fetch_all_as(statement).await
}

/// Users whose id is in `ids`, in the order of `ids`.
///
/// The ordering is done by the database through the dialect ordinal lookup,
/// ids without a matching row are skipped.
pub async fn find_by_ids_ordered<E: Executor>(
    executor: &mut E,
    ids: &[i64],
) -> Result<Vec<User>> {
    let mut template = String::from("select id, name, age from demo_user where id in (?) order by ");
    executor
        .driver()
        .sql_writer()
        .write_ordinal_lookup(&mut template, "id");
    let statement = Statement::new(
        &template,
        args![Arg::list(ids.iter().copied()), ordinal_list(ids)],
    )?;
    executor.fetch_all_as(statement).await
}
