#[cfg(test)]
mod tests {
    use indoc::indoc;
    use spread::{
        Arg, Connection, Driver, FromRow, GenericSqlWriter, NamedArgs, RowLabeled, SqlWriter,
        Statement, User, Value, create_table, find_by_ids_ordered, insert_many,
    };
    use spread_sqlite::SqliteDriver;
    use std::sync::Arc;

    #[test]
    fn user_from_row() {
        let row = RowLabeled::new(
            Arc::from(["id".to_string(), "name".to_string(), "age".to_string()]),
            Box::new([
                Value::Int64(Some(21)),
                Value::Varchar(Some("nazha".into())),
                Value::Int64(Some(18)),
            ]),
        );
        assert_eq!(
            User::from_row(row).unwrap(),
            User {
                id: Some(21),
                name: "nazha".into(),
                age: 18,
            }
        );
        let row = RowLabeled::new(
            Arc::from(["name".to_string(), "age".to_string()]),
            Box::new([Value::Varchar(Some("xx".into())), Value::Int64(Some(20))]),
        );
        assert_eq!(User::from_row(row).unwrap(), User::new("xx", 20));
        let row = RowLabeled::new(
            Arc::from(["name".to_string()]),
            Box::new([Value::Varchar(Some("xx".into()))]),
        );
        assert!(User::from_row(row).is_err());
    }

    #[test]
    fn user_named_args() {
        let user = User::new("沙河小王子", 19);
        assert_eq!(
            user.named_arg("name"),
            Some(Arg::Scalar(Value::Varchar(Some("沙河小王子".into()))))
        );
        assert_eq!(user.named_arg("age"), Some(Arg::Scalar(Value::Int32(Some(19)))));
        assert_eq!(user.named_arg("id"), Some(Arg::Scalar(Value::Int64(None))));
        assert_eq!(user.named_arg("email"), None);
    }

    #[test]
    fn users_spread_into_groups() {
        let users = [
            User::new("spreadIn1", 21),
            User::new("spreadIn2", 21),
            User::new("spreadIn3", 21),
        ];
        let statement = Statement::new(
            "insert into demo_user (name, age) values (?), (?), (?)",
            users.iter().map(Arg::from),
        )
        .unwrap();
        assert_eq!(
            statement.sql,
            "insert into demo_user (name, age) values (?,?), (?,?), (?,?)"
        );
        assert_eq!(statement.args.len(), 6);
        assert_eq!(statement.args[2], Value::Varchar(Some("spreadIn2".into())));
        assert_eq!(statement.args[3], Value::Int32(Some(21)));
    }

    #[test]
    fn create_table_sql() {
        let writer = GenericSqlWriter::new();
        let mut sql = String::new();
        writer.write_primary_key_autoincrement(&mut sql, "id");
        assert_eq!(sql, "\"id\" INTEGER PRIMARY KEY AUTO_INCREMENT");
        let mut sql = String::new();
        writer.write_drop_table(&mut sql, "demo_user", true);
        assert_eq!(sql, "DROP TABLE IF EXISTS \"demo_user\";");
        let mut sql = String::from(indoc! {"
            select id, name, age
            from demo_user
            where id in (?)
            order by "});
        writer.write_ordinal_lookup(&mut sql, "id");
        assert_eq!(
            sql,
            indoc! {"
                select id, name, age
                from demo_user
                where id in (?)
                order by FIND_IN_SET(\"id\", ?)"}
        );
    }

    #[tokio::test]
    async fn ordered_fetch_in_memory() {
        let mut connection = SqliteDriver::new()
            .connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the in memory database");
        create_table(&mut connection)
            .await
            .expect("Could not create the table");
        let users = (1..=40)
            .map(|i| User::new(format!("user{}", i), i))
            .collect::<Vec<_>>();
        insert_many(&mut connection, &users)
            .await
            .expect("Could not insert the users");
        let ids = [21, 30, 22, 32, 23, 33];
        let found = find_by_ids_ordered(&mut connection, &ids)
            .await
            .expect("Could not fetch the users");
        assert_eq!(
            found.iter().map(|u| u.id.unwrap()).collect::<Vec<_>>(),
            ids
        );
        assert_eq!(found[0].name, "user21");
        connection.disconnect().await.expect("Could not disconnect");
    }
}
