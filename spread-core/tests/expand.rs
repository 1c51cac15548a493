#[cfg(test)]
mod tests {
    use indoc::indoc;
    use spread_core::{
        Arg, AsValue, BindError, GenericSqlWriter, SqlWriter, Statement, Value, args, expand,
        ordinal_list, write_placeholders,
    };

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn expand_in_list() {
        let (sql, args) = expand("select * from t where id in (?)", [Arg::list([1, 2, 3])])
            .expect("Expansion should succeed");
        assert_eq!(sql, "select * from t where id in (?,?,?)");
        assert_eq!(
            args,
            [
                Value::Int32(Some(1)),
                Value::Int32(Some(2)),
                Value::Int32(Some(3))
            ]
        );
    }

    #[test]
    fn expand_placeholder_count() {
        for n in 1..20 {
            let ids = (0..n).map(|i| i as i64 * 7).collect::<Vec<_>>();
            let (sql, args) = expand(
                "select * from t where a = ? and id in (?) and b < ?",
                args!["x", Arg::list(ids.clone()), 10.5],
            )
            .expect("Expansion should succeed");
            assert_eq!(placeholders(&sql), 3 - 1 + n);
            assert_eq!(args.len(), 3 - 1 + n);
            assert_eq!(args[0], Value::Varchar(Some("x".into())));
            assert_eq!(args[n + 1], Value::Float64(Some(10.5)));
            for (i, id) in ids.iter().enumerate() {
                assert_eq!(args[i + 1], Value::Int64(Some(*id)));
            }
        }
    }

    #[test]
    fn expand_interleaved_lists() {
        let (sql, args) = expand(
            "select * from t where a in (?) and b = ? and c in (?)",
            args![Arg::list(["p", "q"]), 1, Arg::list([true])],
        )
        .expect("Expansion should succeed");
        assert_eq!(sql, "select * from t where a in (?,?) and b = ? and c in (?)");
        assert_eq!(
            args,
            [
                Value::Varchar(Some("p".into())),
                Value::Varchar(Some("q".into())),
                Value::Int32(Some(1)),
                Value::Boolean(Some(true)),
            ]
        );
    }

    #[test]
    fn expand_scalars_untouched() {
        let template = "update t set age = ? where id = ?";
        let (sql, args) = expand(template, args![29, 26i64]).expect("Expansion should succeed");
        assert_eq!(sql, template);
        assert_eq!(args, [Value::Int32(Some(29)), Value::Int64(Some(26))]);
    }

    #[test]
    fn expand_ignores_quoted_question_marks() {
        let (sql, args) = expand(
            indoc! {"
                select id, 'why?' as q -- really?
                from t
                where name in (?)
            "},
            [Arg::list(["a", "b"])],
        )
        .expect("Expansion should succeed");
        assert_eq!(
            sql,
            indoc! {"
                select id, 'why?' as q -- really?
                from t
                where name in (?,?)
            "}
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn expand_empty_list() {
        assert_eq!(
            expand("select * from t where id in (?)", [Arg::List(vec![])]),
            Err(BindError::EmptyList { position: 0 })
        );
        assert_eq!(
            expand(
                "select * from t where a = ? and id in (?)",
                args![1, Arg::list(Vec::<i32>::new())]
            ),
            Err(BindError::EmptyList { position: 1 })
        );
    }

    #[test]
    fn expand_arity_mismatch() {
        assert_eq!(
            expand("select * from t where a = ? and b in (?)", args![5]),
            Err(BindError::ArityMismatch {
                expected: 2,
                given: 1
            })
        );
        assert_eq!(
            expand("select * from t", args![5]),
            Err(BindError::ArityMismatch {
                expected: 0,
                given: 1
            })
        );
        // Arity is checked before the lists are looked at
        assert_eq!(
            expand("select * from t where b in (?)", args![Arg::List(vec![]), 1]),
            Err(BindError::ArityMismatch {
                expected: 1,
                given: 2
            })
        );
    }

    #[test]
    fn expand_malformed() {
        assert!(matches!(
            expand("select * from t where name = 'abc and id in (?)", [Arg::list([1])]),
            Err(BindError::MalformedTemplate { offset: 29, .. })
        ));
    }

    #[test]
    fn statement_insert_rows() {
        let statement = Statement::insert_rows(
            "insert into demo_user (name, age)",
            [
                vec!["xx".as_value(), Value::Int32(Some(20))],
                vec!["xxx".as_value(), Value::Int32(Some(21))],
                vec!["xxxx".as_value(), Value::Int32(Some(22))],
            ],
        )
        .expect("Statement should build");
        assert_eq!(
            statement.sql,
            "insert into demo_user (name, age) VALUES (?,?),(?,?),(?,?)"
        );
        assert_eq!(statement.args.len(), 6);
        assert_eq!(statement.args[4], "xxxx".as_value());
        assert_eq!(statement.args[5], Value::Int32(Some(22)));
    }

    #[test]
    fn statement_insert_rows_errors() {
        assert_eq!(
            Statement::insert_rows("insert into t (a)", Vec::<Vec<Value>>::new()),
            Err(BindError::EmptyList { position: 0 })
        );
        assert_eq!(
            Statement::insert_rows(
                "insert into t (a, b)",
                [
                    vec![Value::Int32(Some(1)), Value::Int32(Some(2))],
                    vec![Value::Int32(Some(3))],
                ]
            ),
            Err(BindError::ArityMismatch {
                expected: 2,
                given: 1
            })
        );
    }

    #[test]
    fn statement_display() {
        let statement = Statement::new("select ? , ?", args!["it's", Value::Null])
            .expect("Statement should build");
        assert_eq!(statement.to_string(), "select ? , ? ['it''s', NULL]");
        assert_eq!(statement.placeholders(), 2);
    }

    #[test]
    fn ordinal() {
        assert_eq!(ordinal_list([21, 30, 22, 32, 23, 33]), "21,30,22,32,23,33");
        assert_eq!(ordinal_list(Vec::<i64>::new()), "");
        let mut out = String::from("in (");
        write_placeholders(&mut out, 4);
        out.push(')');
        assert_eq!(out, "in (?,?,?,?)");
    }

    #[test]
    fn ordered_fetch_statement() {
        let ids = [21i64, 30, 22];
        let mut sql = String::from("select id from t where id in (?) order by ");
        GenericSqlWriter::new().write_ordinal_lookup(&mut sql, "id");
        let statement = Statement::new(&sql, args![Arg::list(ids), ordinal_list(ids)])
            .expect("Statement should build");
        assert_eq!(
            statement.sql,
            "select id from t where id in (?,?,?) order by FIND_IN_SET(\"id\", ?)"
        );
        assert_eq!(
            statement.args,
            [
                Value::Int64(Some(21)),
                Value::Int64(Some(30)),
                Value::Int64(Some(22)),
                Value::Varchar(Some("21,30,22".into())),
            ]
        );
    }
}
