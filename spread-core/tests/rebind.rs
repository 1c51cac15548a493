#[cfg(test)]
mod tests {
    use spread_core::{Arg, BindError, BindStyle, Statement, args, rebind};

    #[test]
    fn rebind_question() {
        let sql = "select * from t where a = ? and b = '?'";
        assert_eq!(rebind(BindStyle::Question, sql).unwrap(), sql);
    }

    #[test]
    fn rebind_dollar() {
        assert_eq!(
            rebind(
                BindStyle::Dollar,
                "select * from t where id in (?,?,?) and name = ? and note <> 'why?'"
            )
            .unwrap(),
            "select * from t where id in ($1,$2,$3) and name = $4 and note <> 'why?'"
        );
    }

    #[test]
    fn rebind_named_and_at() {
        let sql = "update t set a = ? where b = ?";
        assert_eq!(
            rebind(BindStyle::Named, sql).unwrap(),
            "update t set a = :arg1 where b = :arg2"
        );
        assert_eq!(
            rebind(BindStyle::At, sql).unwrap(),
            "update t set a = @p1 where b = @p2"
        );
    }

    #[test]
    fn rebind_after_expand() {
        let statement = Statement::new(
            "select name, age from demo_user where id in (?) and age > ?",
            args![Arg::list([21, 30, 22]), 18],
        )
        .unwrap();
        let sql = statement.rebind(BindStyle::Dollar).unwrap();
        assert_eq!(
            sql,
            "select name, age from demo_user where id in ($1,$2,$3) and age > $4"
        );
        assert_eq!(statement.args.len(), 4);
    }

    #[test]
    fn rebind_twice_is_noop() {
        for style in [
            BindStyle::Question,
            BindStyle::Dollar,
            BindStyle::Named,
            BindStyle::At,
        ] {
            let once = rebind(style, "select * from t where a = ? and b in (?,?)").unwrap();
            let twice = rebind(style, &once).unwrap();
            assert_eq!(once, twice, "Rebinding with {:?} twice changed the query", style);
        }
    }

    #[test]
    fn rebind_without_placeholders() {
        let sql = "select count(*) from t";
        assert_eq!(rebind(BindStyle::Dollar, sql).unwrap(), sql);
    }

    #[test]
    fn rebind_malformed() {
        assert_eq!(
            rebind(BindStyle::Dollar, "select * from t where a = ? and b = 'x"),
            Err(BindError::MalformedTemplate {
                offset: 36,
                reason: "unterminated string literal"
            })
        );
        assert!(matches!(
            rebind(BindStyle::Question, "select \"a from t where b = ?"),
            Err(BindError::MalformedTemplate { offset: 7, .. })
        ));
    }
}
