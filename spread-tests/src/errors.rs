use spread::{
    Arg, BindError, Executor, Statement, User, args, create_table, drop_table, find_after,
    find_by_ids, insert,
};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn builder_errors<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(executor, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(executor)
        .await
        .expect("Failed to create the demo_user table");
    insert(executor, "only", 1)
        .await
        .expect("Failed to insert the user");

    // Empty list
    let error = find_by_ids(executor, &[])
        .await
        .expect_err("An empty id list must fail");
    assert_eq!(
        error.downcast_ref::<BindError>(),
        Some(&BindError::EmptyList { position: 0 })
    );

    // Arity
    assert_eq!(
        Statement::new(
            "delete from demo_user where name = ? or id in (?)",
            args!["only"]
        ),
        Err(BindError::ArityMismatch {
            expected: 2,
            given: 1
        })
    );
    assert!(
        Statement::new(
            "delete from demo_user where id in (?)",
            [Arg::List(vec![])]
        )
        .is_err()
    );

    // A statement whose arguments do not match the placeholders is refused before running
    let statement = Statement {
        sql: "delete from demo_user where id = ?".into(),
        args: Vec::new(),
    };
    crate::silent_logs! {
        assert!(executor.execute_statement(statement).await.is_err());
    }

    // Nothing was sent
    let users = find_after(executor, 0)
        .await
        .expect("Failed to query the users");
    assert_eq!(users, [User { id: users[0].id, ..User::new("only", 1) }]);
}
