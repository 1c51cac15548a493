use spread::{
    AsValue, Executor, Statement, User, create_table, drop_table, find_after, find_by_ids,
    find_by_ids_ordered, insert_many, insert_many_spread,
};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn batch_insert<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(executor, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(executor)
        .await
        .expect("Failed to create the demo_user table");

    // Explicit groups
    let users = [
        User::new("xx", 20),
        User::new("xxx", 20),
        User::new("xxxx", 20),
    ];
    let affected = insert_many(executor, &users)
        .await
        .expect("Failed to insert many users");
    assert_eq!(affected, 3);

    // Records spread into groups
    let users = [
        User::new("spreadIn1", 21),
        User::new("spreadIn2", 21),
        User::new("spreadIn3", 21),
    ];
    let affected = insert_many_spread(executor, &users)
        .await
        .expect("Failed to insert many spread users");
    assert_eq!(affected, 3);

    let users = find_after(executor, 0)
        .await
        .expect("Failed to query the users");
    assert_eq!(
        users
            .iter()
            .map(|u| (u.name.as_str(), u.age))
            .collect::<Vec<_>>(),
        [
            ("xx", 20),
            ("xxx", 20),
            ("xxxx", 20),
            ("spreadIn1", 21),
            ("spreadIn2", 21),
            ("spreadIn3", 21),
        ]
    );

    // Nothing to insert
    assert!(insert_many(executor, &[]).await.is_err());
    assert!(insert_many_spread(executor, &[]).await.is_err());
}

pub async fn fetch_by_ids<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(executor, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(executor)
        .await
        .expect("Failed to create the demo_user table");
    let statement = Statement::insert_rows(
        "insert into demo_user (id, name, age)",
        (21..=33i64).map(|id| [id.as_value(), format!("user{}", id).as_value(), (id as i32).as_value()]),
    )
    .expect("Failed to build the insert");
    let affected = executor
        .execute_statement(statement)
        .await
        .expect("Failed to insert the users");
    assert_eq!(affected.rows_affected, 13);

    let ids = [21, 30, 22, 32, 23, 33];

    // Any order
    let mut found = find_by_ids(executor, &ids)
        .await
        .expect("Failed to query by ids")
        .into_iter()
        .map(|u| u.id.expect("Selected users have an id"))
        .collect::<Vec<_>>();
    found.sort();
    assert_eq!(found, [21, 22, 23, 30, 32, 33]);

    // Same order as the ids
    let users = find_by_ids_ordered(executor, &ids)
        .await
        .expect("Failed to query by ids in order");
    assert_eq!(
        users.iter().map(|u| u.id).collect::<Vec<_>>(),
        ids.map(Some)
    );
    assert_eq!(users[1].name, "user30");
    assert_eq!(users[1].age, 30);

    // Missing ids are skipped, order kept
    let users = find_by_ids_ordered(executor, &[33, 99, 21])
        .await
        .expect("Failed to query by ids in order");
    assert_eq!(
        users.iter().map(|u| u.id).collect::<Vec<_>>(),
        [Some(33), Some(21)]
    );

    // Single id
    let users = find_by_ids_ordered(executor, &[25])
        .await
        .expect("Failed to query a single id");
    assert_eq!(users.len(), 1);
}
