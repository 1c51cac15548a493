use spread::{Arg, BindError, Executor, User, create_table, drop_table, find_by_name, insert_named};
use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn named<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(executor, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(executor)
        .await
        .expect("Failed to create the demo_user table");

    // Insert from a map
    let map = HashMap::from([("name", Arg::from("沙河小王子")), ("age", Arg::from(28))]);
    let first = insert_named(executor, &map)
        .await
        .expect("Failed to insert from a map");

    // Insert from a record
    let record = User::new("沙河娜扎", 18);
    let second = insert_named(executor, &record)
        .await
        .expect("Failed to insert from a record");
    assert_ne!(first, second);

    // Query with a map
    let users = find_by_name(executor, &BTreeMap::from([("name", "沙河娜扎")]))
        .await
        .expect("Failed to query by name with a map");
    assert_eq!(
        users,
        [User {
            id: Some(second),
            name: "沙河娜扎".into(),
            age: 18,
        }]
    );

    // Query with a record, only the name is used
    let users = find_by_name(executor, &User::new("沙河小王子", 0))
        .await
        .expect("Failed to query by name with a record");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, Some(first));
    assert_eq!(users[0].age, 28);

    // Missing parameter
    let error = insert_named(executor, &HashMap::from([("name", "nobody")]))
        .await
        .expect_err("A missing named parameter must fail");
    assert_eq!(
        error.downcast_ref::<BindError>(),
        Some(&BindError::MissingNamedArg("age".into()))
    );
    let users = find_by_name(executor, &HashMap::from([("name", "nobody")]))
        .await
        .expect("Failed to query by name");
    assert!(users.is_empty());
}
