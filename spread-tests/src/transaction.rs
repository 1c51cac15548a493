use spread::{
    Connection, create_table, drop_table, find_after, find_one, insert, set_age_atomically,
};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn transaction<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(connection, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(connection)
        .await
        .expect("Failed to create the demo_user table");
    let first = insert(connection, "first", 10)
        .await
        .expect("Failed to insert the first user");
    let second = insert(connection, "second", 20)
        .await
        .expect("Failed to insert the second user");

    // Commit
    set_age_atomically(connection, &[first, second], 2)
        .await
        .expect("Failed to update the ages");
    let users = find_after(connection, 0)
        .await
        .expect("Failed to query the users");
    assert!(users.iter().all(|u| u.age == 2));

    // Rollback, the second id does not exist
    crate::silent_logs! {
        let error = set_age_atomically(connection, &[first, second + 100], 40)
            .await
            .expect_err("Updating a missing user must fail");
        assert!(error.to_string().contains("affected 0 rows"));
    }
    let user = find_one(connection, first)
        .await
        .expect("Failed to query the first user")
        .expect("The first user should exist");
    assert_eq!(user.age, 2, "The first update must have been rolled back");

    // The connection is usable after the rollback
    set_age_atomically(connection, &[second], 3)
        .await
        .expect("Failed to update the age after a rollback");
    let user = find_one(connection, second)
        .await
        .expect("Failed to query the second user")
        .expect("The second user should exist");
    assert_eq!(user.age, 3);
}
