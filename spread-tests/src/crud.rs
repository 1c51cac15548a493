use spread::{Executor, User, create_table, delete, drop_table, find_after, find_one, insert, update_age};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn crud<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    drop_table(executor, true)
        .await
        .expect("Failed to drop the demo_user table");
    create_table(executor)
        .await
        .expect("Failed to create the demo_user table");

    // Insert
    let first = insert(executor, "沙河小王子", 19)
        .await
        .expect("Failed to insert the first user");
    let second = insert(executor, "沙河娜扎", 18)
        .await
        .expect("Failed to insert the second user");
    let third = insert(executor, "nazha", 26)
        .await
        .expect("Failed to insert the third user");
    assert!(first < second && second < third);

    // Single row
    let user = find_one(executor, first)
        .await
        .expect("Failed to query the first user")
        .expect("The first user should exist");
    assert_eq!(
        user,
        User {
            id: Some(first),
            name: "沙河小王子".into(),
            age: 19,
        }
    );
    assert_eq!(
        find_one(executor, third + 100)
            .await
            .expect("Failed to query a missing user"),
        None
    );

    // Multiple rows
    let users = find_after(executor, 0)
        .await
        .expect("Failed to query all the users");
    assert_eq!(users.len(), 3);
    let users = find_after(executor, first)
        .await
        .expect("Failed to query the users after the first");
    assert_eq!(
        users.iter().map(|u| u.id).collect::<Vec<_>>(),
        [Some(second), Some(third)]
    );

    // Update
    let affected = update_age(executor, third, 29)
        .await
        .expect("Failed to update the third user");
    assert_eq!(affected, 1);
    let user = find_one(executor, third)
        .await
        .expect("Failed to query the third user")
        .expect("The third user should exist");
    assert_eq!(user.age, 29);
    let affected = update_age(executor, third + 100, 29)
        .await
        .expect("Updating a missing user is not an error");
    assert_eq!(affected, 0);

    // Delete
    let affected = delete(executor, third)
        .await
        .expect("Failed to delete the third user");
    assert_eq!(affected, 1);
    let affected = delete(executor, third)
        .await
        .expect("Deleting twice is not an error");
    assert_eq!(affected, 0);
    assert_eq!(
        find_one(executor, third)
            .await
            .expect("Failed to query the deleted user"),
        None
    );
}
