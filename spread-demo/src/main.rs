//! Runs every user operation once against a SQLite database and prints what
//! comes back.
//!
//! ```bash
//! cargo run -p spread-demo
//! cargo run -p spread-demo -- --url sqlite://:memory: --ids 3,1,2
//! RUST_LOG=debug cargo run -p spread-demo -- --reset
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use spread::{
    Arg, Connection, Driver, Executor, User, create_table, delete, drop_table, find_after,
    find_by_ids, find_by_ids_ordered, find_by_name, find_one, insert, insert_many,
    insert_many_spread, insert_named, set_age_atomically, update_age,
};
use spread_sqlite::SqliteDriver;
use std::{collections::HashMap, env};

const SEED_USERS: i64 = 40;

#[derive(Parser, Debug)]
#[command(
    name = "spread-demo",
    about = "Walk through the Spread statement builder",
    long_about = "Create the demo_user table, seed it and run single row, named, transactional, batch insert and batch fetch operations on it"
)]
struct DemoArgs {
    /// Connection URL
    #[arg(
        long,
        env = "SPREAD_DATABASE_URL",
        default_value = "sqlite://spread-demo.sqlite?mode=rwc"
    )]
    url: String,

    /// Drop the demo table before running
    #[arg(long)]
    reset: bool,

    /// Ids fetched by the batch queries, in the order the ordered fetch must keep
    #[arg(long, value_delimiter = ',', default_values_t = [21, 30, 22, 32, 23, 33])]
    ids: Vec<i64>,
}

fn init_logs() {
    let mut logger = env_logger::builder();
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Info);
    }
    logger.init();
}

async fn seed<E: Executor>(executor: &mut E) -> Result<()> {
    if !find_after(executor, 0).await?.is_empty() {
        return Ok(());
    }
    let users = (1..=SEED_USERS)
        .map(|i| User::new(format!("user{}", i), 18 + (i % 30) as i32))
        .collect::<Vec<_>>();
    let inserted = insert_many(executor, &users).await?;
    log::info!("Seeded {} users", inserted);
    Ok(())
}

async fn run<C: Connection>(connection: &mut C, args: &DemoArgs) -> Result<()> {
    if args.reset {
        drop_table(connection, true).await?;
        log::info!("Dropped the demo_user table");
    }
    create_table(connection).await?;
    seed(connection).await?;

    // Single rows
    match find_one(connection, 1).await.context("find_one failed")? {
        Some(u) => println!("id:{:?} name:{} age:{}", u.id, u.name, u.age),
        None => println!("no user with id 1"),
    }
    let users = find_after(connection, 0).await.context("find_after failed")?;
    println!("users: {}", users.len());

    let id = insert(connection, "沙河小王子", 19)
        .await
        .context("insert failed")?;
    println!("the id:{}", id);
    let affected = update_age(connection, id, 29)
        .await
        .context("update_age failed")?;
    println!("update success, affected rows:{}", affected);
    let affected = delete(connection, id).await.context("delete failed")?;
    println!("delete success, affected rows:{}", affected);

    // Named parameters
    let map = HashMap::from([("name", Arg::from("沙河小王子")), ("age", Arg::from(28))]);
    let id = insert_named(connection, &map)
        .await
        .context("insert_named failed")?;
    println!("named insert success, the id:{}", id);
    for u in find_by_name(connection, &HashMap::from([("name", "沙河娜扎")]))
        .await
        .context("find_by_name with a map failed")?
    {
        println!("user:{:?}", u);
    }
    for u in find_by_name(connection, &User::new("沙河小王子", 0))
        .await
        .context("find_by_name with a record failed")?
    {
        println!("user:{:?}", u);
    }

    // Transaction
    match set_age_atomically(connection, &[21, 28], 2).await {
        Ok(()) => println!("commit"),
        Err(e) => println!("rollback, err:{:#}", e),
    }

    // Batch insert
    let affected = insert_many(
        connection,
        &[
            User::new("xx", 20),
            User::new("xxx", 20),
            User::new("xxxx", 20),
        ],
    )
    .await
    .context("insert_many failed")?;
    println!("batch insert success, affected rows:{}", affected);
    let affected = insert_many_spread(
        connection,
        &[
            User::new("spreadIn1", 21),
            User::new("spreadIn2", 21),
            User::new("spreadIn3", 21),
        ],
    )
    .await
    .context("insert_many_spread failed")?;
    println!("batch insert spread success, affected rows:{}", affected);

    // Batch fetch
    for u in find_by_ids(connection, &args.ids)
        .await
        .context("find_by_ids failed")?
    {
        println!("user:{:?}", u);
    }
    for u in find_by_ids_ordered(connection, &args.ids)
        .await
        .context("find_by_ids_ordered failed")?
    {
        println!("user:{:?}", u);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logs();
    let args = DemoArgs::parse();
    let mut connection = SqliteDriver::new()
        .connect(args.url.clone().into())
        .await
        .with_context(|| format!("Could not connect to `{}`", args.url))?;
    log::info!("Connected to {}", args.url);
    let result = run(&mut connection, &args).await;
    connection.disconnect().await?;
    result
}
