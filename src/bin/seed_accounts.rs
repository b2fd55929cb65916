//! Account Seeding Tool
//!
//! Run with: cargo run --bin seed_accounts --release -- --count 1000 --password secretpw

use std::sync::Arc;
use std::time::Instant;

use account_service::db;
use account_service::handlers::{CreateAccountCommand, CreateAccountHandler};
use account_service::store::{PgAccountStore, StoreError};

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let count: u64 = arg_value(&args, "--count")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    let prefix = arg_value(&args, "--prefix").unwrap_or("seed");
    let password = arg_value(&args, "--password").unwrap_or("password123");

    let database_url = std::env::var("DATABASE_URL")?;

    println!("Seeding {} accounts with prefix '{}'", count, prefix);
    println!("Connecting to database...");

    let pool = db::connect(&database_url, 10, 1).await?;
    db::run_migrations(&pool).await?;

    let handler = CreateAccountHandler::new(Arc::new(PgAccountStore::new(pool.clone())));

    let start = Instant::now();
    let mut created = 0u64;
    let mut skipped = 0u64;

    for i in 0..count {
        let command = CreateAccountCommand::new(format!("{}_{:06}", prefix, i), password.to_string());

        match handler.execute(command).await {
            Ok(()) => created += 1,
            Err(StoreError::DuplicateUsername(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }

        if (i + 1) % 1000 == 0 {
            println!("Processed {} accounts...", i + 1);
        }
    }

    let elapsed = start.elapsed();
    let rate = created as f64 / elapsed.as_secs_f64();

    println!("\n=== Seed Results ===");
    println!("Requested: {}", count);
    println!("Created: {}", created);
    println!("Already present: {}", skipped);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} accounts/sec", rate);

    pool.close().await;
    Ok(())
}
