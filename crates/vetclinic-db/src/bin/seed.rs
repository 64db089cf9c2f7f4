//! # Database Seeding Tool
//!
//! Creates (or opens) the clinic database, runs migrations, and populates
//! the default accounts and starting catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p vetclinic-db --bin seed
//!
//! # Specify the database path
//! cargo run -p vetclinic-db --bin seed -- --db ./data/vetclinic.db
//!
//! # Force a catalog reset (clears and repopulates the inventory)
//! cargo run -p vetclinic-db --bin seed -- --reset
//! ```

use std::env;

use tracing::{error, info};
use vetclinic_db::{seed, Database, DbConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = "vetclinic.db".to_string();
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" => {
                if let Some(path) = args.get(i + 1) {
                    db_path = path.clone();
                    i += 1;
                }
            }
            "--reset" => reset = true,
            other => {
                error!(argument = other, "Unknown argument");
                eprintln!("Usage: seed [--db <path>] [--reset]");
                std::process::exit(2);
            }
        }
        i += 1;
    }

    if let Err(e) = run(&db_path, reset).await {
        error!(error = %e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn run(db_path: &str, reset: bool) -> vetclinic_db::DbResult<()> {
    info!(path = db_path, "Opening database");
    let db = Database::new(DbConfig::new(db_path)).await?;

    let accounts = seed::seed_default_accounts(db.pool()).await?;
    let items = if reset {
        seed::reset_catalog(db.pool()).await?
    } else {
        seed::seed_catalog(db.pool()).await?
    };

    info!(
        accounts_inserted = accounts,
        items_inserted = items,
        total_items = db.inventory().count().await?,
        "Seeding complete"
    );

    db.close().await;
    Ok(())
}
