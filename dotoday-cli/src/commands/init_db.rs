//! Create the database file and apply the schema without serving.

use anyhow::{Context, Result};
use clap::Parser;

use dotoday_server::db::{create_pool, migrations};

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let database_url = args.db.resolve_url();

    let pool = create_pool(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;
    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;
    pool.close().await;

    tracing::info!(database = %database_url, "Database ready");
    println!("Initialized {database_url}");
    Ok(())
}
