//! One-shot CLI: import baitout issue reports from a pipe-delimited file.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trapline_api::import::baitout::{self, BaitoutImportOptions};

/// Import issue data from a baitout CSV file.
#[derive(Debug, Parser)]
#[command(name = "import-baitout")]
struct Args {
    /// Persist created issues (otherwise dry-run).
    #[arg(long)]
    commit: bool,

    /// Cap on the number of created issues (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Origin tag stamped on every created issue.
    tag: String,

    /// Path to the pipe-delimited CSV file.
    csv_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = trapline_db::create_pool(&database_url).await?;

    let opts = BaitoutImportOptions {
        commit: args.commit,
        limit: args.limit,
        tag: args.tag,
    };

    let file = File::open(&args.csv_file)?;
    let summary = baitout::run(&pool, file, &opts).await?;

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        commit = args.commit,
        "Successfully imported baitout data",
    );

    Ok(())
}
