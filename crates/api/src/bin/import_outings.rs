//! One-shot CLI: import outing data from a tab-delimited field-report file.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trapline_api::import::outings;

/// Import outing data from a TSV file.
#[derive(Debug, Parser)]
#[command(name = "import-outings")]
struct Args {
    /// Path to the TSV file.
    tsv_file: PathBuf,
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

    let file = File::open(&args.tsv_file)?;
    let summary = outings::run(&pool, file).await?;

    tracing::info!(
        created_outings = summary.created_outings,
        created_issues = summary.created_issues,
        "Successfully imported outing data",
    );

    Ok(())
}
