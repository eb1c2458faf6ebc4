mod cli;
mod config;
mod db;
mod error;
mod export;
mod review;
mod state;
mod storage;
mod templates;

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use crate::db::{DateRange, MySqlStore};
use crate::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ojs_review_export=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(0) => {
            println!("No reviews found.");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> Result<usize> {
    let mut config = config::Config::from_env()?;
    if let Some(path) = &cli.path {
        config.output_dir = path.clone();
    }

    let range = cli.date_range();
    if range == DateRange::LastDay && (cli.from.is_some() || cli.to.is_some()) {
        tracing::warn!("Both -f and -t are needed for a date range; exporting the last day instead");
    }

    let pool = db::create_pool(&config.database).await?;
    let state = state::AppState {
        store: MySqlStore::new(pool),
        config: Arc::new(config),
    };

    let result = export::run(&state, range).await;
    state.store.close().await;
    let summary = result?;

    if summary.reviews > 0 {
        println!(
            "Exported {} reviews to {} directory.",
            summary.reviews,
            state.config.output_dir.display()
        );
        tracing::info!("Copied {} attachments", summary.attachments);
    }

    Ok(summary.reviews)
}
