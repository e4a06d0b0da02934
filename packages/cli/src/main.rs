// Job-listing harvest CLI: scrape to CSV, or serve the scraper over HTTP.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use harvester::{export, Harvester, SiteProfile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod serve;

#[derive(Parser)]
#[command(name = "jobharvest")]
#[command(about = "Scrape paginated job-listing search results into CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every result page for a term and write a CSV file
    Scrape {
        /// Search term to query
        term: String,

        /// Output CSV path
        #[arg(long, default_value = "results.csv")]
        out: PathBuf,

        /// Override the search endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Serve the scraper over HTTP (GET /jobs.csv?term=...)
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Override the search endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,harvester=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            term,
            out,
            base_url,
        } => scrape(&term, &out, base_url).await,
        Commands::Serve { port, base_url } => serve::run(port, resolve_profile(base_url)?).await,
    }
}

async fn scrape(term: &str, out: &PathBuf, base_url: Option<String>) -> Result<()> {
    let harvester =
        Harvester::new(resolve_profile(base_url)?).context("Failed to build harvester")?;

    let postings = harvester
        .run(term)
        .await
        .with_context(|| format!("Harvest failed for term `{term}`"))?;

    export::save_to_csv(out, &postings, harvester.profile())
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!("Done, extracted {} postings to {}", postings.len(), out.display());
    Ok(())
}

/// Base URL resolution: flag, then JOBHARVEST_BASE_URL, then the default.
fn resolve_profile(flag: Option<String>) -> Result<SiteProfile> {
    let profile = match flag.or_else(|| env::var("JOBHARVEST_BASE_URL").ok()) {
        Some(base_url) => SiteProfile::default().with_base_url(base_url),
        None => SiteProfile::default(),
    };

    // Fail on an unusable base URL before any request goes out
    profile
        .search_url("probe", None)
        .context("Invalid base URL")?;

    Ok(profile)
}
