//! liftoff command-line tool.
//!
//! Runs a single fetch outside the server, or prints the query a set of
//! preferences would produce.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use liftoff_client::Fetcher;
use liftoff_core::{AppConfig, Preferences, SharedState, compose_query};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "liftoff-cli", version, about = "Fetch SpaceX news from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch articles once (with retries) and print them as JSON.
    Fetch {
        #[command(flatten)]
        filters: Filters,

        /// Print only the article count and fetch time.
        #[arg(long)]
        summary: bool,
    },
    /// Print the search query without contacting the API.
    Query {
        #[command(flatten)]
        filters: Filters,
    },
}

#[derive(Args, Debug, Default)]
struct Filters {
    /// Topic to OR into the query; repeat for several. "all" means no filter.
    #[arg(short, long = "topic", value_name = "TOPIC")]
    topics: Vec<String>,

    /// Extra term ANDed onto the query.
    #[arg(short, long = "search", value_name = "TERM")]
    search: Option<String>,
}

impl From<Filters> for Preferences {
    fn from(filters: Filters) -> Self {
        Preferences::new(filters.topics, filters.search)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("loading configuration")?;

    match cli.command {
        Command::Query { filters } => {
            println!("{}", compose_query(&config.base_query, &filters.into()));
        }
        Command::Fetch { filters, summary } => {
            let state = SharedState::new();
            let fetcher = Fetcher::from_app_config(&config, state.clone()).context("building news API client")?;

            fetcher.refresh(&filters.into()).await.map_err(liftoff_core::Error::from)?;

            if summary {
                println!("{}", serde_json::to_string_pretty(&state.status().await)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&state.articles().await)?);
            }
        }
    }

    Ok(())
}
