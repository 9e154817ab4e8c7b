//! amz-dashboard - Terminal dashboard for the Amazon catalog and bestsellers API

use amz_dashboard::catalog::{SortField, SortOrder};
use amz_dashboard::commands::{
    AssumeYes, BestsellersCommand, CatalogCommand, DashboardCommand, RefreshCommand, RefreshPrompt,
    TerminalPrompt,
};
use amz_dashboard::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-dashboard",
    version,
    about = "Terminal dashboard for the Amazon catalog and bestsellers API",
    long_about = "Browse the scraped product catalog and daily bestsellers, and trigger a fresh scrape."
)]
struct Cli {
    /// Backend base URL
    #[arg(short, long, global = true, env = "AMZ_DASHBOARD_URL")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "AMZ_DASHBOARD_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Sort by: price, rating, rank
    #[arg(short, long)]
    sort: Option<SortField>,

    /// Sort order: asc, desc
    #[arg(short, long)]
    order: Option<SortOrder>,

    /// Minimum rating, filtered by the server
    #[arg(long)]
    min_rating: Option<f32>,

    /// Maximum price, filtered by the server
    #[arg(long)]
    max_price: Option<f64>,
}

impl CatalogArgs {
    fn apply(self, config: &mut Config) {
        if let Some(sort) = self.sort {
            config.sort_field = sort;
        }
        if let Some(order) = self.order {
            config.sort_order = order;
        }
        if self.min_rating.is_some() {
            config.min_rating = self.min_rating;
        }
        if self.max_price.is_some() {
            config.max_price = self.max_price;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show both sections, as on page load
    #[command(alias = "d")]
    Dashboard {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Bestseller category to show
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the sorted product catalog
    #[command(alias = "c")]
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Show bestseller categories, or one category's products
    #[command(alias = "b")]
    Bestsellers {
        /// Category to show
        category: Option<String>,
    },

    /// Show when bestsellers were last updated
    Status,

    /// Re-run the bestseller scraper on the backend
    Refresh {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let output = match cli.command {
        Commands::Dashboard { catalog, category } => {
            catalog.apply(&mut config);
            DashboardCommand::new(config).execute(category.as_deref()).await?
        }

        Commands::Catalog { catalog } => {
            catalog.apply(&mut config);
            CatalogCommand::new(config).execute().await?
        }

        Commands::Bestsellers { category } => {
            BestsellersCommand::new(config).execute(category.as_deref()).await?
        }

        Commands::Status => BestsellersCommand::new(config).status().await?,

        Commands::Refresh { yes } => {
            let prompt: &dyn RefreshPrompt = if yes { &AssumeYes } else { &TerminalPrompt };
            RefreshCommand::new(config).execute(prompt).await?
        }
    };

    println!("{}", output);

    Ok(())
}
