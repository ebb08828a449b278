//! Syllabus admin CLI
//!
//! Loads a content section's category tree from the admin API and prints it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use syllabus_kernel::cli::{self, OutputFormat};
use syllabus_kernel::client::ApiClient;
use syllabus_kernel::config::Config;
use syllabus_kernel::loader::TreeLoader;
use syllabus_kernel::models::{ContentSection, CurrentAffairKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category → subcategory → item tree of a section.
    Tree {
        /// Section slug or API tag (e.g., `e-book`, `DAILY_QUIZ`).
        section: ContentSection,

        #[arg(long, value_enum, default_value_t = OutputFormat::Outline)]
        format: OutputFormat,

        /// Show categories that have no items.
        #[arg(long, conflicts_with = "prune_empty")]
        keep_empty: bool,

        /// Hide categories that have no items.
        #[arg(long)]
        prune_empty: bool,

        /// Only list items with a text field containing this string.
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete one item of a section.
    Delete {
        section: ContentSection,
        id: String,

        /// Current affairs kind (e.g., `sports`); required for current affairs.
        #[arg(long)]
        kind: Option<CurrentAffairKind>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(api_url = %config.api_url, "Configuration loaded");

    let client = ApiClient::new(&config).context("failed to create API client")?;
    let loader = TreeLoader::new(client);

    match args.command {
        Command::Tree {
            section,
            format,
            keep_empty,
            prune_empty,
            search,
        } => {
            let retain_empty = match (keep_empty, prune_empty) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cli::cmd_tree(&loader, section, format, retain_empty, search.as_deref()).await
        }
        Command::Delete { section, id, kind } => cli::cmd_delete(&loader, section, &id, kind).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,syllabus_kernel=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
