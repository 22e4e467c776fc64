//! # stockmark
//!
//! Runs stock enrichment and markup over a host snapshot and prints JSON.
//!
//! ```text
//! stockmark enrich --snapshot host.json
//! stockmark markup --snapshot host.json
//! stockmark fields id display_name lst_price
//! ```
//!
//! Logs go to stderr so stdout stays machine readable.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockmark_cli::{enrich_report, markup_report, HostSnapshot, StockmarkConfig};
use stockmark_core::loader::augment_product_fields;

#[derive(Parser, Debug)]
#[command(name = "stockmark", version, about = "POS stock enrichment and markup")]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich the snapshot's products with stock and tags.
    Enrich {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Recompute markup for the snapshot's templates and orders.
    Markup {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Print a loader field list with the stock fields added.
    Fields {
        fields: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = StockmarkConfig::load(cli.config.clone()).context("failed to load configuration")?;
    init_tracing(&config.logging.filter);
    info!(config = ?cli.config, "Configuration loaded");

    match cli.command {
        Command::Enrich { snapshot } => {
            let host = HostSnapshot::load(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            let report = enrich_report(&host, &config.display_config());
            info!(
                products = report.products.len(),
                location_id = ?report.location_id,
                "Enrichment complete"
            );
            print_json(&report)
        }
        Command::Markup { snapshot } => {
            let host = HostSnapshot::load(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            print_json(&markup_report(host))
        }
        Command::Fields { fields } => print_json(&augment_product_fields(fields)),
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", json);
    Ok(())
}
