//! # stockmark-cli
//!
//! Reference host for stockmark-core.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stockmark.toml + STOCKMARK_* ──► StockmarkConfig ──► StockDisplayConfig│
//! │                                                                         │
//! │  snapshot.json ──► HostSnapshot ──► QuantityLookup / TagLookup          │
//! │                         │            LocationResolver                  │
//! │                         ▼                                               │
//! │              EnrichmentPipeline / markup ──► JSON on stdout             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod snapshot;

pub use config::StockmarkConfig;
pub use error::{CliError, CliResult};
pub use snapshot::{enrich_report, markup_report, HostSnapshot};
