//! # stockmark-core: Stock Enrichment and Markup for POS
//!
//! Pure business logic layered onto a POS host's product and sales records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockmark Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                POS Frontend (product cards)                     │   │
//! │  │        stock badge ──► add-to-cart warning ──► order           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ product payloads                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Host integration (session loader, recompute)         │   │
//! │  │     implements QuantityLookup / TagLookup / LocationResolver    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockmark-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │ enrichment │  │  markup   │  │   stock   │  │  loader  │  │   │
//! │  │   │ qty + tags │  │ line/order│  │  levels   │  │  fields  │  │   │
//! │  │   │ pipeline   │  │ template  │  │  warnings │  │          │  │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Host records (product, template, order, tag, POS config)
//! - [`money`] - Integer minor-unit money
//! - [`markup`] - Markup on cost for lines, orders and templates
//! - [`enrichment`] - Lookup traits and the stock/tag enrichment pipeline
//! - [`stock`] - Stock levels, badges and add-to-cart warnings
//! - [`loader`] - Loader field list augmentation
//! - [`validation`] - Setting validators
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same records in, same records out
//! 2. **Injected Lookups**: host data is reached only through traits passed in
//! 3. **Degrade, Don't Fail**: a failed lookup becomes 0 or `[]` for that row
//! 4. **Integer Money**: prices and costs are minor units, never floats
//!
//! ## Example Usage
//!
//! ```rust
//! use stockmark_core::markup::markup;
//! use stockmark_core::Money;
//!
//! let result = markup(Money::from_minor(100_000), Money::from_minor(150_000));
//! assert_eq!(result.percent, 50.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod enrichment;
pub mod error;
pub mod loader;
pub mod markup;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use enrichment::{
    enrich_products, EnrichmentPipeline, EnrichmentStage, LocationResolver, QuantityLookup,
    TagLookup,
};
pub use error::{CoreError, CoreResult, LookupError, LookupResult, ValidationError};
pub use markup::Markup;
pub use money::Money;
pub use stock::{StockBadge, StockDisplayConfig, StockLevel, StockThresholds, StockWarning};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantities above zero and below this are shown as low stock.
pub const DEFAULT_LOW_STOCK_BELOW: f64 = 10.0;

/// Quantities up to and including this are shown as medium stock.
pub const DEFAULT_MEDIUM_STOCK_MAX: f64 = 20.0;
