//! # Stock Display
//!
//! Rules the POS product card uses to show stock.
//!
//! ## Stock Levels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity        level     badge class     card text                   │
//! │  ─────────────   ───────   ─────────────   ─────────────               │
//! │  ≤ 0             Out       stock-out       "Habis"                     │
//! │  < 10            Low       stock-low       "Stok: 7"                   │
//! │  10 ..= 20       Medium    stock-medium    "Stok: 15"                  │
//! │  > 20            High      stock-high      "Stok: 42.5"                │
//! │                                                                         │
//! │  Thresholds come from `StockThresholds` (defaults shown).              │
//! │  Only storable products show a badge.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Add-to-Cart Warnings
//! Tapping a Low product with stock left, or an Out product, produces a
//! [`StockWarning`]. The product is still added to the order.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::ProductRecord;
use crate::validation::{validate_required, validate_thresholds};
use crate::{DEFAULT_LOW_STOCK_BELOW, DEFAULT_MEDIUM_STOCK_MAX};

// =============================================================================
// Stock Level
// =============================================================================

/// Stock level category for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Out,
    Low,
    Medium,
    High,
}

impl StockLevel {
    /// CSS class of the badge.
    pub const fn badge_class(&self) -> &'static str {
        match self {
            StockLevel::Out => "stock-out",
            StockLevel::Low => "stock-low",
            StockLevel::Medium => "stock-medium",
            StockLevel::High => "stock-high",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLevel::Out => write!(f, "out"),
            StockLevel::Low => write!(f, "low"),
            StockLevel::Medium => write!(f, "medium"),
            StockLevel::High => write!(f, "high"),
        }
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// Quantity boundaries between stock levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockThresholds {
    /// Quantities above zero and below this are Low.
    pub low_below: f64,
    /// Quantities from `low_below` up to and including this are Medium.
    pub medium_max: f64,
}

impl Default for StockThresholds {
    fn default() -> Self {
        StockThresholds {
            low_below: DEFAULT_LOW_STOCK_BELOW,
            medium_max: DEFAULT_MEDIUM_STOCK_MAX,
        }
    }
}

impl StockThresholds {
    /// Classifies a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use stockmark_core::stock::{StockLevel, StockThresholds};
    ///
    /// let t = StockThresholds::default();
    /// assert_eq!(t.classify(0.0), StockLevel::Out);
    /// assert_eq!(t.classify(9.5), StockLevel::Low);
    /// assert_eq!(t.classify(20.0), StockLevel::Medium);
    /// assert_eq!(t.classify(21.0), StockLevel::High);
    /// ```
    pub fn classify(&self, quantity: f64) -> StockLevel {
        if !quantity.is_finite() || quantity <= 0.0 {
            StockLevel::Out
        } else if quantity < self.low_below {
            StockLevel::Low
        } else if quantity <= self.medium_max {
            StockLevel::Medium
        } else {
            StockLevel::High
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Texts and timings for stock badges and warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockDisplayConfig {
    pub thresholds: StockThresholds,
    /// Badge text for products with nothing on hand.
    pub out_of_stock_label: String,
    /// Badge text prefix, rendered as `"<prefix>: <qty>"`.
    pub in_stock_prefix: String,
    pub low_stock_warning_ms: u32,
    pub out_of_stock_warning_ms: u32,
}

impl Default for StockDisplayConfig {
    fn default() -> Self {
        StockDisplayConfig {
            thresholds: StockThresholds::default(),
            out_of_stock_label: "Habis".to_string(),
            in_stock_prefix: "Stok".to_string(),
            low_stock_warning_ms: 3000,
            out_of_stock_warning_ms: 4000,
        }
    }
}

impl StockDisplayConfig {
    /// Checks thresholds and labels.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_thresholds(&self.thresholds)?;
        validate_required("out_of_stock_label", &self.out_of_stock_label)?;
        validate_required("in_stock_prefix", &self.in_stock_prefix)?;
        Ok(())
    }
}

// =============================================================================
// Product Rules
// =============================================================================

/// Quantity shown for a product.
///
/// Prefers the location-scoped quantity from enrichment, falls back to the
/// host-wide `qty_available`, then to 0.
pub fn stock_quantity(product: &ProductRecord) -> f64 {
    product
        .available_quantity
        .or(product.qty_available)
        .filter(|qty| qty.is_finite())
        .unwrap_or(0.0)
}

/// Only storable products show stock.
pub fn should_display_stock(product: &ProductRecord) -> bool {
    product.is_storable()
}

/// Badge text for a product, empty when stock is not displayed.
pub fn stock_display_text(product: &ProductRecord, config: &StockDisplayConfig) -> String {
    if !should_display_stock(product) {
        return String::new();
    }

    let rounded = (stock_quantity(product) * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        return config.out_of_stock_label.clone();
    }

    format!("{}: {}", config.in_stock_prefix, rounded)
}

/// Whether `requested` units can be taken from stock.
///
/// Consumables and services are always available.
pub fn has_sufficient_stock(product: &ProductRecord, requested: f64) -> bool {
    if !product.is_storable() {
        return true;
    }
    stock_quantity(product) >= requested
}

// =============================================================================
// Badge
// =============================================================================

/// Everything the product card needs to draw a stock badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockBadge {
    pub level: StockLevel,
    pub class: String,
    pub text: String,
}

impl StockBadge {
    /// Returns the badge for a storable product, `None` otherwise.
    pub fn for_product(product: &ProductRecord, config: &StockDisplayConfig) -> Option<Self> {
        if !should_display_stock(product) {
            return None;
        }

        let level = config.thresholds.classify(stock_quantity(product));
        Some(StockBadge {
            level,
            class: level.badge_class().to_string(),
            text: stock_display_text(product, config),
        })
    }
}

// =============================================================================
// Warnings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockWarningKind {
    LowStock,
    OutOfStock,
}

/// Notification shown when a product is added to the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockWarning {
    pub kind: StockWarningKind,
    pub message: String,
    pub duration_ms: u32,
}

/// Returns the warning for adding `product` to an order, if any.
///
/// ## Example
/// ```rust
/// use stockmark_core::stock::{stock_warning, StockDisplayConfig, StockWarningKind};
/// use stockmark_core::types::{ProductRecord, ProductType};
///
/// let mut product = ProductRecord::new(1, "Oli Mesin", ProductType::Storable, None);
/// product.available_quantity = Some(3.0);
///
/// let warning = stock_warning(&product, &StockDisplayConfig::default()).unwrap();
/// assert_eq!(warning.kind, StockWarningKind::LowStock);
/// assert_eq!(warning.message, "Peringatan: Stok Oli Mesin tinggal 3 unit");
/// ```
pub fn stock_warning(product: &ProductRecord, config: &StockDisplayConfig) -> Option<StockWarning> {
    if !should_display_stock(product) {
        return None;
    }

    let quantity = stock_quantity(product);
    match config.thresholds.classify(quantity) {
        StockLevel::Low if quantity > 0.0 => Some(StockWarning {
            kind: StockWarningKind::LowStock,
            message: format!(
                "Peringatan: Stok {} tinggal {} unit",
                product.display_name, quantity
            ),
            duration_ms: config.low_stock_warning_ms,
        }),
        StockLevel::Out => Some(StockWarning {
            kind: StockWarningKind::OutOfStock,
            message: format!("Peringatan: {} sedang habis stok", product.display_name),
            duration_ms: config.out_of_stock_warning_ms,
        }),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
