//! # Domain Types
//!
//! Plain records exchanged with the POS host.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  many:1  ┌─────────────────┐  1:many  ┌─────────┐ │
//! │  │ ProductRecord   │ ───────► │ TemplateRecord  │ ───────► │ TagRecord│ │
//! │  │  type           │          │  list_price     │          │  name   │ │
//! │  │  pos_qty_avail. │          │  standard_price │          │  color  │ │
//! │  │  tag_ids        │          │  margin_percent │          └─────────┘ │
//! │  └─────────────────┘          └─────────────────┘                      │
//! │                                                                         │
//! │  ┌─────────────────┐  1:many  ┌─────────────────┐                      │
//! │  │  OrderRecord    │ ───────► │ OrderLineRecord │                      │
//! │  │  margin         │          │  price_unit     │                      │
//! │  │  margin_percent │          │  purchase_price │                      │
//! │  └─────────────────┘          │  margin(_pct)   │                      │
//! │                               └─────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records live for one call. The host owns them; this crate only fills in
//! derived fields.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Host record identifier.
pub type RecordId = i64;

// =============================================================================
// Product Type
// =============================================================================

/// Inventory behavior of a product, using the host's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductType {
    /// Tracked in stock; the only type with an on-hand quantity.
    #[serde(rename = "product")]
    Storable,
    /// Consumed without stock tracking.
    #[serde(rename = "consu")]
    Consumable,
    /// Not a physical good.
    #[serde(rename = "service")]
    Service,
}

impl ProductType {
    /// Returns true for stock-tracked products.
    #[inline]
    pub const fn is_storable(&self) -> bool {
        matches!(self, ProductType::Storable)
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Consumable
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product row as loaded into a POS session.
///
/// `available_quantity` and `tag_ids` are `None` until enrichment runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    pub id: RecordId,

    /// Name shown on the product card and in stock warnings.
    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "type")]
    pub product_type: ProductType,

    /// Owning template, used for tag lookup.
    #[serde(default)]
    pub template_id: Option<RecordId>,

    /// Host-wide on-hand quantity (all locations), when the loader sent it.
    #[serde(default)]
    pub qty_available: Option<f64>,

    /// On-hand quantity at the POS stock location.
    #[serde(default, rename = "pos_qty_available")]
    pub available_quantity: Option<f64>,

    /// Tags of the owning template.
    #[serde(default)]
    pub tag_ids: Option<Vec<RecordId>>,
}

impl ProductRecord {
    /// Creates an un-enriched product row.
    pub fn new(
        id: RecordId,
        display_name: impl Into<String>,
        product_type: ProductType,
        template_id: Option<RecordId>,
    ) -> Self {
        ProductRecord {
            id,
            display_name: display_name.into(),
            product_type,
            template_id,
            qty_available: None,
            available_quantity: None,
            tag_ids: None,
        }
    }

    /// Returns true for stock-tracked products.
    #[inline]
    pub fn is_storable(&self) -> bool {
        self.product_type.is_storable()
    }
}

// =============================================================================
// Product Template
// =============================================================================

/// A product template carrying the sales price and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    /// Sales price.
    pub list_price: Money,
    /// Cost.
    pub standard_price: Money,
    /// Markup on cost, derived.
    #[serde(default)]
    pub margin_percent: f64,
}

impl TemplateRecord {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        list_price: Money,
        standard_price: Money,
    ) -> Self {
        TemplateRecord {
            id,
            name: name.into(),
            list_price,
            standard_price,
            margin_percent: 0.0,
        }
    }
}

// =============================================================================
// Tag
// =============================================================================

/// A label attached to a product template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TagRecord {
    pub id: RecordId,
    pub name: String,
    /// Host color index.
    #[serde(default)]
    pub color: i32,
    pub template_id: RecordId,
}

// =============================================================================
// Sales Order Line
// =============================================================================

/// A sales order line.
///
/// Uses the snapshot pattern: `product_standard_price` is the referenced
/// product's cost as the host read it when the line was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineRecord {
    pub id: RecordId,
    #[serde(default)]
    pub product_id: Option<RecordId>,
    /// Unit sales price.
    pub price_unit: Money,
    /// Cost override entered on the line.
    #[serde(default)]
    pub purchase_price: Option<Money>,
    /// Cost of the referenced product (frozen).
    #[serde(default)]
    pub product_standard_price: Option<Money>,
    /// Ordered quantity in the line's unit of measure.
    #[serde(rename = "product_uom_qty")]
    pub quantity: f64,
    /// Margin amount, derived.
    #[serde(default)]
    pub margin: Money,
    /// Markup on cost, derived.
    #[serde(default)]
    pub margin_percent: f64,
}

impl OrderLineRecord {
    /// Creates a line with no cost override and no derived values.
    pub fn new(id: RecordId, price_unit: Money, quantity: f64) -> Self {
        OrderLineRecord {
            id,
            product_id: None,
            price_unit,
            purchase_price: None,
            product_standard_price: None,
            quantity,
            margin: Money::zero(),
            margin_percent: 0.0,
        }
    }

    /// Sets the referenced product and its cost snapshot.
    pub fn with_product(mut self, product_id: RecordId, standard_price: Money) -> Self {
        self.product_id = Some(product_id);
        self.product_standard_price = Some(standard_price);
        self
    }

    /// Sets the line's cost override.
    pub fn with_purchase_price(mut self, purchase_price: Money) -> Self {
        self.purchase_price = Some(purchase_price);
        self
    }
}

// =============================================================================
// Sales Order
// =============================================================================

/// A sales order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lines: Vec<OrderLineRecord>,
    /// Total margin amount, derived.
    #[serde(default)]
    pub margin: Money,
    /// Total markup on cost, derived.
    #[serde(default)]
    pub margin_percent: f64,
}

impl OrderRecord {
    pub fn new(id: RecordId, name: impl Into<String>, lines: Vec<OrderLineRecord>) -> Self {
        OrderRecord {
            id,
            name: name.into(),
            lines,
            margin: Money::zero(),
            margin_percent: 0.0,
        }
    }
}

// =============================================================================
// POS Configuration
// =============================================================================

/// Operation type a POS uses to pick goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PickingType {
    pub id: RecordId,
    /// Location stock is taken from.
    #[serde(default)]
    pub default_location_src_id: Option<RecordId>,
}

/// The slice of a POS configuration that matters for stock lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PosConfig {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picking_type: Option<PickingType>,
}

impl PosConfig {
    /// Returns the location the POS sells from, if configured.
    pub fn source_location(&self) -> Option<RecordId> {
        self.picking_type
            .as_ref()
            .and_then(|picking| picking.default_location_src_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
