//! # Host Snapshot
//!
//! A JSON dump of the host records the core needs, standing in for the
//! POS host's database.
//!
//! ## Format
//! ```json
//! {
//!   "pos_config": { "id": 1, "picking_type": { "id": 3, "default_location_src_id": 8 } },
//!   "products": [ { "id": 1, "display_name": "Oli", "type": "product", "template_id": 10 } ],
//!   "quantities": [ { "product_id": 1, "location_id": 8, "quantity": 7.0 } ],
//!   "tags": [ { "id": 100, "name": "Promo", "template_id": 10 } ],
//!   "templates": [],
//!   "orders": [],
//!   "unavailable_products": [],
//!   "tags_unavailable": false
//! }
//! ```
//!
//! `unavailable_products` and `tags_unavailable` simulate host lookups that
//! fail, so the degraded paths can be driven from a file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

use stockmark_core::markup::{compute_order_margin, compute_template_margin};
use stockmark_core::stock::{stock_warning, StockBadge, StockDisplayConfig, StockWarning};
use stockmark_core::{
    EnrichmentPipeline, LocationResolver, LookupError, LookupResult, OrderRecord, PosConfig,
    ProductRecord, QuantityLookup, RecordId, TagLookup, TagRecord, TemplateRecord,
};

use crate::error::{CliError, CliResult};

/// On-hand quantity of one product at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityEntry {
    pub product_id: RecordId,
    pub location_id: RecordId,
    pub quantity: f64,
}

/// Host records loaded from a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default)]
    pub pos_config: Option<PosConfig>,
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub quantities: Vec<QuantityEntry>,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub templates: Vec<TemplateRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    /// Products whose quantity lookup fails.
    #[serde(default)]
    pub unavailable_products: Vec<RecordId>,
    /// Makes every tag lookup fail.
    #[serde(default)]
    pub tags_unavailable: bool,
}

impl HostSnapshot {
    /// Reads a snapshot file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let snapshot = Self::from_json(&contents)?;
        info!(
            ?path,
            products = snapshot.products.len(),
            templates = snapshot.templates.len(),
            orders = snapshot.orders.len(),
            "Loaded host snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json(contents: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

// =============================================================================
// Host Lookups
// =============================================================================

impl QuantityLookup for HostSnapshot {
    fn quantity_at_location(
        &self,
        product_id: RecordId,
        location_id: RecordId,
    ) -> LookupResult<f64> {
        if self.unavailable_products.contains(&product_id) {
            return Err(LookupError::Unavailable(format!(
                "stock for product {} is unavailable",
                product_id
            )));
        }

        let mut matching = self
            .quantities
            .iter()
            .filter(|entry| entry.product_id == product_id && entry.location_id == location_id)
            .peekable();

        if matching.peek().is_none() {
            // The host reports nothing on hand for an unknown pair.
            debug!(product_id, location_id, "No quantity entry, treating as 0");
            return Ok(0.0);
        }

        Ok(matching.map(|entry| entry.quantity).sum())
    }
}

impl TagLookup for HostSnapshot {
    fn tags_for_templates(
        &self,
        template_ids: &BTreeSet<RecordId>,
    ) -> LookupResult<HashMap<RecordId, Vec<RecordId>>> {
        if self.tags_unavailable {
            return Err(LookupError::Unavailable("tag store is unavailable".to_string()));
        }

        let mut mapping: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
        for tag in &self.tags {
            if template_ids.contains(&tag.template_id) {
                mapping.entry(tag.template_id).or_default().push(tag.id);
            }
        }
        Ok(mapping)
    }
}

impl LocationResolver for HostSnapshot {
    fn resolve_pos_location(&self) -> Option<RecordId> {
        self.pos_config
            .as_ref()
            .and_then(|config| config.resolve_pos_location())
    }
}

// =============================================================================
// Reports
// =============================================================================

/// An enriched product with what the product card shows for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub badge: Option<StockBadge>,
    pub warning: Option<StockWarning>,
}

/// Output of `stockmark enrich`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichReport {
    pub location_id: Option<RecordId>,
    pub products: Vec<ProductView>,
}

/// Output of `stockmark markup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkupReport {
    pub templates: Vec<TemplateRecord>,
    pub orders: Vec<OrderRecord>,
}

/// Enriches the snapshot's products at the POS stock location.
pub fn enrich_report(snapshot: &HostSnapshot, display: &StockDisplayConfig) -> EnrichReport {
    let location_id = snapshot.resolve_pos_location();
    let products = EnrichmentPipeline::standard(snapshot, snapshot)
        .run(location_id, snapshot.products.clone());

    let products = products
        .into_iter()
        .map(|product| ProductView {
            badge: StockBadge::for_product(&product, display),
            warning: stock_warning(&product, display),
            product,
        })
        .collect();

    EnrichReport {
        location_id,
        products,
    }
}

/// Recomputes markup for every template and order in the snapshot.
pub fn markup_report(snapshot: HostSnapshot) -> MarkupReport {
    let HostSnapshot {
        mut templates,
        mut orders,
        ..
    } = snapshot;

    templates.iter_mut().for_each(compute_template_margin);
    orders.iter_mut().for_each(compute_order_margin);

    MarkupReport { templates, orders }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stockmark_core::stock::{StockLevel, StockWarningKind};
    use stockmark_core::Money;

    const SNAPSHOT: &str = r#"{
        "pos_config": {
            "id": 1,
            "name": "Kasir 1",
            "picking_type": { "id": 3, "default_location_src_id": 8 }
        },
        "products": [
            { "id": 1, "display_name": "Oli Mesin", "type": "product", "template_id": 10 },
            { "id": 2, "display_name": "Busi", "type": "product", "template_id": 20 },
            { "id": 3, "display_name": "Servis", "type": "service", "template_id": 30 },
            { "id": 4, "display_name": "Kampas Rem", "type": "product", "template_id": 40 }
        ],
        "quantities": [
            { "product_id": 1, "location_id": 8, "quantity": 7.0 },
            { "product_id": 1, "location_id": 9, "quantity": 50.0 },
            { "product_id": 4, "location_id": 8, "quantity": 35.0 }
        ],
        "tags": [
            { "id": 100, "name": "Promo", "template_id": 10 },
            { "id": 101, "name": "Baru", "color": 3, "template_id": 10 },
            { "id": 300, "name": "Jasa", "template_id": 30 }
        ],
        "templates": [
            { "id": 10, "name": "Oli Mesin", "list_price": 150000, "standard_price": 100000 }
        ],
        "orders": [
            {
                "id": 5,
                "name": "S00005",
                "lines": [
                    { "id": 1, "price_unit": 150, "purchase_price": 100, "product_uom_qty": 2.0 },
                    {
                        "id": 2,
                        "price_unit": 250,
                        "product_standard_price": 200,
                        "product_uom_qty": 1.0
                    }
                ]
            }
        ],
        "unavailable_products": [4]
    }"#;

    fn snapshot() -> HostSnapshot {
        HostSnapshot::from_json(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_optional_keys_default() {
        let snapshot = HostSnapshot::from_json(r#"{ "products": [] }"#).unwrap();
        assert!(snapshot.pos_config.is_none());
        assert!(snapshot.quantities.is_empty());
        assert!(!snapshot.tags_unavailable);
        assert_eq!(snapshot.resolve_pos_location(), None);
    }

    #[test]
    fn test_products_are_required() {
        assert!(matches!(
            HostSnapshot::from_json("{}"),
            Err(CliError::SnapshotParse(_))
        ));
    }

    #[test]
    fn test_quantity_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.quantity_at_location(1, 8), Ok(7.0));
        assert_eq!(snapshot.quantity_at_location(1, 9), Ok(50.0));
        assert_eq!(snapshot.quantity_at_location(2, 8), Ok(0.0));
        assert!(matches!(
            snapshot.quantity_at_location(4, 8),
            Err(LookupError::Unavailable(_))
        ));
    }

    #[test]
    fn test_tag_lookup() {
        let mut snapshot = snapshot();
        let ids: BTreeSet<RecordId> = [10, 20].into_iter().collect();

        let mapping = snapshot.tags_for_templates(&ids).unwrap();
        assert_eq!(mapping.get(&10), Some(&vec![100, 101]));
        assert!(!mapping.contains_key(&20));
        assert!(!mapping.contains_key(&30));

        snapshot.tags_unavailable = true;
        assert!(snapshot.tags_for_templates(&ids).is_err());
    }

    #[test]
    fn test_enrich_report() {
        let report = enrich_report(&snapshot(), &StockDisplayConfig::default());
        assert_eq!(report.location_id, Some(8));

        let oil = &report.products[0];
        assert_eq!(oil.product.available_quantity, Some(7.0));
        assert_eq!(oil.product.tag_ids, Some(vec![100, 101]));
        let badge = oil.badge.as_ref().unwrap();
        assert_eq!(badge.level, StockLevel::Low);
        assert_eq!(badge.text, "Stok: 7");
        assert_eq!(oil.warning.as_ref().unwrap().kind, StockWarningKind::LowStock);

        let plug = &report.products[1];
        assert_eq!(plug.product.available_quantity, Some(0.0));
        assert_eq!(plug.product.tag_ids, Some(vec![]));
        assert_eq!(plug.badge.as_ref().unwrap().text, "Habis");
        assert_eq!(plug.warning.as_ref().unwrap().kind, StockWarningKind::OutOfStock);

        let service = &report.products[2];
        assert_eq!(service.product.available_quantity, Some(0.0));
        assert_eq!(service.product.tag_ids, Some(vec![]));
        assert!(service.badge.is_none());
        assert!(service.warning.is_none());

        // Lookup failure degrades to 0 for that product only.
        let pads = &report.products[3];
        assert_eq!(pads.product.available_quantity, Some(0.0));
        assert_eq!(pads.badge.as_ref().unwrap().level, StockLevel::Out);
    }

    #[test]
    fn test_enrich_report_without_location() {
        let mut snapshot = snapshot();
        snapshot.pos_config = None;

        let report = enrich_report(&snapshot, &StockDisplayConfig::default());
        assert_eq!(report.location_id, None);
        assert!(report.products.iter().all(|view| {
            view.product.available_quantity.is_none() && view.product.tag_ids.is_none()
        }));
    }

    #[test]
    fn test_enrich_report_with_tags_unavailable() {
        let mut snapshot = snapshot();
        snapshot.tags_unavailable = true;

        let report = enrich_report(&snapshot, &StockDisplayConfig::default());
        assert_eq!(report.products[0].product.available_quantity, Some(7.0));
        assert_eq!(report.products[0].product.tag_ids, Some(vec![]));
    }

    #[test]
    fn test_markup_report() {
        let report = markup_report(snapshot());

        assert_eq!(report.templates[0].margin_percent, 50.0);

        let order = &report.orders[0];
        assert_eq!(order.margin, Money::from_minor(100));
        assert_eq!(order.margin_percent, 25.0);
        assert_eq!(order.lines[0].margin, Money::from_minor(50));
    }

    #[test]
    fn test_report_serializes_flat_products() {
        let report = enrich_report(&snapshot(), &StockDisplayConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        let first = &json["products"][0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["pos_qty_available"], 7.0);
        assert_eq!(first["badge"]["class"], "stock-low");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let loaded = HostSnapshot::load(file.path()).unwrap();
        assert_eq!(loaded.products.len(), 4);
        assert_eq!(loaded.orders[0].lines.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            HostSnapshot::load(&dir.path().join("missing.json")),
            Err(CliError::Io { .. })
        ));
    }
}
