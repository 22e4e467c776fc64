//! # Stock & Tag Enrichment
//!
//! Fills `pos_qty_available` and `tag_ids` on a batch of POS product rows.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Enrichment Pipeline                                 │
//! │                                                                         │
//! │  PosConfig ──► LocationResolver ──► location_id?                       │
//! │                                         │                               │
//! │                        None ────────────┼──► batch returned unchanged  │
//! │                                         │                               │
//! │  Vec<ProductRecord> ──► StockQuantityStage ──► ProductTagStage ──► out │
//! │                          │                      │                       │
//! │                          │ 1 lookup per         │ 1 bulk lookup per     │
//! │                          │ storable product     │ batch (no N+1)        │
//! │                          ▼                      ▼                       │
//! │                     QuantityLookup          TagLookup                   │
//! │                     (host, may fail)        (host, may fail)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fault Isolation
//! A failed lookup never fails the batch. The product it concerns gets
//! quantity 0 (or the whole batch gets no tags when the bulk tag lookup
//! fails) and the remaining products are processed normally.
//!
//! ## Usage
//! ```rust,ignore
//! let pipeline = EnrichmentPipeline::standard(&host, &host);
//! let products = pipeline.run_for_config(&pos_config, products);
//! ```

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::{LookupError, LookupResult};
use crate::types::{PosConfig, ProductRecord, RecordId};

// =============================================================================
// Host Lookup Capabilities
// =============================================================================

/// On-hand quantity of a product at a stock location.
pub trait QuantityLookup {
    fn quantity_at_location(&self, product_id: RecordId, location_id: RecordId)
        -> LookupResult<f64>;
}

/// Tag ids of a set of product templates, answered in one call.
///
/// Templates without tags may be absent from the returned map.
pub trait TagLookup {
    fn tags_for_templates(
        &self,
        template_ids: &BTreeSet<RecordId>,
    ) -> LookupResult<HashMap<RecordId, Vec<RecordId>>>;
}

/// Resolves the stock location a POS sells from.
pub trait LocationResolver {
    fn resolve_pos_location(&self) -> Option<RecordId>;
}

impl LocationResolver for PosConfig {
    fn resolve_pos_location(&self) -> Option<RecordId> {
        self.source_location()
    }
}

// =============================================================================
// Stages
// =============================================================================

/// One transform applied to a product batch for a resolved location.
///
/// Stages must keep the batch length and order intact and must not fail:
/// every problem degrades to a default value on the affected rows.
pub trait EnrichmentStage {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn enrich(&self, location_id: RecordId, products: &mut [ProductRecord]);
}

/// Sets `available_quantity` from the host's on-hand quantity.
///
/// ## Rules
/// - Storable: host quantity at the location; lookup failure or a
///   non-finite answer → 0
/// - Consumable / service: 0, no lookup
pub struct StockQuantityStage<'a> {
    lookup: &'a dyn QuantityLookup,
}

impl<'a> StockQuantityStage<'a> {
    pub fn new(lookup: &'a dyn QuantityLookup) -> Self {
        StockQuantityStage { lookup }
    }

    fn quantity_for(&self, product: &ProductRecord, location_id: RecordId) -> f64 {
        if !product.is_storable() {
            return 0.0;
        }

        let result = self
            .lookup
            .quantity_at_location(product.id, location_id)
            .and_then(|qty| {
                if qty.is_finite() {
                    Ok(qty)
                } else {
                    Err(LookupError::Inconsistent {
                        entity: "product".to_string(),
                        id: product.id,
                        reason: format!("on-hand quantity is {}", qty),
                    })
                }
            });

        match result {
            Ok(qty) => qty,
            Err(e) => {
                warn!(
                    product_id = product.id,
                    location_id,
                    error = %e,
                    "Stock lookup failed, using 0"
                );
                0.0
            }
        }
    }
}

impl EnrichmentStage for StockQuantityStage<'_> {
    fn name(&self) -> &'static str {
        "stock_quantity"
    }

    fn enrich(&self, location_id: RecordId, products: &mut [ProductRecord]) {
        for product in products.iter_mut() {
            product.available_quantity = Some(self.quantity_for(product, location_id));
        }
    }
}

/// Sets `tag_ids` from a single bulk lookup over the batch's templates.
///
/// ## Rules
/// - One `tags_for_templates` call per batch, none for a batch without
///   template references
/// - Storable: tags of its template, or `[]` when it has none
/// - Consumable / service: `[]`
/// - Bulk lookup failure: `[]` for every product
pub struct ProductTagStage<'a> {
    lookup: &'a dyn TagLookup,
}

impl<'a> ProductTagStage<'a> {
    pub fn new(lookup: &'a dyn TagLookup) -> Self {
        ProductTagStage { lookup }
    }

    fn load_tag_map(&self, products: &[ProductRecord]) -> HashMap<RecordId, Vec<RecordId>> {
        let template_ids: BTreeSet<RecordId> =
            products.iter().filter_map(|p| p.template_id).collect();

        if template_ids.is_empty() {
            return HashMap::new();
        }

        match self.lookup.tags_for_templates(&template_ids) {
            Ok(map) => {
                debug!(
                    templates = template_ids.len(),
                    tagged = map.len(),
                    "Loaded product tags"
                );
                map
            }
            Err(e) => {
                warn!(
                    templates = template_ids.len(),
                    error = %e,
                    "Tag lookup failed, products get no tags"
                );
                HashMap::new()
            }
        }
    }
}

impl EnrichmentStage for ProductTagStage<'_> {
    fn name(&self) -> &'static str {
        "product_tags"
    }

    fn enrich(&self, _location_id: RecordId, products: &mut [ProductRecord]) {
        let tag_map = self.load_tag_map(products);

        for product in products.iter_mut() {
            let tags = if product.is_storable() {
                product
                    .template_id
                    .and_then(|template_id| tag_map.get(&template_id))
                    .cloned()
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            product.tag_ids = Some(tags);
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Ordered list of enrichment stages.
///
/// Hosts compose the stages they need; [`EnrichmentPipeline::standard`]
/// is stock quantity followed by tags.
#[derive(Default)]
pub struct EnrichmentPipeline<'a> {
    stages: Vec<Box<dyn EnrichmentStage + 'a>>,
}

impl<'a> EnrichmentPipeline<'a> {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        EnrichmentPipeline { stages: Vec::new() }
    }

    /// Stock quantity stage, then tag stage.
    pub fn standard(quantities: &'a dyn QuantityLookup, tags: &'a dyn TagLookup) -> Self {
        EnrichmentPipeline::new()
            .with_stage(StockQuantityStage::new(quantities))
            .with_stage(ProductTagStage::new(tags))
    }

    /// Appends a stage.
    pub fn with_stage(mut self, stage: impl EnrichmentStage + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages, in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs every stage over the batch.
    ///
    /// Without a location the batch is returned untouched.
    pub fn run(
        &self,
        location_id: Option<RecordId>,
        mut products: Vec<ProductRecord>,
    ) -> Vec<ProductRecord> {
        let Some(location_id) = location_id else {
            debug!(count = products.len(), "No POS stock location, skipping enrichment");
            return products;
        };

        for stage in &self.stages {
            stage.enrich(location_id, &mut products);
        }

        debug!(
            count = products.len(),
            location_id,
            stages = ?self.stage_names(),
            "Enriched product batch"
        );
        products
    }

    /// Resolves the location, then runs the pipeline.
    pub fn run_for_config(
        &self,
        resolver: &dyn LocationResolver,
        products: Vec<ProductRecord>,
    ) -> Vec<ProductRecord> {
        self.run(resolver.resolve_pos_location(), products)
    }
}

/// Enriches a batch with the standard pipeline.
///
/// ## Example
/// ```rust,ignore
/// let enriched = enrich_products(products, config.source_location(), &host, &host);
/// ```
pub fn enrich_products(
    products: Vec<ProductRecord>,
    location_id: Option<RecordId>,
    quantities: &dyn QuantityLookup,
    tags: &dyn TagLookup,
) -> Vec<ProductRecord> {
    EnrichmentPipeline::standard(quantities, tags).run(location_id, products)
}

// =============================================================================
// Unit Tests
// =============================================================================
