//! # POS Loader Fields
//!
//! The POS session loads product rows with an explicit field list. Stock
//! display needs the product type and the host-wide on-hand quantity in
//! every row, so the loader's list is extended before the search runs.

/// Field carrying the host-wide on-hand quantity.
pub const QTY_AVAILABLE_FIELD: &str = "qty_available";

/// Field carrying the product type.
pub const TYPE_FIELD: &str = "type";

/// Fields the stock display depends on, in the order they are appended.
pub const STOCK_FIELDS: [&str; 2] = [QTY_AVAILABLE_FIELD, TYPE_FIELD];

/// Appends the stock fields that are missing from a loader field list.
///
/// Existing entries keep their order and are never duplicated.
///
/// ## Example
/// ```rust
/// use stockmark_core::loader::augment_product_fields;
///
/// let fields = augment_product_fields(vec!["id".into(), "type".into()]);
/// assert_eq!(fields, vec!["id", "type", "qty_available"]);
/// ```
pub fn augment_product_fields(mut fields: Vec<String>) -> Vec<String> {
    for field in STOCK_FIELDS {
        if !fields.iter().any(|existing| existing == field) {
            fields.push(field.to_string());
        }
    }
    fields
}
