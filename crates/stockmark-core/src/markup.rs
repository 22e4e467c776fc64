//! # Markup Calculator
//!
//! "Margin" in this system is **markup on cost**, not margin on price.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  margin_amount  = price - cost                                         │
//! │  margin_percent = margin_amount / cost × 100      (cost > 0)           │
//! │                 = 0                               (cost ≤ 0)           │
//! │                                                                         │
//! │  Cost 100,000   Price 150,000   →   Markup 50%                         │
//! │  (margin on price would report 33.3% for the same goods)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Granularity
//! - **Template**: list price against standard price
//! - **Order line**: unit price against the resolved line cost
//! - **Order**: sum of line margins against Σ(cost × quantity)
//!
//! The order margin adds per-unit line margins without scaling them by
//! quantity, while the order cost does scale by quantity. Hosts rely on
//! these numbers as they are; `test_order_margin_is_not_quantity_scaled`
//! pins the behavior.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{OrderLineRecord, OrderRecord, TemplateRecord};

// =============================================================================
// Markup Result
// =============================================================================

/// A margin amount with its markup-on-cost percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Markup {
    pub amount: Money,
    pub percent: f64,
}

impl Markup {
    /// No margin, no markup.
    pub const fn zero() -> Self {
        Markup {
            amount: Money::zero(),
            percent: 0.0,
        }
    }
}

impl Default for Markup {
    fn default() -> Self {
        Markup::zero()
    }
}

/// Computes markup on cost for one price/cost pair.
///
/// Any cost that is not strictly positive reports a 0% markup, negative
/// costs included. The margin amount is always `price - cost`.
///
/// ## Example
/// ```rust
/// use stockmark_core::markup::markup;
/// use stockmark_core::money::Money;
///
/// let m = markup(Money::from_minor(100_000), Money::from_minor(150_000));
/// assert_eq!(m.amount.minor(), 50_000);
/// assert_eq!(m.percent, 50.0);
///
/// let free = markup(Money::zero(), Money::from_minor(150_000));
/// assert_eq!(free.percent, 0.0);
/// ```
pub fn markup(cost: Money, price: Money) -> Markup {
    let amount = price - cost;
    Markup {
        amount,
        percent: amount.percent_of(cost).unwrap_or(0.0),
    }
}

// =============================================================================
// Order Lines
// =============================================================================

/// Resolves the unit cost of an order line.
///
/// ## Resolution Order
/// 1. `purchase_price` when present and nonzero
/// 2. `product_standard_price` when present and nonzero
/// 3. zero
pub fn resolve_line_cost(line: &OrderLineRecord) -> Money {
    line.purchase_price
        .filter(|cost| !cost.is_zero())
        .or(line.product_standard_price.filter(|cost| !cost.is_zero()))
        .unwrap_or_default()
}

/// Computes the markup of a single order line (per unit).
pub fn line_markup(line: &OrderLineRecord) -> Markup {
    markup(resolve_line_cost(line), line.price_unit)
}

/// Recomputes `margin` and `margin_percent` on an order line.
pub fn compute_line_margin(line: &mut OrderLineRecord) {
    let cost = resolve_line_cost(line);
    let result = markup(cost, line.price_unit);
    line.margin = result.amount;
    line.margin_percent = result.percent;

    if cost.is_positive() {
        debug!(
            line_id = line.id,
            product_id = ?line.product_id,
            cost = %cost,
            price = %line.price_unit,
            markup_percent = result.percent,
            "Order line markup"
        );
    } else {
        debug!(line_id = line.id, "Order line cost is zero, markup set to 0%");
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Aggregates the markup of a set of order lines.
///
/// Uses each line's stored `margin`; call [`compute_line_margin`] first if
/// the lines may be stale. [`compute_order_margin`] does both.
///
/// The total cost is Σ(cost × quantity) kept in fractional minor units, so
/// sub-unit quantities still count toward the guard. Lines with a
/// non-finite quantity add no cost.
pub fn order_markup(lines: &[OrderLineRecord]) -> Markup {
    let amount: Money = lines.iter().map(|line| line.margin).sum();
    let total_cost: f64 = lines
        .iter()
        .filter(|line| line.quantity.is_finite())
        .map(|line| resolve_line_cost(line).minor() as f64 * line.quantity)
        .sum();

    let percent = if total_cost.is_finite() && total_cost > 0.0 {
        amount.minor() as f64 / total_cost * 100.0
    } else {
        0.0
    };

    Markup { amount, percent }
}

/// Recomputes every line and then the order totals.
pub fn compute_order_margin(order: &mut OrderRecord) {
    order.lines.iter_mut().for_each(compute_line_margin);

    let result = order_markup(&order.lines);
    order.margin = result.amount;
    order.margin_percent = result.percent;

    info!(
        order_id = order.id,
        order = %order.name,
        lines = order.lines.len(),
        total_margin = %result.amount,
        markup_percent = result.percent,
        "Order markup"
    );
}

// =============================================================================
// Templates
// =============================================================================

/// Recomputes `margin_percent` on a product template.
pub fn compute_template_margin(template: &mut TemplateRecord) {
    let result = markup(template.standard_price, template.list_price);
    template.margin_percent = result.percent;

    debug!(
        template_id = template.id,
        template = %template.name,
        cost = %template.standard_price,
        price = %template.list_price,
        markup_percent = result.percent,
        "Template markup"
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn m(minor: i64) -> Money {
        Money::from_minor(minor)
    }

    #[test]
    fn test_markup_on_cost() {
        let result = markup(m(100_000), m(150_000));
        assert_eq!(result.amount, m(50_000));
        assert_eq!(result.percent, 50.0);
    }

    #[test]
    fn test_markup_zero_cost() {
        let result = markup(Money::zero(), m(150_000));
        assert_eq!(result.amount, m(150_000));
        assert_eq!(result.percent, 0.0);
    }

    #[test]
    fn test_markup_price_equals_cost() {
        let result = markup(m(100), m(100));
        assert_eq!(result.amount, Money::zero());
        assert_eq!(result.percent, 0.0);
    }

    #[test]
    fn test_markup_negative_cost_takes_guard() {
        let result = markup(m(-100), m(150));
        assert_eq!(result.amount, m(250));
        assert_eq!(result.percent, 0.0);
    }

    #[test]
    fn test_markup_below_cost_is_negative() {
        let result = markup(m(200), m(150));
        assert_eq!(result.amount, m(-50));
        assert_eq!(result.percent, -25.0);
    }

    #[test]
    fn test_resolve_line_cost_order() {
        let line = OrderLineRecord::new(1, m(150), 1.0);
        assert_eq!(resolve_line_cost(&line), Money::zero());

        let line = line.with_product(10, m(90));
        assert_eq!(resolve_line_cost(&line), m(90));

        let line = line.with_purchase_price(m(100));
        assert_eq!(resolve_line_cost(&line), m(100));
    }

    #[test]
    fn test_resolve_line_cost_skips_zero_override() {
        let line = OrderLineRecord::new(1, m(150), 1.0)
            .with_product(10, m(90))
            .with_purchase_price(Money::zero());
        assert_eq!(resolve_line_cost(&line), m(90));

        let line = OrderLineRecord::new(2, m(150), 1.0).with_product(10, Money::zero());
        assert_eq!(resolve_line_cost(&line), Money::zero());
    }

    #[test]
    fn test_compute_line_margin() {
        let mut line = OrderLineRecord::new(1, m(150_000), 3.0).with_purchase_price(m(100_000));
        compute_line_margin(&mut line);
        assert_eq!(line.margin, m(50_000));
        assert_eq!(line.margin_percent, 50.0);
        assert_eq!(line_markup(&line).percent, 50.0);
    }

    #[test]
    fn test_compute_line_margin_without_cost() {
        let mut line = OrderLineRecord::new(1, m(150), 1.0);
        compute_line_margin(&mut line);
        assert_eq!(line.margin, m(150));
        assert_eq!(line.margin_percent, 0.0);
    }

    #[test]
    fn test_order_aggregate() {
        let mut order = OrderRecord::new(
            1,
            "S00001",
            vec![
                OrderLineRecord::new(1, m(150), 2.0).with_purchase_price(m(100)),
                OrderLineRecord::new(2, m(250), 1.0).with_purchase_price(m(200)),
            ],
        );
        compute_order_margin(&mut order);
        assert_eq!(order.margin, m(100));
        assert_eq!(order.margin_percent, 25.0);
    }

    #[test]
    fn test_order_margin_is_not_quantity_scaled() {
        // 10 units at +50 each still contribute 50 to the order margin,
        // while the cost side counts all 10 units.
        let mut order = OrderRecord::new(
            1,
            "S00002",
            vec![OrderLineRecord::new(1, m(150), 10.0).with_purchase_price(m(100))],
        );
        compute_order_margin(&mut order);
        assert_eq!(order.margin, m(50));
        assert_eq!(order.margin_percent, 5.0);
    }

    #[test]
    fn test_order_without_cost_reports_zero() {
        let mut order = OrderRecord::new(
            1,
            "S00003",
            vec![
                OrderLineRecord::new(1, m(150), 2.0),
                OrderLineRecord::new(2, m(80), 1.0),
            ],
        );
        compute_order_margin(&mut order);
        assert_eq!(order.margin, m(230));
        assert_eq!(order.margin_percent, 0.0);
    }

    #[test]
    fn test_empty_order() {
        let mut order = OrderRecord::new(1, "S00004", Vec::new());
        compute_order_margin(&mut order);
        assert_eq!(order.margin, Money::zero());
        assert_eq!(order.margin_percent, 0.0);
        assert_eq!(order_markup(&[]), Markup::zero());
    }

    #[test]
    fn test_order_cost_uses_fractional_quantity() {
        let mut order = OrderRecord::new(
            1,
            "S00005",
            vec![OrderLineRecord::new(1, m(300), 0.5).with_product(7, m(200))],
        );
        compute_order_margin(&mut order);
        // total cost = 200 × 0.5 = 100; margin = 300 - 200 = 100
        assert_eq!(order.margin, m(100));
        assert_eq!(order.margin_percent, 100.0);
    }

    #[test]
    fn test_order_cost_below_one_minor_unit() {
        // total cost = 1 × 0.4 + 1 × 0.4 = 0.8; margin = 2 + 2 = 4
        let mut order = OrderRecord::new(
            1,
            "S00007",
            vec![
                OrderLineRecord::new(1, m(3), 0.4).with_purchase_price(m(1)),
                OrderLineRecord::new(2, m(3), 0.4).with_purchase_price(m(1)),
            ],
        );
        compute_order_margin(&mut order);
        assert_eq!(order.margin, m(4));
        assert!((order.margin_percent - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_cost_is_not_rounded_per_line() {
        // total cost = 3 × 0.5 = 1.5; margin = 1
        let mut order = OrderRecord::new(
            1,
            "S00008",
            vec![OrderLineRecord::new(1, m(4), 0.5).with_purchase_price(m(3))],
        );
        compute_order_margin(&mut order);
        assert!((order.margin_percent - 100.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_order_with_huge_values_does_not_overflow() {
        let mut order = OrderRecord::new(
            1,
            "S00009",
            vec![
                OrderLineRecord::new(1, m(i64::MAX), 1e12).with_purchase_price(m(10_000_000)),
                OrderLineRecord::new(2, m(i64::MAX), 1e12).with_purchase_price(m(10_000_000)),
                OrderLineRecord::new(3, m(150), f64::NAN).with_purchase_price(m(100)),
            ],
        );
        compute_order_margin(&mut order);
        assert_eq!(order.margin, m(i64::MAX));
        assert!(order.margin_percent.is_finite());
        assert!(order.margin_percent > 0.0);
    }

    #[test]
    fn test_markup_saturates_extreme_spread() {
        let result = markup(m(i64::MIN), m(i64::MAX));
        assert_eq!(result.amount, m(i64::MAX));
        assert_eq!(result.percent, 0.0);
    }

    #[test]
    fn test_compute_order_refreshes_stale_lines() {
        let mut stale = OrderLineRecord::new(1, m(150), 1.0).with_purchase_price(m(100));
        stale.margin = m(999);
        let mut order = OrderRecord::new(1, "S00006", vec![stale]);
        compute_order_margin(&mut order);
        assert_eq!(order.lines[0].margin, m(50));
        assert_eq!(order.margin, m(50));
    }

    #[test]
    fn test_template_margin() {
        let mut template = TemplateRecord::new(1, "Brake Pad", m(150_000), m(100_000));
        compute_template_margin(&mut template);
        assert_eq!(template.margin_percent, 50.0);

        template.standard_price = Money::zero();
        compute_template_margin(&mut template);
        assert_eq!(template.margin_percent, 0.0);

        template.standard_price = m(-10);
        compute_template_margin(&mut template);
        assert_eq!(template.margin_percent, 0.0);
    }
}
