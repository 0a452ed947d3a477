//! Order pricing computation
//!
//! Derives subtotal, discount breakdown and final total for an order from
//! its line items and the current promo validation result. The computation
//! is pure: identical inputs always produce identical results, nothing is
//! cached between calls, and malformed promo state degrades to a
//! zero-discount result instead of failing. A pricing display must always
//! render something sane.

use crate::money::{to_decimal, to_f64, DECIMAL_PLACES};
use crate::order::LineItem;
use crate::promo::{PromoKind, PromoValidationResult, ResolvedPromo};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discount breakdown for one line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDiscount {
    /// Discount applied to this line, rounded to 2 decimals
    pub amount: f64,
    /// Receipt/display description of the discount
    pub description: String,
    /// The line's pre-discount total
    pub original_item_total: f64,
}

/// Kind of promo reported as applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppliedPromoKind {
    OrderTotalPercentage,
    OrderTotalFixedAmount,
    /// Aggregate of per-item discounts from one code
    ItemSpecificAggregate,
}

/// Display descriptor for the promo that actually produced a discount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedPromo {
    /// Code to name in the submission payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    pub public_display_name: String,
    pub kind: AppliedPromoKind,
}

/// Result of one pricing computation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingResult {
    /// Sum of line totals, rounded to 2 decimals
    pub subtotal: f64,
    /// Aggregate discount actually applied; `0 <= x <= subtotal`
    pub total_discount_amount: f64,
    /// `max(0, subtotal - total_discount_amount)`, rounded to 2 decimals
    pub final_total: f64,
    /// Present only when a non-zero discount was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_promo: Option<AppliedPromo>,
    /// Per-line discounts keyed by line id, per-item promo kinds only
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub item_discounts: HashMap<String, ItemDiscount>,
}

/// Compute pricing for the given lines and promo validation result
///
/// Lines with `quantity <= 0` contribute nothing to subtotal or discount
/// eligibility (such lines are removed from the order before reaching this
/// computation in practice); negative or non-finite prices contribute
/// zero. The subtotal accumulates unrounded and is rounded only for the
/// reported result; per-item discounts are rounded as they are produced.
pub fn compute_pricing(
    items: &[LineItem],
    promo: Option<&PromoValidationResult>,
) -> PricingResult {
    let mut subtotal = Decimal::ZERO;
    for item in items {
        if item.quantity <= 0 {
            continue;
        }
        let unit_price = to_decimal(item.price).max(Decimal::ZERO);
        subtotal += unit_price * Decimal::from(item.quantity);
    }

    let mut discount = Decimal::ZERO;
    let mut applied_promo = None;
    let mut item_discounts = HashMap::new();

    if let Some(resolved) = promo.and_then(|p| p.resolve()) {
        match resolved.kind {
            PromoKind::OrderPercentage {
                value,
                minimum_order_value,
            } => {
                if meets_minimum(subtotal, minimum_order_value) {
                    discount = subtotal * value / Decimal::ONE_HUNDRED;
                    if discount > Decimal::ZERO {
                        applied_promo = Some(AppliedPromo {
                            code_name: resolved.code_name.clone(),
                            public_display_name: resolved
                                .public_display_name
                                .clone()
                                .unwrap_or_else(|| {
                                    format!("{}% Off Order", value.normalize())
                                }),
                            kind: AppliedPromoKind::OrderTotalPercentage,
                        });
                    }
                }
            }
            PromoKind::OrderFixedAmount {
                value,
                minimum_order_value,
            } => {
                if meets_minimum(subtotal, minimum_order_value) {
                    discount = value;
                    if discount > Decimal::ZERO {
                        applied_promo = Some(AppliedPromo {
                            code_name: resolved.code_name.clone(),
                            public_display_name: resolved
                                .public_display_name
                                .clone()
                                .unwrap_or_else(|| format!("${:.2} Off Order", value)),
                            kind: AppliedPromoKind::OrderTotalFixedAmount,
                        });
                    }
                }
            }
            PromoKind::ItemPercentage { .. } | PromoKind::ItemFixedAmount { .. } => {
                discount = apply_item_discounts(items, &resolved, &mut item_discounts);
                if discount > Decimal::ZERO {
                    applied_promo = Some(AppliedPromo {
                        code_name: resolved.code_name.clone(),
                        public_display_name: resolved
                            .public_display_name
                            .clone()
                            .unwrap_or_else(|| "Item Discounts Applied".to_string()),
                        kind: AppliedPromoKind::ItemSpecificAggregate,
                    });
                }
            }
        }
    }

    // No discount can apply to an empty order; extreme discounts must not
    // produce negative totals or exceed the subtotal
    if subtotal > Decimal::ZERO {
        discount = discount.clamp(Decimal::ZERO, subtotal);
    } else {
        discount = Decimal::ZERO;
    }
    if discount <= Decimal::ZERO {
        applied_promo = None;
    }

    let final_total = (subtotal - discount).max(Decimal::ZERO);

    PricingResult {
        subtotal: to_f64(subtotal),
        total_discount_amount: to_f64(discount),
        final_total: to_f64(final_total),
        applied_promo,
        item_discounts,
    }
}

/// Order-level discounts only apply once the subtotal reaches the
/// configured threshold
fn meets_minimum(subtotal: Decimal, minimum: Option<Decimal>) -> bool {
    minimum.is_none_or(|min| subtotal >= min)
}

/// Per-item discount pass for the item-specific promo kinds
///
/// Each eligible line's discount is computed from that line's own price,
/// rounded to 2 decimals immediately, and recorded only when non-zero.
/// Returns the accumulated (already per-line-rounded) total.
fn apply_item_discounts(
    items: &[LineItem],
    resolved: &ResolvedPromo,
    out: &mut HashMap<String, ItemDiscount>,
) -> Decimal {
    let (value, applicable_products, per_unit_fixed) = match &resolved.kind {
        PromoKind::ItemPercentage {
            value,
            applicable_products,
        } => (*value, applicable_products, false),
        PromoKind::ItemFixedAmount {
            value,
            applicable_products,
        } => (*value, applicable_products, true),
        _ => return Decimal::ZERO,
    };

    let mut total = Decimal::ZERO;
    for item in items {
        if item.quantity <= 0 || !applicable_products.contains(&item.product_id) {
            continue;
        }

        let unit_price = to_decimal(item.price).max(Decimal::ZERO);
        let quantity = Decimal::from(item.quantity);
        let line_total = unit_price * quantity;

        let raw = if per_unit_fixed {
            // A fixed discount cannot exceed the unit price
            value.min(unit_price) * quantity
        } else {
            line_total * value / Decimal::ONE_HUNDRED
        };
        let line_discount =
            raw.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        if line_discount <= Decimal::ZERO {
            continue;
        }

        let description = resolved.public_display_name.clone().unwrap_or_else(|| {
            if per_unit_fixed {
                format!("${:.2} off", value)
            } else {
                format!("{}% off", value.normalize())
            }
        });
        out.insert(
            item.id.clone(),
            ItemDiscount {
                amount: to_f64(line_discount),
                description,
                original_item_total: to_f64(line_total),
            },
        );
        total += line_discount;
    }

    total
}
