//! Resolution of the dynamic validation payload into a typed discount kind
//!
//! The payload is duck-typed on the wire: a `type` string plus loosely
//! typed value fields. It is resolved exactly once, here, into a sum type;
//! the pricing computation never re-inspects the raw payload.

use super::types::{PromoValidationResult, PromoValue};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Discount kind, keyed on the wire `type` discriminator
#[derive(Debug, Clone, PartialEq)]
pub enum PromoKind {
    /// `ORDER_TOTAL_PERCENTAGE`: percentage of the order subtotal
    OrderPercentage {
        value: Decimal,
        minimum_order_value: Option<Decimal>,
    },
    /// `ORDER_TOTAL_FIXED_AMOUNT`: flat amount off the order
    OrderFixedAmount {
        value: Decimal,
        minimum_order_value: Option<Decimal>,
    },
    /// `percentage`: percentage off each applicable line
    ItemPercentage {
        value: Decimal,
        applicable_products: HashSet<String>,
    },
    /// `fixed_amount_product`: fixed amount off each applicable unit
    ItemFixedAmount {
        value: Decimal,
        applicable_products: HashSet<String>,
    },
}

/// A validation result resolved into computable form
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPromo {
    pub kind: PromoKind,
    pub code_name: Option<String>,
    pub public_display_name: Option<String>,
}

impl PromoValidationResult {
    /// Resolve into a computable discount, or `None` when no discount
    /// should apply
    ///
    /// `None` covers: not valid, validation errored, missing or
    /// unparseable value, unknown type. All of these degrade silently;
    /// unknown types are expected from newer backends and must not break
    /// old clients.
    pub fn resolve(&self) -> Option<ResolvedPromo> {
        if !self.valid || self.error {
            return None;
        }

        let Some(value) = self.value.as_ref().and_then(PromoValue::as_decimal) else {
            tracing::debug!(code = ?self.code_name, "Promo value missing or not numeric, no discount applied");
            return None;
        };

        let minimum_order_value = self
            .minimum_order_value_for_order_discount
            .as_ref()
            .and_then(PromoValue::as_decimal);

        let applicable_products = || -> HashSet<String> {
            self.applicability
                .as_ref()
                .map(|a| a.applicable_target_product_uuids.iter().cloned().collect())
                .unwrap_or_default()
        };

        let kind = match self.promo_type.as_deref() {
            Some("ORDER_TOTAL_PERCENTAGE") => PromoKind::OrderPercentage {
                value,
                minimum_order_value,
            },
            Some("ORDER_TOTAL_FIXED_AMOUNT") => PromoKind::OrderFixedAmount {
                value,
                minimum_order_value,
            },
            Some("percentage") => PromoKind::ItemPercentage {
                value,
                applicable_products: applicable_products(),
            },
            Some("fixed_amount_product") => PromoKind::ItemFixedAmount {
                value,
                applicable_products: applicable_products(),
            },
            other => {
                tracing::debug!(promo_type = ?other, "Unsupported promo type, no discount applied");
                return None;
            }
        };

        Some(ResolvedPromo {
            kind,
            code_name: self.code_name.clone(),
            public_display_name: self.public_display_name.clone(),
        })
    }
}
