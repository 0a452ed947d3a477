//! Validation request payload
//!
//! The caller submits this to the external validation endpoint and feeds
//! the response back into the draft; this crate never performs the call
//! itself.

use crate::error::{OrderError, OrderResult};
use crate::money::{to_decimal, DECIMAL_PLACES};
use crate::order::OrderDraft;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Line-item context sent with a validation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemContext {
    /// Catalog product identifier
    pub product_id: String,
    pub quantity: i32,
    /// Per-unit price before any item-specific discount, as a 2-decimal
    /// string (the endpoint takes amounts as strings)
    pub base_price_per_unit: String,
}

/// Payload for the external promo validation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoValidationRequest {
    /// Standardized (trimmed, upper-cased) code
    pub code_name: String,
    pub business_identifier: String,
    /// Current order subtotal as a 2-decimal string
    pub current_order_subtotal: String,
    pub order_items_context: Vec<OrderItemContext>,
}

impl PromoValidationRequest {
    /// Build the payload for the current draft
    pub fn for_draft(
        code: &str,
        business_identifier: &str,
        draft: &OrderDraft,
    ) -> OrderResult<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(OrderError::EmptyPromoCode);
        }
        if business_identifier.is_empty() {
            return Err(OrderError::MissingBusinessContext);
        }

        let mut subtotal = Decimal::ZERO;
        let mut order_items_context = Vec::with_capacity(draft.items().len());
        for item in draft.items() {
            let unit_price = to_decimal(item.price).max(Decimal::ZERO);
            subtotal += unit_price * Decimal::from(item.quantity.max(0));
            order_items_context.push(OrderItemContext {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                base_price_per_unit: money_string(unit_price),
            });
        }

        Ok(Self {
            code_name: code.to_uppercase(),
            business_identifier: business_identifier.to_string(),
            current_order_subtotal: money_string(subtotal),
            order_items_context,
        })
    }
}

/// Format a monetary value as the endpoint expects it: rounded to 2
/// decimals, zero-padded
fn money_string(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    )
}
