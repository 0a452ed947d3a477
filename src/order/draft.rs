//! Open-order session state
//!
//! One draft per ordering session, exclusively owned, mutated in place
//! while the order is open. Pricing is never stored: it is recomputed from
//! scratch on every call, so a quantity edit or a fresh validation result
//! is reflected by simply asking again.

use crate::error::{OrderError, OrderResult};
use crate::money::MAX_QUANTITY;
use crate::order::item::{validate_line_item, LineItem};
use crate::pricing::{compute_pricing, PricingResult};
use crate::promo::PromoValidationResult;
use serde::{Deserialize, Serialize};

/// An in-progress order: line items plus the current promo validation
/// result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderDraft {
    items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promo: Option<PromoValidationResult>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn promo(&self) -> Option<&PromoValidationResult> {
        self.promo.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line to the order
    ///
    /// A line with the same `id` already in the order has its quantity
    /// increased instead of a duplicate line being appended.
    pub fn add_item(&mut self, item: LineItem) -> OrderResult<()> {
        validate_line_item(&item)?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let merged = existing.quantity + item.quantity;
            if merged > MAX_QUANTITY {
                return Err(OrderError::InvalidQuantity(format!(
                    "quantity exceeds maximum allowed ({}), got {}",
                    MAX_QUANTITY, merged
                )));
            }
            existing.quantity = merged;
        } else {
            self.items.push(item);
        }
        Ok(())
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&mut self, item_id: &str, quantity: i32) -> OrderResult<()> {
        if quantity > MAX_QUANTITY {
            return Err(OrderError::InvalidQuantity(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, quantity
            )));
        }

        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| OrderError::ItemNotFound(item_id.to_string()))?;

        if quantity <= 0 {
            self.items.remove(pos);
        } else if let Some(item) = self.items.get_mut(pos) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Remove a line from the order
    pub fn remove_item(&mut self, item_id: &str) -> OrderResult<LineItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| OrderError::ItemNotFound(item_id.to_string()))?;
        Ok(self.items.remove(pos))
    }

    /// Discard all lines (order submitted or abandoned)
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the promo validation result wholesale
    pub fn set_promo(&mut self, result: PromoValidationResult) {
        self.promo = Some(result);
    }

    /// Remove the promo code, reverting to undiscounted pricing
    pub fn clear_promo(&mut self) {
        self.promo = None;
    }

    /// Recompute pricing from the current state
    pub fn pricing(&self) -> PricingResult {
        compute_pricing(&self.items, self.promo.as_ref())
    }
}
