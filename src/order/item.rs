//! Order line items

use crate::error::OrderError;
use crate::money::{MAX_PRICE, MAX_QUANTITY};
use serde::{Deserialize, Serialize};

/// A line in an open order
///
/// `id` identifies the line itself: the same product ordered with
/// different option selections produces distinct lines. `product_id`
/// identifies the catalog product and is what promo applicability rules
/// match against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Line identifier, unique within the order
    pub id: String,
    /// Catalog product identifier
    pub product_id: String,
    /// Product name
    pub name: String,
    /// Unit price excluding tax
    pub price: f64,
    /// Quantity
    pub quantity: i32,
    /// Selected options, passed through to the submission payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_options: Option<Vec<SelectedOptionRef>>,
}

/// Option selection reference (group + option ids)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedOptionRef {
    pub group_id: String,
    pub option_id: String,
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidPrice(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a LineItem before it enters a draft
pub fn validate_line_item(item: &LineItem) -> Result<(), OrderError> {
    if item.id.is_empty() {
        return Err(OrderError::InvalidItem("line id must not be empty".into()));
    }

    // Price must be finite and non-negative
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(OrderError::InvalidPrice(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(OrderError::InvalidPrice(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, item.price
        )));
    }

    // Quantity must be positive and within bounds
    if item.quantity <= 0 {
        return Err(OrderError::InvalidQuantity(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }

    Ok(())
}
