//! Order error types

use thiserror::Error;

/// Errors from order mutation and payload construction
///
/// The pricing computation itself never returns these: malformed promo
/// state degrades to a zero-discount result instead of failing.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid item: {0}")]
    InvalidItem(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("order has no items")]
    EmptyOrder,

    #[error("promo code is empty")]
    EmptyPromoCode,

    #[error("missing business or table context")]
    MissingBusinessContext,
}

pub type OrderResult<T> = Result<T, OrderError>;
