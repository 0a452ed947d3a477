//! Wire types for the promo validation result
//!
//! The result is produced by the external validation endpoint and treated
//! as immutable input: it is replaced wholesale on re-validation or
//! removal, never partially mutated. Every field is defaulted so a partial
//! or malformed payload still deserializes.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Promo validation result, as returned by the validation endpoint
///
/// The caller may also synthesize one locally (with `error: true`) when
/// the validation call itself fails; such results never produce a
/// discount.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PromoValidationResult {
    /// Whether the code is currently applicable
    pub valid: bool,
    /// Whether validation itself failed, distinct from "not applicable"
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Display message, owned by the caller's UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Discount type discriminator; unknown values are tolerated
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub promo_type: Option<String>,
    /// Percentage points or fixed currency amount, depending on type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PromoValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicability: Option<Applicability>,
    /// Threshold for the order-level discount types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_order_value_for_order_discount: Option<PromoValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_display_name: Option<String>,
}

/// Product applicability for the per-item discount types
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Applicability {
    /// Catalog product identifiers eligible for the discount
    pub applicable_target_product_uuids: Vec<String>,
}

/// A decimal the backend may send as a JSON number or a string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PromoValue {
    Number(f64),
    Text(String),
}

impl PromoValue {
    /// Parse into a Decimal; `None` for non-finite or non-numeric input
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PromoValue::Number(n) if n.is_finite() => Decimal::from_f64(*n),
            PromoValue::Number(_) => None,
            PromoValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

impl From<f64> for PromoValue {
    fn from(value: f64) -> Self {
        PromoValue::Number(value)
    }
}

impl From<&str> for PromoValue {
    fn from(value: &str) -> Self {
        PromoValue::Text(value.to_string())
    }
}
