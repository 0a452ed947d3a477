//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per line (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated at the boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO to avoid silent
/// data corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
