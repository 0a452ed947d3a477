//! Promo-code validation model
//!
//! The validation service itself is external. This module models the shape
//! of its result, the request payload sent to it, and the one-shot
//! resolution of the dynamic payload into a typed discount kind.

mod kind;
mod request;
mod types;

pub use kind::{PromoKind, ResolvedPromo};
pub use request::{OrderItemContext, PromoValidationRequest};
pub use types::{Applicability, PromoValidationResult, PromoValue};
