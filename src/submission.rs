//! Order-submission payload construction
//!
//! The backend recalculates prices and discounts authoritatively from this
//! payload; the client only names the promo code it believes applies, and
//! only when that code actually produced a discount.

use crate::error::{OrderError, OrderResult};
use crate::order::{LineItem, OrderDraft, SelectedOptionRef};
use serde::{Deserialize, Serialize};

/// Venue/session context for a submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionContext {
    pub business_identifier: String,
    pub table_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One line of a submission payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionItem {
    pub product_id: String,
    pub quantity: i32,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionRef>,
}

impl From<&LineItem> for SubmissionItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            selected_options: item.selected_options.clone().unwrap_or_default(),
        }
    }
}

/// Order-submission payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSubmission {
    pub business_identifier: String,
    pub table_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<SubmissionItem>,
    /// Present only when a validated code produced a non-zero discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_level_promo_code_name: Option<String>,
}

impl OrderSubmission {
    /// Build the payload from the current draft
    pub fn build(draft: &OrderDraft, context: SubmissionContext) -> OrderResult<Self> {
        if draft.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if context.business_identifier.is_empty() || context.table_number.is_empty() {
            return Err(OrderError::MissingBusinessContext);
        }

        let pricing = draft.pricing();
        let order_level_promo_code_name = if pricing.total_discount_amount > 0.0 {
            pricing
                .applied_promo
                .as_ref()
                .and_then(|p| p.code_name.clone())
        } else {
            None
        };

        let notes = context
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            business_identifier: context.business_identifier,
            table_number: context.table_number,
            customer_name: context.customer_name,
            number_of_guests: context.number_of_guests,
            notes,
            items: draft.items().iter().map(SubmissionItem::from).collect(),
            order_level_promo_code_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promo::{Applicability, PromoValidationResult};

    fn item(id: &str, product_id: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            id: id.to_string(),
            product_id: product_id.to_string(),
            name: format!("Item {}", id),
            price,
            quantity,
            selected_options: None,
        }
    }

    fn context() -> SubmissionContext {
        SubmissionContext {
            business_identifier: "biz-1".to_string(),
            table_number: "T7".to_string(),
            ..Default::default()
        }
    }

    fn discount_promo(code: &str) -> PromoValidationResult {
        PromoValidationResult {
            valid: true,
            promo_type: Some("ORDER_TOTAL_PERCENTAGE".to_string()),
            value: Some(10.0.into()),
            code_name: Some(code.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_empty_draft() {
        assert!(matches!(
            OrderSubmission::build(&OrderDraft::new(), context()),
            Err(OrderError::EmptyOrder)
        ));
    }

    #[test]
    fn test_rejects_missing_context() {
        let mut draft = OrderDraft::new();
        draft.add_item(item("a", "p1", 10.0, 1)).unwrap();

        let mut ctx = context();
        ctx.table_number = String::new();
        assert!(matches!(
            OrderSubmission::build(&draft, ctx),
            Err(OrderError::MissingBusinessContext)
        ));
    }

    #[test]
    fn test_maps_items_and_options() {
        let mut draft = OrderDraft::new();
        let mut line = item("a", "p1", 10.0, 2);
        line.selected_options = Some(vec![SelectedOptionRef {
            group_id: "g1".to_string(),
            option_id: "o1".to_string(),
        }]);
        draft.add_item(line).unwrap();

        let submission = OrderSubmission::build(&draft, context()).unwrap();
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.items[0].product_id, "p1");
        assert_eq!(submission.items[0].quantity, 2);
        assert_eq!(submission.items[0].selected_options.len(), 1);
    }

    #[test]
    fn test_promo_code_included_when_discount_applied() {
        let mut draft = OrderDraft::new();
        draft.add_item(item("a", "p1", 10.0, 2)).unwrap();
        draft.set_promo(discount_promo("SAVE10"));

        let submission = OrderSubmission::build(&draft, context()).unwrap();
        assert_eq!(
            submission.order_level_promo_code_name.as_deref(),
            Some("SAVE10")
        );
    }

    #[test]
    fn test_promo_code_omitted_when_no_discount() {
        // A valid code that produces no discount must not be named
        let mut draft = OrderDraft::new();
        draft.add_item(item("a", "p1", 10.0, 2)).unwrap();

        let mut promo = discount_promo("SAVE10");
        promo.promo_type = Some("percentage".to_string());
        promo.applicability = Some(Applicability {
            applicable_target_product_uuids: vec!["other-product".to_string()],
        });
        draft.set_promo(promo);

        let submission = OrderSubmission::build(&draft, context()).unwrap();
        assert!(submission.order_level_promo_code_name.is_none());
    }

    #[test]
    fn test_notes_trimmed_and_blank_dropped() {
        let mut draft = OrderDraft::new();
        draft.add_item(item("a", "p1", 10.0, 1)).unwrap();

        let mut ctx = context();
        ctx.notes = Some("  no onions  ".to_string());
        let submission = OrderSubmission::build(&draft, ctx).unwrap();
        assert_eq!(submission.notes.as_deref(), Some("no onions"));

        let mut ctx = context();
        ctx.notes = Some("   ".to_string());
        let submission = OrderSubmission::build(&draft, ctx).unwrap();
        assert!(submission.notes.is_none());
    }

    #[test]
    fn test_serialized_payload_shape() {
        let mut draft = OrderDraft::new();
        draft.add_item(item("a", "p1", 10.0, 2)).unwrap();
        draft.set_promo(discount_promo("SAVE10"));

        let submission = OrderSubmission::build(&draft, context()).unwrap();
        let json = serde_json::to_value(&submission).unwrap();

        assert_eq!(json["business_identifier"], "biz-1");
        assert_eq!(json["table_number"], "T7");
        assert_eq!(json["order_level_promo_code_name"], "SAVE10");
        assert_eq!(json["items"][0]["product_id"], "p1");
        // Unset optionals are omitted entirely
        assert!(json.get("customer_name").is_none());
        assert!(json.get("notes").is_none());
    }
}
