//! End-to-end flow over the wire shapes: build a draft, produce the
//! validation request, consume a backend validation response, price the
//! order and construct the submission payload.

use order_pricing::{
    AppliedPromoKind, LineItem, OrderDraft, OrderSubmission, PromoValidationRequest,
    PromoValidationResult, SubmissionContext,
};

fn line(id: &str, product_id: &str, price: f64, quantity: i32) -> LineItem {
    LineItem {
        id: id.to_string(),
        product_id: product_id.to_string(),
        name: format!("Item {}", id),
        price,
        quantity,
        selected_options: None,
    }
}

#[test]
fn order_percentage_full_flow() {
    let mut draft = OrderDraft::new();
    draft.add_item(line("espresso", "p-espresso", 2.5, 2)).unwrap();
    draft.add_item(line("cake", "p-cake", 15.0, 1)).unwrap();

    // Request payload for the validation endpoint
    let request = PromoValidationRequest::for_draft("save10", "cafe-42", &draft).unwrap();
    let request_json = serde_json::to_value(&request).unwrap();
    assert_eq!(request_json["code_name"], "SAVE10");
    assert_eq!(request_json["business_identifier"], "cafe-42");
    assert_eq!(request_json["current_order_subtotal"], "20.00");
    assert_eq!(request_json["order_items_context"][1]["product_id"], "p-cake");

    // Backend response, as it comes off the wire
    let response: PromoValidationResult = serde_json::from_str(
        r#"{
            "valid": true,
            "code_name": "SAVE10",
            "type": "ORDER_TOTAL_PERCENTAGE",
            "value": "10.00",
            "minimum_order_value_for_order_discount": "15.00"
        }"#,
    )
    .unwrap();
    draft.set_promo(response);

    let pricing = draft.pricing();
    assert_eq!(pricing.subtotal, 20.0);
    assert_eq!(pricing.total_discount_amount, 2.0);
    assert_eq!(pricing.final_total, 18.0);
    let applied = pricing.applied_promo.as_ref().unwrap();
    assert_eq!(applied.kind, AppliedPromoKind::OrderTotalPercentage);
    assert_eq!(applied.code_name.as_deref(), Some("SAVE10"));

    // Submission names the code so the backend can apply it authoritatively
    let submission = OrderSubmission::build(
        &draft,
        SubmissionContext {
            business_identifier: "cafe-42".to_string(),
            table_number: "T3".to_string(),
            customer_name: Some("Dana".to_string()),
            number_of_guests: Some(2),
            notes: Some(" table by the window ".to_string()),
        },
    )
    .unwrap();
    let submission_json = serde_json::to_value(&submission).unwrap();
    assert_eq!(submission_json["order_level_promo_code_name"], "SAVE10");
    assert_eq!(submission_json["notes"], "table by the window");
    assert_eq!(submission_json["items"][0]["product_id"], "p-espresso");
    assert_eq!(submission_json["items"][0]["quantity"], 2);

    // Removing the code reverts to undiscounted pricing
    draft.clear_promo();
    let reverted = draft.pricing();
    assert_eq!(reverted.total_discount_amount, 0.0);
    assert_eq!(reverted.final_total, 20.0);
    assert!(reverted.applied_promo.is_none());
}

#[test]
fn per_item_discount_full_flow() {
    let mut draft = OrderDraft::new();
    draft.add_item(line("soup", "p-soup", 5.0, 3)).unwrap();
    draft.add_item(line("bread", "p-bread", 2.0, 1)).unwrap();

    let response: PromoValidationResult = serde_json::from_str(
        r#"{
            "valid": true,
            "code_name": "SOUPDEAL",
            "type": "fixed_amount_product",
            "value": 100,
            "public_display_name": "Soup Special",
            "applicability": { "applicable_target_product_uuids": ["p-soup"] }
        }"#,
    )
    .unwrap();
    draft.set_promo(response);

    let pricing = draft.pricing();
    // The per-unit discount caps at the 5.00 unit price
    assert_eq!(pricing.subtotal, 17.0);
    assert_eq!(pricing.total_discount_amount, 15.0);
    assert_eq!(pricing.final_total, 2.0);

    let entry = &pricing.item_discounts["soup"];
    assert_eq!(entry.amount, 15.0);
    assert_eq!(entry.original_item_total, 15.0);
    assert_eq!(entry.description, "Soup Special");
    assert!(!pricing.item_discounts.contains_key("bread"));

    let applied = pricing.applied_promo.as_ref().unwrap();
    assert_eq!(applied.kind, AppliedPromoKind::ItemSpecificAggregate);

    // Serialized result carries the SCREAMING_SNAKE_CASE kind
    let pricing_json = serde_json::to_value(&pricing).unwrap();
    assert_eq!(
        pricing_json["applied_promo"]["kind"],
        "ITEM_SPECIFIC_AGGREGATE"
    );
    assert_eq!(pricing_json["item_discounts"]["soup"]["amount"], 15.0);
}

#[test]
fn failed_validation_degrades_to_no_discount() {
    let mut draft = OrderDraft::new();
    draft.add_item(line("espresso", "p-espresso", 2.5, 2)).unwrap();

    // The caller synthesizes this shape when the validation call fails
    let response: PromoValidationResult = serde_json::from_str(
        r#"{ "valid": false, "message": "expired", "error": true, "error_code": "EXPIRED" }"#,
    )
    .unwrap();
    draft.set_promo(response);

    let pricing = draft.pricing();
    assert_eq!(pricing.subtotal, 5.0);
    assert_eq!(pricing.total_discount_amount, 0.0);
    assert_eq!(pricing.final_total, 5.0);
    assert!(pricing.applied_promo.is_none());

    // And the submission must not name the failed code
    let submission = OrderSubmission::build(
        &draft,
        SubmissionContext {
            business_identifier: "cafe-42".to_string(),
            table_number: "T3".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(submission.order_level_promo_code_name.is_none());
}
