use order_email_extract::dom::HtmlDocument;
use order_email_extract::order_number::{from_body_text, from_order_element, from_subject};
use order_email_extract::*;

#[test]
fn test_subject_pattern() {
    let email = EmailDocument::new("Your Order Has Been Updated (#12345)", "");
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("12345"));
}

#[test]
fn test_subject_wins_over_body() {
    let email = EmailDocument::new(
        "Shipped (#111)",
        "<p>Order #222</p><span class=\"order-number\">333333</span>",
    );
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("111"));
}

#[test]
fn test_body_text_fallback() {
    let email = EmailDocument::new(
        "Your order has shipped",
        "<p>Good news! Your ORDER   #98765 is on its way.</p>",
    );
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("98765"));
}

#[test]
fn test_order_element_fallback() {
    let email = EmailDocument::new(
        "Shipping update",
        "<table><tr><td class=\"header-order-ref\">Ref: 4455667</td></tr></table>",
    );
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("4455667"));
}

#[test]
fn test_order_element_needs_five_digits() {
    let html = HtmlDocument::parse("<div class=\"order\">No. 1234</div>");
    assert_eq!(from_order_element(&html), None);

    let html = HtmlDocument::parse("<div class=\"summary\">55555</div>");
    assert_eq!(from_order_element(&html), None);
}

#[test]
fn test_order_elements_are_concatenated() {
    let html = HtmlDocument::parse(
        "<p class=\"order-label\">Order</p><p class=\"order-value\">77777</p>",
    );
    assert_eq!(from_order_element(&html).as_deref(), Some("77777"));
}

#[test]
fn test_subject_matcher_requires_hash_in_parentheses() {
    assert_eq!(from_subject("Order (#42) shipped").as_deref(), Some("42"));
    assert_eq!(from_subject("Order #42 shipped"), None);
    assert_eq!(from_subject("Order (42) shipped"), None);
    assert_eq!(from_subject(""), None);
}

#[test]
fn test_body_matcher_is_case_insensitive() {
    assert_eq!(from_body_text("order #5").as_deref(), Some("5"));
    assert_eq!(from_body_text("ORDER\n#6").as_deref(), Some("6"));
    assert_eq!(from_body_text("order number 7"), None);
}

#[test]
fn test_missing_subject_falls_through_to_body() {
    let email = EmailDocument::new("", "Order #31337");
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("31337"));
}

#[test]
fn test_subject_only_without_body() {
    let email = EmailDocument::new("Update (#808)", "");
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("808"));
}

#[test]
fn test_only_ascii_digits_count() {
    assert_eq!(from_subject("Update (#١٢٣٤٥)"), None);
    assert_eq!(from_body_text("Order #١٢٣٤٥"), None);

    let html = HtmlDocument::parse("<span class=\"order-id\">١٢٣٤٥٦</span>");
    assert_eq!(from_order_element(&html), None);

    let email = EmailDocument::new("Update (#١٢٣٤٥)", "<p>Order #678</p>");
    assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("678"));
}

#[test]
fn test_not_found() {
    let email = EmailDocument::new("Hello", "<p>Nothing useful here</p>");
    assert_eq!(extract_order_number(Some(&email)), None);
}

#[test]
fn test_missing_or_empty_document() {
    assert_eq!(extract_order_number(None), None);
    assert_eq!(extract_order_number(Some(&EmailDocument::default())), None);
    assert_eq!(extract_order_number(normalize_json("{}").as_ref()), None);
}

#[test]
fn test_idempotent() {
    let email = EmailDocument::new("", "<span class=\"order\">1234567</span>");
    let first = extract_order_number(Some(&email));
    let second = extract_order_number(Some(&email));
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("1234567"));
}
