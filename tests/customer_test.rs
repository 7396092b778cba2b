use order_email_extract::customer::{from_billing_section, from_greeting, from_thank_you};
use order_email_extract::dom::HtmlDocument;
use order_email_extract::*;
use std::time::{Duration, Instant};

const CONFIRMATION_EMAIL: &str = r"
  <html>
    <body>
      <h1>Order Confirmation</h1>
      <p>Thank you for your order!</p>
      <p>Order #12345</p>
      <div>
        <h2>Billing Address</h2>
        <p>John Smith</p>
        <p>123 Main St</p>
        <p>Anytown, CA 12345</p>
      </div>
      <div>
        <h2>Shipping Address</h2>
        <p>John Smith</p>
        <p>123 Main St</p>
        <p>Anytown, CA 12345</p>
      </div>
    </body>
  </html>
";

fn confirmation(body: &str) -> EmailDocument {
    EmailDocument::new("Your Countryside Pet Supply Order Confirmation (#12345)", body)
}

#[test]
fn test_billing_address_block() {
    let name = extract_customer_name(Some(&confirmation(CONFIRMATION_EMAIL)));
    assert_eq!(name.as_deref(), Some("John Smith"));
}

#[test]
fn test_billing_label_with_newlines() {
    let body = "<div>Billing Address\nJohn Smith\n123 Main St</div>";
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("John Smith")
    );
}

#[test]
fn test_billing_label_with_colon_in_table() {
    let html = HtmlDocument::parse(
        "<table><tr><td>Billing Address: Mary Major</td></tr><tr><td>1 Elm St</td></tr></table>",
    );
    assert_eq!(from_billing_section(&html).as_deref(), Some("Mary Major"));
}

#[test]
fn test_first_billing_block_wins() {
    let html = HtmlDocument::parse(
        "<div><h2>Billing Address</h2><p>First Person</p><p>1 St</p></div>\
         <div><h2>Billing Address</h2><p>Second Person</p><p>2 St</p></div>",
    );
    assert_eq!(from_billing_section(&html).as_deref(), Some("First Person"));
}

#[test]
fn test_billing_label_in_own_div_uses_outer_container() {
    let html = HtmlDocument::parse(
        "<table><tr><td><div>Billing Address</div><div>John Smith</div>\
         <div>123 Main St</div></td></tr></table>",
    );
    assert_eq!(from_billing_section(&html).as_deref(), Some("John Smith"));
}

#[test]
fn test_billing_name_cut_at_container_end() {
    let html = HtmlDocument::parse(
        "<div><div>Billing Address: Kim Park</div></div><section>Extra Words</section>",
    );
    assert_eq!(from_billing_section(&html).as_deref(), Some("Kim Park"));
}

#[test]
fn test_billing_label_split_across_nodes() {
    let html = HtmlDocument::parse("<div><b>Billing</b> Address <span>Lee Chan</span></div>");
    assert_eq!(from_billing_section(&html).as_deref(), Some("Lee Chan"));
}

#[test]
fn test_deeply_nested_billing_block() {
    let depth = 20_000;
    let body = format!(
        "{}Billing Address John Smith 1 Main St{}",
        "<div>x".repeat(depth),
        "</div>".repeat(depth)
    );

    let html = HtmlDocument::parse(&body);

    let started = Instant::now();
    let name = from_billing_section(&html);
    let elapsed = started.elapsed();

    assert_eq!(name.as_deref(), Some("John Smith"));
    assert!(elapsed < Duration::from_secs(1), "billing lookup took {elapsed:?}");
}

#[test]
fn test_billing_label_outside_container_falls_back() {
    let body = "<p>Billing Address</p><p>Ann Lee</p><p>Dear Sam Hill,</p>";

    assert_eq!(from_billing_section(&HtmlDocument::parse(body)), None);
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Sam Hill")
    );
}

#[test]
fn test_blank_billing_capture_falls_back() {
    let body = "<div><h2>Billing Address</h2>\n<p>123 Main</p></div><p>Dear Pat Quinn,</p>";

    assert_eq!(from_billing_section(&HtmlDocument::parse(body)), None);
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Pat Quinn")
    );
}

#[test]
fn test_dear_greeting() {
    let body = "<p>Dear Jane Doe,</p><p>Your order is confirmed.</p>";
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Jane Doe")
    );
}

#[test]
fn test_dear_tried_before_thank_you() {
    let body = "<p>Thank you, Bob Jones!</p><p>Dear Carol White,</p>";
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Carol White")
    );
}

#[test]
fn test_thank_you_line() {
    let body = "<p>Thank you, Alex Kim!</p><p>Order #12345</p>";
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Alex Kim")
    );
}

#[test]
fn test_text_matchers_trim() {
    assert_eq!(from_greeting("Dear   Ann  Lee  ,").as_deref(), Some("Ann  Lee"));
    assert_eq!(from_greeting("Dear customer").as_deref(), None);
    assert_eq!(from_thank_you("Thank you,  Rae Fox.").as_deref(), Some("Rae Fox"));
    assert_eq!(from_thank_you("Thank you for your order!"), None);
}

#[test]
fn test_not_found() {
    let body = "<p>Your order is confirmed.</p>";
    assert_eq!(extract_customer_name(Some(&confirmation(body))), None);
}

#[test]
fn test_missing_or_empty_document() {
    assert_eq!(extract_customer_name(None), None);
    assert_eq!(extract_customer_name(Some(&confirmation(""))), None);
    assert_eq!(extract_customer_name(normalize_json("{}").as_ref()), None);
}

#[test]
fn test_plain_text_confirmation() {
    let body = "Dear Jane Doe,\nThanks for shopping with us.";
    assert_eq!(
        extract_customer_name(Some(&confirmation(body))).as_deref(),
        Some("Jane Doe")
    );
}
