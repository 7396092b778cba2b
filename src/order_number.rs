//! Order number extraction from shipping notifications

use crate::chain::{Matcher, Scan, first_match};
use crate::dom::HtmlDocument;
use crate::types::EmailDocument;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::{error, info, warn};

static SUBJECT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#([0-9]+)\)").expect("subject pattern is valid"));

static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Order\s+#([0-9]+)").expect("body pattern is valid"));

static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{5,}").expect("digit pattern is valid"));

static ORDER_CLASS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="order"]"#).expect("order class selector is valid")
});

const MATCHERS: &[Matcher<String>] = &[
    Matcher {
        name: "subject",
        run: |scan| from_subject(scan.subject()),
    },
    Matcher {
        name: "body text",
        run: |scan| from_body_text(scan.text()),
    },
    Matcher {
        name: "order element",
        run: |scan| {
            if scan.doc.has_body() {
                from_order_element(scan.html())
            } else {
                None
            }
        },
    },
];

/// `12345` from a subject such as `Your Order Has Been Updated (#12345)`
#[must_use]
pub fn from_subject(subject: &str) -> Option<String> {
    SUBJECT_REGEX
        .captures(subject)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// `Order #12345` anywhere in the plain text, any case
#[must_use]
pub fn from_body_text(text: &str) -> Option<String> {
    BODY_REGEX
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// First run of five or more digits in the text of elements whose class
/// mentions `order`
#[must_use]
pub fn from_order_element(html: &HtmlDocument) -> Option<String> {
    let text = html.select_text(&ORDER_CLASS_SELECTOR);
    DIGIT_RUN_REGEX.find(&text).map(|m| m.as_str().to_string())
}

/// Extract the order number from a shipping notification
///
/// Tries the subject, then the body text, then order-classed elements.
/// A miss is logged at warning level and returned as `None`.
#[must_use]
pub fn extract_order_number(email: Option<&EmailDocument>) -> Option<String> {
    let Some(doc) = email else {
        error!("No email document provided for order number extraction");
        return None;
    };

    let scan = Scan::new(doc);
    if let Some((source, number)) = first_match(MATCHERS, &scan) {
        info!("Extracted order number {number} from {source}");
        return Some(number);
    }

    warn!("Could not extract order number from email");
    None
}
