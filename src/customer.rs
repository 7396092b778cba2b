//! Customer name extraction from order confirmations

use crate::chain::{Matcher, Scan, first_match};
use crate::dom::{self, HtmlDocument};
use crate::types::EmailDocument;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{error, info, warn};

const BILLING_LABEL: &str = "Billing Address";

// Applied right after the label, so the name run is found once for the
// whole document rather than once per container.
static BILLING_TAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:?\s*([A-Za-z\s]+)").expect("billing pattern is valid"));

static DEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Dear\s+([A-Za-z\s]+),").expect("greeting pattern is valid"));

static THANK_YOU_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Thank you,\s+([A-Za-z\s]+)").expect("thank-you pattern is valid")
});

const MATCHERS: &[Matcher<String>] = &[
    Matcher {
        name: "billing address",
        run: |scan| from_billing_section(scan.html()),
    },
    Matcher {
        name: "greeting",
        run: |scan| from_greeting(scan.text()),
    },
    Matcher {
        name: "thank-you line",
        run: |scan| from_thank_you(scan.text()),
    },
];

fn trimmed_capture(regex: &Regex, text: &str) -> Option<String> {
    let name = regex.captures(text)?.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Name following the `Billing Address` label inside an enclosing table,
/// div or section
///
/// The nearest container is tried first. When the name lies outside it, as
/// with a label in its own `<div>`, the next container out is tried. With
/// several billing blocks the first one in the document is used.
#[must_use]
pub fn from_billing_section(html: &HtmlDocument) -> Option<String> {
    let scope = html.enclosing(BILLING_LABEL, dom::is_section_container)?;
    let tail = scope.label.end;
    let capture = BILLING_TAIL_REGEX.captures(&scope.text[tail..])?.get(1)?;
    let name = tail + capture.start()..tail + capture.end();

    scope.containers.iter().find_map(|(_, section)| {
        let end = name.end.min(section.end);
        let found = scope.text.get(name.start..end)?.trim();
        (!found.is_empty()).then(|| found.to_string())
    })
}

/// `Dear Jane Doe,`
#[must_use]
pub fn from_greeting(text: &str) -> Option<String> {
    trimmed_capture(&DEAR_REGEX, text)
}

/// `Thank you, Jane Doe`
#[must_use]
pub fn from_thank_you(text: &str) -> Option<String> {
    trimmed_capture(&THANK_YOU_REGEX, text)
}

/// Extract the purchaser's name from an order confirmation
///
/// Tries the billing address block, then a `Dear` greeting, then a
/// `Thank you,` line.
#[must_use]
pub fn extract_customer_name(email: Option<&EmailDocument>) -> Option<String> {
    let Some(doc) = email else {
        error!("No email document provided for customer name extraction");
        return None;
    };

    if !doc.has_body() {
        warn!("Confirmation email has no body");
        return None;
    }

    let scan = Scan::new(doc);
    if let Some((source, name)) = first_match(MATCHERS, &scan) {
        info!("Extracted customer name {name} from {source}");
        return Some(name);
    }

    warn!("Could not extract customer name from confirmation email");
    None
}
