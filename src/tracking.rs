//! Tracking number and carrier extraction from shipping notifications
//!
//! Carriers are tried in a fixed order (USPS text, UPS text, tracking
//! links) and the first pattern to match anywhere in the text wins.

use crate::chain::{Matcher, Scan, first_match};
use crate::dom::HtmlDocument;
use crate::order_number;
use crate::types::{Carrier, EmailDocument, TrackingInfo, TrackingNumber};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::{error, info, warn};

static USPS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)USPS\s+Tracking[^0-9]*([0-9]+)",
        r"(?i)Tracking\s+Number[^0-9]*([0-9]+)",
        r"(?i)tracking\s+number\s*:\s*([0-9]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("USPS pattern is valid"))
    .collect()
});

static UPS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)UPS\s+Tracking[^0-9]*([0-9]+)",
        r"(?i)UPS[^0-9]*([0-9]{1,2}(?-u:[A-Z])[0-9]{10})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("UPS pattern is valid"))
    .collect()
});

static LINK_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{10,}").expect("link digit pattern is valid"));

static TRACKING_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href*="tracking"]"#).expect("tracking link selector is valid")
});

const MATCHERS: &[Matcher<TrackingNumber>] = &[
    Matcher {
        name: "USPS text",
        run: |scan| from_usps_text(scan.text()),
    },
    Matcher {
        name: "UPS text",
        run: |scan| from_ups_text(scan.text()),
    },
    Matcher {
        name: "tracking link",
        run: |scan| from_tracking_link(scan.html()),
    },
];

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|p| {
        p.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// USPS-style `Tracking Number: 9400...` phrasing
#[must_use]
pub fn from_usps_text(text: &str) -> Option<TrackingNumber> {
    first_capture(&USPS_PATTERNS, text).map(|n| TrackingNumber::new(n, Carrier::Usps))
}

/// `UPS Tracking ...` phrasing or a `1Z`-shaped code after a UPS mention
#[must_use]
pub fn from_ups_text(text: &str) -> Option<TrackingNumber> {
    first_capture(&UPS_PATTERNS, text).map(|n| TrackingNumber::new(n, Carrier::Ups))
}

/// Digits from the first link whose target mentions `tracking`
///
/// Only the first such link is considered; if it carries no run of ten or
/// more digits this is a miss even when later links would match.
#[must_use]
pub fn from_tracking_link(html: &HtmlDocument) -> Option<TrackingNumber> {
    let href = html.first_attr(&TRACKING_LINK_SELECTOR, "href")?;
    let number = LINK_DIGITS_REGEX.find(href)?;
    Some(TrackingNumber::new(number.as_str(), Carrier::from_link(href)))
}

/// Extract tracking details from a shipping notification
///
/// Returns `None` only when there is no document or no body. A usable
/// document always yields a [`TrackingInfo`], whose number and carrier are
/// both empty when nothing matched.
#[must_use]
pub fn extract_tracking(email: Option<&EmailDocument>) -> Option<TrackingInfo> {
    let Some(doc) = email else {
        error!("No email document provided for tracking extraction");
        return None;
    };

    if !doc.has_body() {
        warn!("Email has no body to extract tracking from");
        return None;
    }

    let order_number = order_number::from_subject(&doc.subject);
    let scan = Scan::new(doc);

    match first_match(MATCHERS, &scan) {
        Some((source, tracking)) => {
            info!(
                "Extracted tracking number {} ({}) from {source} for order {}",
                tracking.number,
                tracking.carrier,
                order_number.as_deref().unwrap_or("unknown"),
            );
            Some(TrackingInfo::new(order_number, Some(tracking)))
        }
        None => {
            warn!("Could not extract tracking number from email");
            Some(TrackingInfo::new(order_number, None))
        }
    }
}
