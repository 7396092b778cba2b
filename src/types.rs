//! Core types shared by the normalizer and the extractors

use crate::dom::HtmlDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A normalized email, ready for extraction
///
/// The body and its text rendering are only set together, so `text` always
/// describes `body`. Deserializing ignores any stored `text` and renders it
/// again from `body`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDocument")]
pub struct EmailDocument {
    /// Mailbox message id
    pub id: Option<String>,

    /// Mailbox thread id
    pub thread_id: Option<String>,

    /// Subject line (empty when the header is absent)
    pub subject: String,

    body: String,
    text: String,

    /// Headers keyed by lowercased name
    pub headers: HashMap<String, String>,
}

impl EmailDocument {
    /// Build a document from a subject and body, deriving the text rendering
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_headers(subject, body, HashMap::new())
    }

    #[must_use]
    pub fn with_headers(
        subject: impl Into<String>,
        body: impl Into<String>,
        headers: HashMap<String, String>,
    ) -> Self {
        let body = body.into();
        let text = if body.is_empty() {
            String::new()
        } else {
            HtmlDocument::parse(&body).body_text()
        };

        Self {
            id: None,
            thread_id: None,
            subject: subject.into(),
            body,
            text,
            headers,
        }
    }

    /// Attach mailbox identifiers
    #[must_use]
    pub fn with_ids(mut self, id: Option<String>, thread_id: Option<String>) -> Self {
        self.id = id;
        self.thread_id = thread_id;
        self
    }

    /// Look up a header case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Raw `From` header value
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.header("from")
    }

    /// Parsed `Date` header, `None` when absent or not RFC 2822
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.header("date")
            .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Decoded body with HTML markup preserved
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Plain-text rendering of the body, markup stripped
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether there is a body to extract from
    ///
    /// A whitespace-only body counts: extractors search it and simply find
    /// nothing.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

#[derive(Deserialize)]
struct StoredDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    thread_id: Option<String>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    headers: HashMap<String, String>,
}

impl From<StoredDocument> for EmailDocument {
    fn from(stored: StoredDocument) -> Self {
        Self::with_headers(stored.subject, stored.body, stored.headers)
            .with_ids(stored.id, stored.thread_id)
    }
}

/// Shipping carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "USPS")]
    Usps,
    #[serde(rename = "UPS")]
    Ups,
    Other,
}

impl Carrier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usps => "USPS",
            Self::Ups => "UPS",
            Self::Other => "Other",
        }
    }

    /// Infer a carrier from a tracking link target
    ///
    /// This is a plain substring test, so any URL containing `ups`
    /// (e.g. `pickups`) is classified as UPS.
    #[must_use]
    pub fn from_link(href: &str) -> Self {
        if href.contains("usps") {
            Self::Usps
        } else if href.contains("ups") {
            Self::Ups
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracking number together with the carrier it was matched for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingNumber {
    pub number: String,
    pub carrier: Carrier,
}

impl TrackingNumber {
    pub fn new(number: impl Into<String>, carrier: Carrier) -> Self {
        Self {
            number: number.into(),
            carrier,
        }
    }
}

/// Result of the tracking extractor
///
/// A carrier is only ever present alongside a tracking number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    order_number: Option<String>,
    tracking_number: Option<String>,
    carrier: Option<Carrier>,
}

impl TrackingInfo {
    #[must_use]
    pub fn new(order_number: Option<String>, tracking: Option<TrackingNumber>) -> Self {
        let (tracking_number, carrier) = match tracking {
            Some(t) => (Some(t.number), Some(t.carrier)),
            None => (None, None),
        };

        Self {
            order_number,
            tracking_number,
            carrier,
        }
    }

    #[must_use]
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    #[must_use]
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    #[must_use]
    pub const fn carrier(&self) -> Option<Carrier> {
        self.carrier
    }

    /// Carrier name for fulfillment records, `Other` when unknown
    #[must_use]
    pub fn tracking_company(&self) -> &'static str {
        self.carrier.unwrap_or(Carrier::Other).as_str()
    }

    #[must_use]
    pub const fn has_tracking(&self) -> bool {
        self.tracking_number.is_some()
    }
}
