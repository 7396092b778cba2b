//! Per-email records for listing shipping and confirmation emails

use crate::customer::extract_customer_name;
use crate::envelope::RawEnvelope;
use crate::normalizer::normalize;
use crate::order_number::extract_order_number;
use crate::tracking::extract_tracking;
use crate::types::{EmailDocument, TrackingInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A shipping notification with its extracted order and tracking details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEmailSummary {
    pub id: Option<String>,
    pub thread_id: Option<String>,
    pub subject: String,
    pub date: Option<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub from: Option<String>,
    pub order_number: Option<String>,
    pub tracking_info: Option<TrackingInfo>,
}

impl TrackingEmailSummary {
    #[must_use]
    pub fn from_document(doc: &EmailDocument) -> Self {
        Self {
            id: doc.id.clone(),
            thread_id: doc.thread_id.clone(),
            subject: doc.subject.clone(),
            date: doc.header("date").map(str::to_string),
            received_at: doc.date(),
            from: doc.sender().map(str::to_string),
            order_number: extract_order_number(Some(doc)),
            tracking_info: extract_tracking(Some(doc)),
        }
    }

    /// `None` when the envelope does not normalize
    #[must_use]
    pub fn from_envelope(envelope: &RawEnvelope) -> Option<Self> {
        normalize(envelope).map(|doc| Self::from_document(&doc))
    }

    /// Whether both facts needed for a fulfillment were found
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.order_number.is_some()
            && self
                .tracking_info
                .as_ref()
                .is_some_and(TrackingInfo::has_tracking)
    }
}

/// An order confirmation with the extracted customer name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationEmailSummary {
    pub id: Option<String>,
    pub thread_id: Option<String>,
    pub subject: String,
    pub date: Option<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub from: Option<String>,
    pub order_number: Option<String>,
    pub customer_name: Option<String>,
}

impl ConfirmationEmailSummary {
    #[must_use]
    pub fn from_document(doc: &EmailDocument) -> Self {
        Self {
            id: doc.id.clone(),
            thread_id: doc.thread_id.clone(),
            subject: doc.subject.clone(),
            date: doc.header("date").map(str::to_string),
            received_at: doc.date(),
            from: doc.sender().map(str::to_string),
            order_number: extract_order_number(Some(doc)),
            customer_name: extract_customer_name(Some(doc)),
        }
    }

    #[must_use]
    pub fn from_envelope(envelope: &RawEnvelope) -> Option<Self> {
        normalize(envelope).map(|doc| Self::from_document(&doc))
    }
}
