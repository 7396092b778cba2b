//! Assembling extracted facts into a fulfillment update

use crate::customer::extract_customer_name;
use crate::error::WorkflowError;
use crate::matching::LineItem;
use crate::order_number::extract_order_number;
use crate::tracking::extract_tracking;
use crate::types::{EmailDocument, TrackingInfo};
use serde::Serialize;
use tracing::{error, info, warn};

/// A shipping notification paired with its order confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedShipment {
    pub order_number: String,
    pub tracking_info: TrackingInfo,
    pub customer_name: String,
}

impl ResolvedShipment {
    /// Extract everything a fulfillment needs, failing on the first missing fact
    ///
    /// `confirmation` is `None` when no confirmation email was found for
    /// the order.
    pub fn resolve(
        tracking_email: &EmailDocument,
        confirmation: Option<&EmailDocument>,
    ) -> Result<Self, WorkflowError> {
        let order_number =
            extract_order_number(Some(tracking_email)).ok_or(WorkflowError::MissingOrderNumber)?;

        let tracking_info = extract_tracking(Some(tracking_email))
            .filter(TrackingInfo::has_tracking)
            .ok_or(WorkflowError::MissingTrackingNumber)?;

        let confirmation = confirmation.ok_or(WorkflowError::MissingConfirmation)?;
        let customer_name =
            extract_customer_name(Some(confirmation)).ok_or(WorkflowError::MissingCustomerName)?;

        info!("Resolved order {order_number} for {customer_name}");

        Ok(Self {
            order_number,
            tracking_info,
            customer_name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfillmentLine {
    pub id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fulfillment {
    pub line_items: Vec<FulfillmentLine>,
    pub tracking_number: String,
    pub tracking_company: String,
    pub notify_customer: bool,
}

/// Body of a fulfillment create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfillmentRequest {
    pub fulfillment: Fulfillment,
}

impl FulfillmentRequest {
    /// Build a request covering every line not yet fulfilled
    pub fn build(
        tracking: &TrackingInfo,
        line_items: &[LineItem],
        notify_customer: bool,
    ) -> Result<Self, WorkflowError> {
        let Some(tracking_number) = tracking.tracking_number() else {
            error!("No tracking information provided for fulfillment");
            return Err(WorkflowError::MissingTrackingNumber);
        };

        let lines: Vec<FulfillmentLine> = line_items
            .iter()
            .filter(|item| !item.is_fulfilled())
            .map(|item| FulfillmentLine {
                id: item.id,
                quantity: item.quantity,
            })
            .collect();

        if lines.is_empty() {
            warn!("No unfulfilled line items to fulfill");
            return Err(WorkflowError::NothingToFulfill);
        }

        Ok(Self {
            fulfillment: Fulfillment {
                line_items: lines,
                tracking_number: tracking_number.to_string(),
                tracking_company: tracking.tracking_company().to_string(),
                notify_customer,
            },
        })
    }
}
