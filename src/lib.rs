// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Order Email Extraction
//!
//! Turns storefront shipping notifications and order confirmations into
//! the facts needed to fulfil an order: order number, tracking number with
//! carrier, and customer name.
//!
//! Every extractor is a pure function over an [`EmailDocument`] and treats
//! "not found" as an ordinary outcome rather than an error.
//!
//! # Example
//!
//! ```rust
//! use order_email_extract::{EmailDocument, Carrier, extract_order_number, extract_tracking};
//!
//! let email = EmailDocument::new(
//!     "Your Order Has Been Updated (#12345)",
//!     "<p>USPS Tracking Number: 9400123456789012345678</p>",
//! );
//!
//! assert_eq!(extract_order_number(Some(&email)).as_deref(), Some("12345"));
//!
//! let tracking = extract_tracking(Some(&email)).unwrap();
//! assert_eq!(tracking.tracking_number(), Some("9400123456789012345678"));
//! assert_eq!(tracking.carrier(), Some(Carrier::Usps));
//! ```

mod chain;
mod config;
pub mod customer;
pub mod dom;
mod envelope;
mod error;
mod fulfillment;
mod matching;
mod normalizer;
pub mod order_number;
mod summary;
pub mod tracking;
mod types;

pub use config::StorefrontConfig;
pub use customer::extract_customer_name;
pub use envelope::*;
pub use error::{ConfigError, ParseError, Result, WorkflowError};
pub use fulfillment::{Fulfillment, FulfillmentLine, FulfillmentRequest, ResolvedShipment};
pub use matching::*;
pub use normalizer::{
    decode_base64url, normalize, normalize_json, normalize_rfc822, normalize_value,
    try_normalize, try_normalize_rfc822,
};
pub use order_number::extract_order_number;
pub use summary::{ConfirmationEmailSummary, TrackingEmailSummary};
pub use tracking::extract_tracking;
pub use types::*;
