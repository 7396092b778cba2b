//! Error types for normalization and fulfillment assembly

use thiserror::Error;

/// Errors that can occur while normalizing a raw envelope
///
/// The public normalizer API degrades these to `None`; they are only
/// surfaced through [`crate::try_normalize`].
#[derive(Error, Debug)]
pub enum ParseError {
    /// Envelope JSON did not match the expected shape
    #[error("Malformed envelope: {0}")]
    Structure(String),

    /// Envelope carries neither a payload nor a raw message
    #[error("Envelope has no payload")]
    MissingPayload,

    /// Body data was not valid base64url
    #[error("Failed to decode body data: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded body was not valid UTF-8
    #[error("Body is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Raw RFC 822 message could not be parsed
    #[error("Failed to parse raw message: {0}")]
    RawMessage(#[from] mailparse::MailParseError),
}

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// A required fact was missing when assembling a fulfillment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Could not extract order number from email")]
    MissingOrderNumber,

    #[error("Could not extract tracking number from email")]
    MissingTrackingNumber,

    #[error("No confirmation email found for this order number")]
    MissingConfirmation,

    #[error("Could not extract customer name from confirmation email")]
    MissingCustomerName,

    #[error("No unfulfilled line items found")]
    NothingToFulfill,
}

/// Storefront configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("Store name must not be empty")]
    EmptyStoreName,

    #[error("Subject template {0} must not be empty")]
    EmptyTemplate(&'static str),

    #[error("Confirmation subject template must contain {{order}}")]
    MissingOrderPlaceholder,
}
