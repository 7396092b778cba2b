//! Storefront settings and the mailbox queries derived from them
//!
//! Subject templates use two placeholders: `{store}` for the store name and
//! `{order}` for an order number.

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};

const STORE_PLACEHOLDER: &str = "{store}";
const ORDER_PLACEHOLDER: &str = "{order}";

/// Store-specific subject templates and search limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Store name as it appears in notification subjects
    pub store_name: String,

    /// Subject of shipping notifications
    pub tracking_subject: String,

    /// Subject of order confirmations; must contain `{order}`
    pub confirmation_subject: String,

    /// Maximum unread tracking emails to fetch per run
    pub max_tracking_results: u32,

    /// Maximum confirmation emails to fetch per order
    pub max_confirmation_results: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_name: "Countryside Pet Supply".to_string(),
            tracking_subject: "Your {store} Order Has Been Updated".to_string(),
            confirmation_subject: "Your {store} Order Confirmation (#{order})".to_string(),
            max_tracking_results: 50,
            max_confirmation_results: 10,
        }
    }
}

impl StorefrontConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::EmptyStoreName);
        }
        if self.tracking_subject.trim().is_empty() {
            return Err(ConfigError::EmptyTemplate("tracking_subject"));
        }
        if self.confirmation_subject.trim().is_empty() {
            return Err(ConfigError::EmptyTemplate("confirmation_subject"));
        }
        if !self.confirmation_subject.contains(ORDER_PLACEHOLDER) {
            return Err(ConfigError::MissingOrderPlaceholder);
        }
        Ok(())
    }

    /// Shipping notification subject for this store
    #[must_use]
    pub fn tracking_subject(&self) -> String {
        self.render(&self.tracking_subject, "")
    }

    /// Confirmation subject for one order
    #[must_use]
    pub fn confirmation_subject(&self, order_number: &str) -> String {
        self.render(&self.confirmation_subject, order_number)
    }

    /// Search for unread shipping notifications
    #[must_use]
    pub fn tracking_query(&self) -> String {
        format!("is:unread subject:\"{}\"", self.tracking_subject())
    }

    /// Search for the confirmation of one order
    #[must_use]
    pub fn confirmation_query(&self, order_number: &str) -> String {
        format!("subject:\"{}\"", self.confirmation_subject(order_number))
    }

    #[must_use]
    pub fn is_tracking_subject(&self, subject: &str) -> bool {
        self.matches_template(&self.tracking_subject, subject)
    }

    /// Whether `subject` is a confirmation for any order number
    #[must_use]
    pub fn is_confirmation_subject(&self, subject: &str) -> bool {
        self.matches_template(&self.confirmation_subject, subject)
    }

    fn render(&self, template: &str, order_number: &str) -> String {
        template
            .replace(STORE_PLACEHOLDER, &self.store_name)
            .replace(ORDER_PLACEHOLDER, order_number)
    }

    // Literal text must match exactly; `{order}` stands for any ASCII digits.
    fn matches_template(&self, template: &str, subject: &str) -> bool {
        let pattern = template
            .split(ORDER_PLACEHOLDER)
            .map(|part| regex::escape(&part.replace(STORE_PLACEHOLDER, &self.store_name)))
            .collect::<Vec<_>>()
            .join("[0-9]+");

        Regex::new(&pattern).is_ok_and(|regex| regex.is_match(subject))
    }
}
