//! Matching extracted customer names against open store orders

use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Shortest search word, in characters, considered for a partial match
const MIN_PARTIAL_LEN: usize = 3;

/// An order line as reported by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub quantity: u32,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
}

impl LineItem {
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.fulfillment_status.as_deref() == Some("fulfilled")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: Option<String>,
}

/// An order record in the store's own shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOrder {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub total_price: Option<String>,
    pub customer: Option<StoreCustomer>,
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// An open order flattened for matching and review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfulfilledOrder {
    pub id: String,
    pub name: String,
    pub customer_name: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub total_price: Option<String>,
    pub line_items: Vec<LineItem>,
}

impl From<StoreOrder> for UnfulfilledOrder {
    fn from(order: StoreOrder) -> Self {
        let from_customer = order
            .customer
            .as_ref()
            .map(|c| {
                format!(
                    "{} {}",
                    c.first_name.as_deref().unwrap_or_default(),
                    c.last_name.as_deref().unwrap_or_default()
                )
                .trim()
                .to_string()
            })
            .unwrap_or_default();

        // Guest checkouts have no customer record
        let customer_name = if from_customer.is_empty() {
            order
                .shipping_address
                .and_then(|a| a.name)
                .unwrap_or_default()
        } else {
            from_customer
        };

        Self {
            id: order.id.to_string(),
            name: order.name,
            customer_name,
            email: order.email,
            created_at: order.created_at,
            total_price: order.total_price,
            line_items: order.line_items,
        }
    }
}

/// Whether an order's customer name plausibly refers to `search`
///
/// Exact after trimming and lowercasing, or any search word of at least
/// three letters overlapping (as substring either way) any order word.
#[must_use]
pub fn customer_name_matches(search: &str, candidate: &str) -> bool {
    let search = search.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();

    if candidate.is_empty() {
        return false;
    }
    if search == candidate {
        return true;
    }

    search
        .split_whitespace()
        .filter(|part| part.chars().count() >= MIN_PARTIAL_LEN)
        .any(|part| {
            candidate
                .split_whitespace()
                .any(|other| other.contains(part) || part.contains(other))
        })
}

/// Open orders whose customer matches the extracted name
#[must_use]
pub fn find_orders_for_customer<'a>(
    orders: &'a [UnfulfilledOrder],
    customer_name: &str,
) -> Vec<&'a UnfulfilledOrder> {
    if customer_name.trim().is_empty() {
        error!("No customer name provided for order search");
        return Vec::new();
    }

    let matches: Vec<_> = orders
        .iter()
        .filter(|o| customer_name_matches(customer_name, &o.customer_name))
        .collect();

    info!(
        "Found {} unfulfilled orders matching customer name: {customer_name}",
        matches.len()
    );
    matches
}
