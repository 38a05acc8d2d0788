//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

/// Response for a price calculation
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuoteResponse {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_price: Decimal,
}

/// Confirmation returned after deleting a record
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn for_id(id: &str) -> Self {
        Self {
            message: format!("item {} deleted", id),
        }
    }
}

/// Error envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
