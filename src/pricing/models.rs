//! Pricing domain models.
//!
//! `StoredPricing` uses sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Item type used when a request does not name one.
pub const STANDARD_ITEM_TYPE: &str = "standard";

/// Price rule for one organization, zone and item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub organization_id: String,
    pub item_id: String,
    pub zone: String,
    pub base_distance_in_km: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub km_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub fix_price: Decimal,
}

/// The distance and price terms of a record, without its identifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTerms {
    pub base_distance_in_km: i32,
    pub km_price: Decimal,
    pub fix_price: Decimal,
}

impl RateTerms {
    /// Bind these terms to the identifiers of a lookup key
    pub fn for_key(&self, key: &PricingKey) -> PricingRecord {
        PricingRecord {
            organization_id: key.organization_id.clone(),
            item_id: key.item_type.clone(),
            zone: key.zone.clone(),
            base_distance_in_km: self.base_distance_in_km,
            km_price: self.km_price,
            fix_price: self.fix_price,
        }
    }
}

/// Lookup key for a price rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PricingKey {
    pub organization_id: String,
    pub zone: String,
    pub item_type: String,
}

impl PricingKey {
    /// Build a key, treating a missing or blank item type as `standard`
    pub fn new(organization_id: &str, zone: &str, item_type: Option<&str>) -> Self {
        let item_type = item_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(STANDARD_ITEM_TYPE);

        Self {
            organization_id: organization_id.to_string(),
            zone: zone.to_string(),
            item_type: item_type.to_string(),
        }
    }
}

/// Pricing row from the pricings table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredPricing {
    pub id: Uuid,
    pub organization_id: String,
    pub item_id: String,
    pub zone: String,
    pub base_distance_in_km: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub km_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub fix_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredPricing> for PricingRecord {
    fn from(row: StoredPricing) -> Self {
        Self {
            organization_id: row.organization_id,
            item_id: row.item_id,
            zone: row.zone,
            base_distance_in_km: row.base_distance_in_km,
            km_price: row.km_price,
            fix_price: row.fix_price,
        }
    }
}

/// Catalog item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
}

impl Item {
    /// Fixed item returned by the placeholder catalog
    pub fn placeholder() -> Self {
        Self {
            id: "01".to_string(),
            item_type: "perishable".to_string(),
            description: "dummyItem".to_string(),
        }
    }
}

/// Anything the catalog endpoints hand back
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Stored(StoredPricing),
    Record(PricingRecord),
    Item(Item),
}
