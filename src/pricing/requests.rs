//! Request DTOs for pricing API endpoints.
//!
//! Fields are optional at the serde level so that a missing field is reported
//! by name through `validate` instead of as a generic parse failure.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::{AppError, Result};

use super::models::{PricingKey, PricingRecord};

/// Rates are stored as NUMERIC(12, 4)
pub const RATE_MAX_SCALE: u32 = 4;
pub const RATE_LIMIT: Decimal = dec!(100000000);

/// Request to calculate a delivery price
#[derive(Debug, Default, Deserialize)]
pub struct CalculatePriceRequest {
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub total_distance: Option<Decimal>,
    #[serde(default)]
    pub item_type: Option<String>,
}

/// A validated price calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub key: PricingKey,
    pub total_distance: Decimal,
}

impl CalculatePriceRequest {
    pub fn validate(&self) -> Result<QuoteRequest> {
        let organization_id = require_text("organization_id", self.organization_id.as_deref())?;
        let zone = require_text("zone", self.zone.as_deref())?;
        let total_distance = require_non_negative("total_distance", self.total_distance)?;

        Ok(QuoteRequest {
            key: PricingKey::new(organization_id, zone, self.item_type.as_deref()),
            total_distance,
        })
    }
}

/// Query parameters for fetching a pricing record
#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
}

impl PricingQuery {
    pub fn validate(&self) -> Result<PricingKey> {
        let organization_id = require_text("organization_id", self.organization_id.as_deref())?;
        let zone = require_text("zone", self.zone.as_deref())?;
        Ok(PricingKey::new(organization_id, zone, self.item_type.as_deref()))
    }
}

/// Body for creating or updating a pricing record
#[derive(Debug, Default, Deserialize)]
pub struct PricingPayload {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub base_distance_in_km: Option<i64>,
    #[serde(default)]
    pub km_price: Option<Decimal>,
    #[serde(default)]
    pub fix_price: Option<Decimal>,
}

impl PricingPayload {
    pub fn validate(&self) -> Result<PricingRecord> {
        let base_distance_in_km = match self.base_distance_in_km {
            None => return Err(missing("base_distance_in_km")),
            Some(d) if d < 0 => {
                return Err(AppError::Validation(
                    "base_distance_in_km must not be negative".to_string(),
                ))
            }
            Some(d) => i32::try_from(d).map_err(|_| {
                AppError::Validation("base_distance_in_km is out of range".to_string())
            })?,
        };

        Ok(PricingRecord {
            organization_id: require_text("organization_id", self.organization_id.as_deref())?
                .to_string(),
            item_id: require_text("item_id", self.item_id.as_deref())?.to_string(),
            zone: require_text("zone", self.zone.as_deref())?.to_string(),
            base_distance_in_km,
            km_price: require_rate("km_price", self.km_price)?,
            fix_price: require_rate("fix_price", self.fix_price)?,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("{} is required", field))
}

fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

fn require_non_negative(field: &str, value: Option<Decimal>) -> Result<Decimal> {
    let value = value.ok_or_else(|| missing(field))?;
    if value < Decimal::ZERO {
        return Err(AppError::Validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

fn require_rate(field: &str, value: Option<Decimal>) -> Result<Decimal> {
    let value = require_non_negative(field, value)?;
    if value.normalize().scale() > RATE_MAX_SCALE {
        return Err(AppError::Validation(format!(
            "{} must have at most {} decimal places",
            field, RATE_MAX_SCALE
        )));
    }
    if value >= RATE_LIMIT {
        return Err(AppError::Validation(format!(
            "{} must be less than {}",
            field, RATE_LIMIT
        )));
    }
    Ok(value)
}
