//! Pricing service functions.
//!
//! Glue between a validated request, the lookup seam and the pure calculator.

use rust_decimal::Decimal;

use crate::error::{AppError, Result};

use super::calculators;
use super::lookup::PricingLookup;
use super::models::PricingRecord;
use super::requests::QuoteRequest;

/// Quote a delivery price.
///
/// Resolves the pricing record for the request's key and applies the
/// calculator to it. A missing record is `AppError::NotFound`; a record that
/// breaks the non-negative invariant is an internal error, since it can only
/// come from a misconfigured store.
pub async fn quote_price(lookup: &dyn PricingLookup, request: &QuoteRequest) -> Result<Decimal> {
    let record = lookup
        .find(&request.key)
        .await?
        .ok_or(AppError::NotFound)?;

    check_record(&record)?;

    let total_price = calculators::quote(&record, request.total_distance);

    tracing::debug!(
        organization_id = %record.organization_id,
        zone = %record.zone,
        item_id = %record.item_id,
        total_distance = %request.total_distance,
        total_price = %total_price,
        "Quoted delivery price"
    );

    Ok(total_price)
}

fn check_record(record: &PricingRecord) -> Result<()> {
    if record.base_distance_in_km < 0
        || record.km_price < Decimal::ZERO
        || record.fix_price < Decimal::ZERO
    {
        return Err(AppError::Internal(format!(
            "pricing record for {}/{}/{} has negative terms",
            record.organization_id, record.zone, record.item_id
        )));
    }
    Ok(())
}
