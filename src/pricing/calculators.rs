//! Core pricing calculation functions.
//!
//! Pure functions for delivery price math - no database access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::PricingRecord;

/// Number of fractional digits in a quoted price.
pub const MONEY_SCALE: u32 = 2;

/// Round an amount expressed in cents to a whole number of cents.
///
/// Midpoints round away from zero, which is plain half-up rounding for the
/// non-negative amounts the API accepts.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use delivery_pricing::pricing::round_cents;
///
/// assert_eq!(round_cents(dec!(1000.5)), dec!(1001));
/// assert_eq!(round_cents(dec!(1000.49)), dec!(1000));
/// assert_eq!(round_cents(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_cents(cents: Decimal) -> Decimal {
    cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn to_cents(amount: Decimal) -> Decimal {
    round_cents(amount.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Calculate the total delivery price.
///
/// The fixed price and the marginal distance charge are each converted to
/// whole cents before they are added, then the sum is converted back to
/// currency units with exactly two fractional digits. The marginal charge
/// only applies when `total_distance` is strictly greater than
/// `base_distance`.
///
/// The function never fails: inputs are not validated here and arithmetic
/// saturates at the limits of `Decimal`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use delivery_pricing::pricing::calculate_price;
///
/// assert_eq!(calculate_price(dec!(5), dec!(10), dec!(1.5), dec!(10)), dec!(17.50));
/// assert_eq!(calculate_price(dec!(5), dec!(5), dec!(1.5), dec!(10)), dec!(10.00));
/// ```
pub fn calculate_price(
    base_distance: Decimal,
    total_distance: Decimal,
    km_price: Decimal,
    fix_price: Decimal,
) -> Decimal {
    let mut cents = to_cents(fix_price);

    if total_distance > base_distance {
        let extra_km = total_distance.saturating_sub(base_distance);
        cents = cents.saturating_add(to_cents(extra_km.saturating_mul(km_price)));
    }

    let mut total = cents / Decimal::ONE_HUNDRED;
    total.rescale(MONEY_SCALE);
    total
}

/// Calculate the price of a delivery of `total_distance` km under `record`.
pub fn quote(record: &PricingRecord, total_distance: Decimal) -> Decimal {
    calculate_price(
        Decimal::from(record.base_distance_in_km),
        total_distance,
        record.km_price,
        record.fix_price,
    )
}
