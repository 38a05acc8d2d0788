//! Delivery pricing module.
//!
//! A quote is a fixed price plus a per-kilometer charge for the distance
//! beyond a base threshold. Price rules come from a `PricingLookup`, records
//! are managed through a `PricingCatalog`.

pub mod calculators;
pub mod catalog;
pub mod lookup;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod store;

// Re-export commonly used items
pub use calculators::{calculate_price, round_cents};
pub use catalog::{PlaceholderCatalog, PricingCatalog};
pub use lookup::{CachedPricingLookup, PricingLookup, StaticPricingLookup};
pub use models::{PricingKey, PricingRecord};
pub use routes::router;
pub use store::PgPricingStore;
