//! Pricing lookup: resolving the price rule for a quote.
//!
//! Handlers only see `dyn PricingLookup`, so the in-memory table, the
//! Postgres store and the caching wrapper are interchangeable.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::AppCache;
use crate::error::Result;

use super::models::{PricingKey, PricingRecord, RateTerms};

/// Rate for perishable goods
pub const PERISHABLE_TERMS: RateTerms = RateTerms {
    base_distance_in_km: 5,
    km_price: dec!(1.5),
    fix_price: dec!(10),
};

/// Rate for everything else
pub const STANDARD_TERMS: RateTerms = RateTerms {
    base_distance_in_km: 5,
    km_price: dec!(1.0),
    fix_price: dec!(10),
};

/// Resolves the pricing record for an organization, zone and item type.
///
/// `Ok(None)` means no rule applies; the HTTP layer turns it into a 404.
#[async_trait]
pub trait PricingLookup: Send + Sync {
    async fn find(&self, key: &PricingKey) -> Result<Option<PricingRecord>>;

    /// Short name of the backing store, reported by the health endpoint
    fn backend(&self) -> &'static str;
}

/// In-memory rule table.
///
/// Resolution order: exact key, then item type, then the fallback rate.
#[derive(Debug, Clone)]
pub struct StaticPricingLookup {
    entries: HashMap<PricingKey, RateTerms>,
    item_types: HashMap<String, RateTerms>,
    fallback: Option<RateTerms>,
}

impl StaticPricingLookup {
    /// An empty table: every lookup is a miss
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            item_types: HashMap::new(),
            fallback: None,
        }
    }

    /// The built-in table: perishable goods at 1.5/km, everything else at 1.0/km
    pub fn placeholder() -> Self {
        Self::new()
            .with_item_type("perishable", PERISHABLE_TERMS)
            .with_fallback(STANDARD_TERMS)
    }

    pub fn with_entry(mut self, key: PricingKey, terms: RateTerms) -> Self {
        self.entries.insert(key, terms);
        self
    }

    pub fn with_item_type(mut self, item_type: &str, terms: RateTerms) -> Self {
        self.item_types.insert(item_type.to_string(), terms);
        self
    }

    pub fn with_fallback(mut self, terms: RateTerms) -> Self {
        self.fallback = Some(terms);
        self
    }

    pub fn resolve(&self, key: &PricingKey) -> Option<PricingRecord> {
        self.entries
            .get(key)
            .or_else(|| self.item_types.get(&key.item_type))
            .or(self.fallback.as_ref())
            .map(|terms| terms.for_key(key))
    }
}

impl Default for StaticPricingLookup {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[async_trait]
impl PricingLookup for StaticPricingLookup {
    async fn find(&self, key: &PricingKey) -> Result<Option<PricingRecord>> {
        Ok(self.resolve(key))
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}

/// Wraps another lookup and keeps found records in the application cache.
///
/// Misses are not cached so that a newly created rule is visible immediately.
pub struct CachedPricingLookup {
    inner: Arc<dyn PricingLookup>,
    cache: AppCache,
}

impl CachedPricingLookup {
    pub fn new(inner: Arc<dyn PricingLookup>, cache: AppCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl PricingLookup for CachedPricingLookup {
    async fn find(&self, key: &PricingKey) -> Result<Option<PricingRecord>> {
        if let Some(cached) = self.cache.pricing.get(key).await {
            tracing::debug!("Cache HIT for pricing: {:?}", key);
            return Ok(Some((*cached).clone()));
        }

        tracing::debug!("Cache MISS for pricing: {:?}", key);
        let found = self.inner.find(key).await?;
        if let Some(record) = &found {
            self.cache
                .pricing
                .insert(key.clone(), Arc::new(record.clone()))
                .await;
        }
        Ok(found)
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}
