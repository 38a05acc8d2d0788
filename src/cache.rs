//! In-memory caching using moka
//!
//! Holds resolved pricing records so repeated quotes for the same
//! organization, zone and item type skip the store.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::pricing::models::{PricingKey, PricingRecord};

const PRICING_CAPACITY: u64 = 10_000;

/// Application cache holding resolved pricing records
#[derive(Clone)]
pub struct AppCache {
    /// Pricing records (lookup key -> record)
    pub pricing: Cache<PricingKey, Arc<PricingRecord>>,
}

impl AppCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            pricing: Cache::builder()
                .max_capacity(PRICING_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pricing_size: self.pricing.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.pricing.invalidate_all();
        info!("All caches invalidated");
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub pricing_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> PricingRecord {
        PricingRecord {
            organization_id: "org".to_string(),
            item_id: "standard".to_string(),
            zone: "z1".to_string(),
            base_distance_in_km: 5,
            km_price: dec!(1),
            fix_price: dec!(10),
        }
    }

    #[tokio::test]
    async fn test_insert_and_invalidate() {
        let cache = AppCache::new(Duration::from_secs(60));
        let key = PricingKey::new("org", "z1", None);

        cache.pricing.insert(key.clone(), Arc::new(record())).await;
        assert!(cache.pricing.get(&key).await.is_some());

        cache.invalidate_all();
        assert!(cache.pricing.get(&key).await.is_none());
    }
}
