//! Pricing catalog: the record management side of the API.

use async_trait::async_trait;

use crate::error::Result;

use super::models::{CatalogEntry, Item, PricingRecord};
use super::requests::PricingQuery;

/// Create, read, update and delete pricing records.
#[async_trait]
pub trait PricingCatalog: Send + Sync {
    async fn create(&self, record: PricingRecord) -> Result<CatalogEntry>;

    async fn get(&self, query: &PricingQuery) -> Result<CatalogEntry>;

    async fn update(&self, id: &str, record: PricingRecord) -> Result<CatalogEntry>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Catalog that stores nothing.
///
/// Writes echo the validated record back, reads return a fixed dummy item.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCatalog;

#[async_trait]
impl PricingCatalog for PlaceholderCatalog {
    async fn create(&self, record: PricingRecord) -> Result<CatalogEntry> {
        Ok(CatalogEntry::Record(record))
    }

    async fn get(&self, _query: &PricingQuery) -> Result<CatalogEntry> {
        Ok(CatalogEntry::Item(Item::placeholder()))
    }

    async fn update(&self, _id: &str, record: PricingRecord) -> Result<CatalogEntry> {
        Ok(CatalogEntry::Record(record))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}
