//! Postgres-backed pricing lookup and catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::catalog::PricingCatalog;
use super::lookup::PricingLookup;
use super::models::{CatalogEntry, PricingKey, PricingRecord};
use super::queries;
use super::requests::PricingQuery;

#[derive(Debug, Clone)]
pub struct PgPricingStore {
    pool: PgPool,
}

impl PgPricingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation(format!("invalid pricing id: {}", id)))
}

/// A write that collides with the (organization, zone, item) key is a client error
fn map_conflict(err: AppError, record: &PricingRecord) -> AppError {
    match err {
        AppError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            AppError::Validation(format!(
                "pricing already exists for organization {} zone {} item {}",
                record.organization_id, record.zone, record.item_id
            ))
        }
        other => other,
    }
}

#[async_trait]
impl PricingLookup for PgPricingStore {
    async fn find(&self, key: &PricingKey) -> Result<Option<PricingRecord>> {
        let row = queries::find_pricing(&self.pool, key).await?;
        Ok(row.map(PricingRecord::from))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[async_trait]
impl PricingCatalog for PgPricingStore {
    async fn create(&self, record: PricingRecord) -> Result<CatalogEntry> {
        let id = Uuid::new_v4();
        let stored = queries::insert_pricing(&self.pool, id, &record)
            .await
            .map_err(|e| map_conflict(e, &record))?;
        tracing::info!("Created pricing {}", stored.id);
        Ok(CatalogEntry::Stored(stored))
    }

    async fn get(&self, query: &PricingQuery) -> Result<CatalogEntry> {
        let key = query.validate()?;
        queries::find_pricing(&self.pool, &key)
            .await?
            .map(CatalogEntry::Stored)
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: &str, record: PricingRecord) -> Result<CatalogEntry> {
        let id = parse_id(id)?;
        let stored = queries::update_pricing(&self.pool, id, &record)
            .await
            .map_err(|e| map_conflict(e, &record))?
            .ok_or(AppError::NotFound)?;
        tracing::info!("Updated pricing {}", stored.id);
        Ok(CatalogEntry::Stored(stored))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        if !queries::delete_pricing(&self.pool, id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!("Deleted pricing {}", id);
        Ok(())
    }
}
