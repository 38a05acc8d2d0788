//! Database queries for the pricing catalog.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{PricingKey, PricingRecord, StoredPricing};

const PRICING_COLUMNS: &str = r#"
    id, organization_id, item_id, zone,
    base_distance_in_km, km_price, fix_price,
    created_at, updated_at
"#;

/// Find the price rule for an organization, zone and item type
pub async fn find_pricing(
    pool: &PgPool,
    key: &PricingKey,
) -> Result<Option<StoredPricing>, AppError> {
    let pricing = sqlx::query_as::<_, StoredPricing>(&format!(
        r#"
        SELECT {PRICING_COLUMNS}
        FROM pricings
        WHERE organization_id = $1
          AND zone = $2
          AND item_id = $3
        "#
    ))
    .bind(&key.organization_id)
    .bind(&key.zone)
    .bind(&key.item_type)
    .fetch_optional(pool)
    .await?;

    Ok(pricing)
}

/// Insert a new pricing record
pub async fn insert_pricing(
    pool: &PgPool,
    id: Uuid,
    record: &PricingRecord,
) -> Result<StoredPricing, AppError> {
    let pricing = sqlx::query_as::<_, StoredPricing>(&format!(
        r#"
        INSERT INTO pricings
            (id, organization_id, item_id, zone, base_distance_in_km, km_price, fix_price)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PRICING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&record.organization_id)
    .bind(&record.item_id)
    .bind(&record.zone)
    .bind(record.base_distance_in_km)
    .bind(record.km_price)
    .bind(record.fix_price)
    .fetch_one(pool)
    .await?;

    Ok(pricing)
}

/// Replace every field of an existing record
pub async fn update_pricing(
    pool: &PgPool,
    id: Uuid,
    record: &PricingRecord,
) -> Result<Option<StoredPricing>, AppError> {
    let pricing = sqlx::query_as::<_, StoredPricing>(&format!(
        r#"
        UPDATE pricings
        SET organization_id = $2,
            item_id = $3,
            zone = $4,
            base_distance_in_km = $5,
            km_price = $6,
            fix_price = $7,
            updated_at = now()
        WHERE id = $1
        RETURNING {PRICING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&record.organization_id)
    .bind(&record.item_id)
    .bind(&record.zone)
    .bind(record.base_distance_in_km)
    .bind(record.km_price)
    .bind(record.fix_price)
    .fetch_optional(pool)
    .await?;

    Ok(pricing)
}

/// Delete a record, returning whether it existed
pub async fn delete_pricing(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM pricings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
