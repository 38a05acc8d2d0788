//! Pricing API route handlers, mounted under `/api/price`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::CatalogEntry;
use super::requests::{CalculatePriceRequest, PricingPayload, PricingQuery};
use super::responses::{DeletedResponse, PriceQuoteResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate-price", post(calculate_price))
        .route("/pricing", post(create_pricing).get(get_pricing))
        .route("/pricing/:id", put(update_pricing).delete(delete_pricing))
}

/// Calculate the delivery price for a zone, organization, item type and distance
pub async fn calculate_price(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculatePriceRequest>, JsonRejection>,
) -> Result<Json<PriceQuoteResponse>> {
    let Json(body) = payload?;
    let request = body.validate()?;

    let total_price = services::quote_price(state.lookup.as_ref(), &request).await?;

    Ok(Json(PriceQuoteResponse { total_price }))
}

pub async fn create_pricing(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PricingPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CatalogEntry>)> {
    let Json(body) = payload?;
    let record = body.validate()?;

    let entry = state.catalog.create(record).await?;
    state.invalidate_cache();

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_pricing(
    State(state): State<AppState>,
    query: std::result::Result<Query<PricingQuery>, QueryRejection>,
) -> Result<Json<CatalogEntry>> {
    let Query(query) = query?;
    let entry = state.catalog.get(&query).await?;
    Ok(Json(entry))
}

pub async fn update_pricing(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<PricingPayload>, JsonRejection>,
) -> Result<Json<CatalogEntry>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let record = body.validate()?;

    let entry = state.catalog.update(&id, record).await?;
    state.invalidate_cache();

    Ok(Json(entry))
}

pub async fn delete_pricing(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>> {
    let Path(id) = id?;

    state.catalog.delete(&id).await?;
    state.invalidate_cache();

    Ok(Json(DeletedResponse::for_id(&id)))
}
