//! HTTP-level tests driving the router in-process.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use delivery_pricing::cache::AppCache;
use delivery_pricing::config::Config;
use delivery_pricing::error::{AppError, Result};
use delivery_pricing::pricing::{
    CachedPricingLookup, PlaceholderCatalog, PricingKey, PricingLookup, PricingRecord,
    StaticPricingLookup,
};
use delivery_pricing::{app, AppState};

fn placeholder_app() -> Router {
    app(AppState::placeholder(), &Config::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn calculate(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/price/calculate-price", Some(body)).await
}

// ==================== calculate-price ====================

#[tokio::test]
async fn test_calculate_price_perishable() {
    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10, "item_type": "perishable"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total_price": 17.5}));
}

#[tokio::test]
async fn test_calculate_price_standard_and_omitted_item_type() {
    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10, "item_type": "standard"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], json!(15.0));

    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], json!(15.0));
}

#[tokio::test]
async fn test_calculate_price_at_base_distance() {
    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": 5, "item_type": "perishable"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], json!(10.0));
}

#[tokio::test]
async fn test_calculate_price_fractional_distance() {
    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": 7.333, "item_type": "perishable"}),
    )
    .await;

    // 2.333 km * 1.5 = 3.4995 -> 349.95 cents -> 350 cents
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], json!(13.5));
}

#[tokio::test]
async fn test_calculate_price_rejects_negative_distance() {
    let (status, body) = calculate(
        placeholder_app(),
        json!({"zone": "central", "organization_id": "005", "total_distance": -1}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "total_distance must not be negative"}));
}

#[tokio::test]
async fn test_calculate_price_requires_fields() {
    let (status, body) = calculate(placeholder_app(), json!({"zone": "central", "organization_id": "005"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "total_distance is required"}));

    let (status, body) = calculate(placeholder_app(), json!({"organization_id": "005", "total_distance": 3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "zone is required"}));
}

#[tokio::test]
async fn test_calculate_price_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/price/calculate-price")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = placeholder_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_calculate_price_missing_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/price/calculate-price")
        .body(Body::from(r#"{"zone":"a","organization_id":"b","total_distance":1}"#))
        .unwrap();

    let response = placeholder_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calculate_price_not_found() {
    let state = AppState::new(Arc::new(StaticPricingLookup::new()), Arc::new(PlaceholderCatalog));
    let (status, body) = calculate(
        app(state, &Config::default()),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Pricing not found"}));
}

struct BrokenLookup;

#[async_trait]
impl PricingLookup for BrokenLookup {
    async fn find(&self, _key: &PricingKey) -> Result<Option<PricingRecord>> {
        Err(AppError::Internal("store unavailable".to_string()))
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn test_calculate_price_lookup_failure() {
    let state = AppState::new(Arc::new(BrokenLookup), Arc::new(PlaceholderCatalog));
    let (status, body) = calculate(
        app(state, &Config::default()),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}

struct SlowLookup;

#[async_trait]
impl PricingLookup for SlowLookup {
    async fn find(&self, key: &PricingKey) -> Result<Option<PricingRecord>> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(StaticPricingLookup::placeholder().resolve(key))
    }

    fn backend(&self) -> &'static str {
        "slow"
    }
}

#[tokio::test]
async fn test_calculate_price_timeout_uses_error_envelope() {
    let config = Config {
        request_timeout: Duration::from_millis(20),
        ..Config::default()
    };
    let state = AppState::new(Arc::new(SlowLookup), Arc::new(PlaceholderCatalog));
    let (status, body) = calculate(
        app(state, &config),
        json!({"zone": "central", "organization_id": "005", "total_distance": 10}),
    )
    .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({"error": "Request timeout"}));
}

// ==================== pricing catalog ====================

fn pricing_body() -> Value {
    json!({
        "organization_id": "005",
        "item_id": "perishable",
        "zone": "central",
        "base_distance_in_km": 5,
        "km_price": 1.5,
        "fix_price": 10
    })
}

#[tokio::test]
async fn test_create_pricing_echoes_record() {
    let (status, body) = send(placeholder_app(), Method::POST, "/api/price/pricing", Some(pricing_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["organization_id"], "005");
    assert_eq!(body["item_id"], "perishable");
    assert_eq!(body["zone"], "central");
    assert_eq!(body["base_distance_in_km"], 5);
    assert_eq!(body["km_price"], json!(1.5));
    assert_eq!(body["fix_price"], json!(10.0));
}

#[tokio::test]
async fn test_create_pricing_rejects_negative_price() {
    let mut payload = pricing_body();
    payload["km_price"] = json!(-2);

    let (status, body) = send(placeholder_app(), Method::POST, "/api/price/pricing", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "km_price must not be negative"}));
}

#[tokio::test]
async fn test_get_pricing_returns_dummy_item() {
    let (status, body) = send(
        placeholder_app(),
        Method::GET,
        "/api/price/pricing?organization_id=005&zone=central&item_type=perishable",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "01", "type": "perishable", "description": "dummyItem"}));
}

#[tokio::test]
async fn test_update_pricing_echoes_record() {
    let (status, body) = send(placeholder_app(), Method::PUT, "/api/price/pricing/7", Some(pricing_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["km_price"], json!(1.5));
}

#[tokio::test]
async fn test_delete_pricing_confirms() {
    let (status, body) = send(placeholder_app(), Method::DELETE, "/api/price/pricing/7", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "item 7 deleted"}));
}

fn cached_placeholder_state() -> (AppState, AppCache) {
    let cache = AppCache::new(Duration::from_secs(60));
    let lookup = CachedPricingLookup::new(
        Arc::new(StaticPricingLookup::placeholder()),
        cache.clone(),
    );
    let state = AppState {
        lookup: Arc::new(lookup),
        catalog: Arc::new(PlaceholderCatalog),
        cache: Some(cache.clone()),
    };
    (state, cache)
}

#[tokio::test]
async fn test_catalog_writes_clear_cached_lookups() {
    let (state, cache) = cached_placeholder_state();
    let router = app(state, &Config::default());
    let key = PricingKey::new("005", "central", Some("perishable"));
    let quote = json!({"zone": "central", "organization_id": "005", "total_distance": 10, "item_type": "perishable"});

    let writes = [
        (Method::POST, "/api/price/pricing", Some(pricing_body())),
        (Method::PUT, "/api/price/pricing/7", Some(pricing_body())),
        (Method::DELETE, "/api/price/pricing/7", None),
    ];

    for (method, uri, body) in writes {
        let (status, _) = calculate(router.clone(), quote.clone()).await;
        assert_eq!(status, StatusCode::OK);
        cache.pricing.run_pending_tasks().await;
        assert!(cache.pricing.contains_key(&key));
        assert_eq!(cache.stats().pricing_size, 1);

        let (status, _) = send(router.clone(), method, uri, body).await;
        assert!(status.is_success());
        cache.pricing.run_pending_tasks().await;
        assert!(!cache.pricing.contains_key(&key));
        assert_eq!(cache.stats().pricing_size, 0);
    }
}

// ==================== postgres-backed state ====================

fn lazy_postgres_app() -> Router {
    // Never connects: every request below is rejected before reaching the store.
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://pricing@localhost/pricing")
        .unwrap();
    app(AppState::postgres(pool, Duration::from_secs(60)), &Config::default())
}

#[tokio::test]
async fn test_postgres_health_reports_backend_and_cache() {
    let (status, body) = send(lazy_postgres_app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["pricing_backend"], "postgres");
    assert_eq!(body["cache"]["pricing_size"], 0);
}

#[tokio::test]
async fn test_postgres_rejects_invalid_ids() {
    let (status, body) = send(lazy_postgres_app(), Method::PUT, "/api/price/pricing/01", Some(pricing_body())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid pricing id: 01"}));

    let (status, _) = send(lazy_postgres_app(), Method::DELETE, "/api/price/pricing/01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_postgres_get_requires_keys() {
    let (status, body) = send(lazy_postgres_app(), Method::GET, "/api/price/pricing?zone=central", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "organization_id is required"}));
}

// ==================== misc routes ====================

#[tokio::test]
async fn test_health_placeholder() {
    let (status, body) = send(placeholder_app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "pricing_backend": "static"}));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(placeholder_app(), Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openapi"], "3.0.0");
    assert!(body["paths"]["/api/price/calculate-price"]["post"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = send(placeholder_app(), Method::GET, "/api/price/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found"}));
}
