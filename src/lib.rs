//! Delivery pricing API
//!
//! Quotes delivery prices from a per-organization, per-zone, per-item-type
//! price rule and exposes a small catalog API for managing those rules.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod routes;

use axum::{error_handling::HandleErrorLayer, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::cache::AppCache;
use crate::config::Config;
use crate::error::handle_middleware_error;
use crate::pricing::{
    CachedPricingLookup, PgPricingStore, PlaceholderCatalog, PricingCatalog, PricingLookup,
    StaticPricingLookup,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn PricingLookup>,
    pub catalog: Arc<dyn PricingCatalog>,
    pub cache: Option<AppCache>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn PricingLookup>, catalog: Arc<dyn PricingCatalog>) -> Self {
        Self {
            lookup,
            catalog,
            cache: None,
        }
    }

    /// Built-in rate table and a catalog that stores nothing
    pub fn placeholder() -> Self {
        Self::new(
            Arc::new(StaticPricingLookup::placeholder()),
            Arc::new(PlaceholderCatalog),
        )
    }

    /// Postgres-backed lookup and catalog; lookups are cached unless `cache_ttl` is zero
    pub fn postgres(pool: PgPool, cache_ttl: Duration) -> Self {
        let store = Arc::new(PgPricingStore::new(pool));

        if cache_ttl.is_zero() {
            return Self::new(store.clone(), store);
        }

        let cache = AppCache::new(cache_ttl);
        let lookup = Arc::new(CachedPricingLookup::new(store.clone(), cache.clone()));
        Self {
            lookup,
            catalog: store,
            cache: Some(cache),
        }
    }

    /// Drop cached lookups after the catalog changes
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

/// Build the application router with its middleware stack
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api-docs/openapi.json", get(routes::docs::openapi))
        .nest("/api/price", pricing::router())
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(cors),
        )
        .with_state(state)
}
