//! Route handlers outside the pricing API

pub mod docs;
pub mod health;

use axum::{http::StatusCode, Json};

use crate::pricing::responses::ErrorResponse;

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
        }),
    )
}
