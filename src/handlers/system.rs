// handlers/system.rs - GET /, GET /health and the 404 fallback

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::{DatabaseManager, ShopPool};
use crate::error::{ApiError, PAGE_NOT_FOUND};

/// GET / - service banner with the endpoint map
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "endpoints": {
                "categories": "/api/v1/categories",
                "products": "/api/v1/products",
                "customers": "/api/v1/customers",
                "auth": "/api/v1/auth",
                "admins": "/api/v1/admins",
                "health": "/health"
            }
        }
    }))
}

/// GET /health - 503 when the database does not answer
pub async fn health(Extension(ShopPool(pool)): Extension<ShopPool>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match DatabaseManager::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": timestamp, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": timestamp, "database": "unavailable" })),
            )
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found(PAGE_NOT_FOUND)
}
