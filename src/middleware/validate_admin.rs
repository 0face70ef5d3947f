use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::claims_from;
use crate::auth::PrincipalKind;
use crate::database::models::Admin;
use crate::database::ShopPool;
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct ValidatedAdmin(pub Admin);

/// Requires an admin token whose admin still exists.
pub async fn validate_admin_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = claims_from(&request)?;
    if claims.kind != PrincipalKind::Admin {
        tracing::warn!("Admin route called with {:?} token (id {})", claims.kind, claims.id);
        return Err(ApiError::unauthorized_access());
    }

    let ShopPool(pool) = request
        .extensions()
        .get::<ShopPool>()
        .cloned()
        .ok_or_else(|| ApiError::internal_server_error("database pool missing from request extensions"))?;

    let admin = Admin::find_by_id(&pool, claims.id).await?.ok_or_else(|| {
        tracing::warn!("Token for admin {} refers to a missing account", claims.id);
        ApiError::unauthorized_access()
    })?;

    tracing::debug!("Admin {} ({}) authenticated", admin.username, admin.role);
    request.extensions_mut().insert(ValidatedAdmin(admin));

    Ok(next.run(request).await)
}

/// Must run after `validate_admin_middleware`.
pub async fn require_superadmin(request: Request, next: Next) -> Result<Response, ApiError> {
    let ValidatedAdmin(admin) = request
        .extensions()
        .get::<ValidatedAdmin>()
        .ok_or_else(ApiError::unauthorized_access)?;

    if !admin.is_superadmin() {
        tracing::warn!("Admin {} ({}) denied superadmin route {}", admin.id, admin.role, request.uri().path());
        return Err(ApiError::forbidden());
    }

    Ok(next.run(request).await)
}
