use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// JWT authentication middleware that validates tokens and injects `Claims`
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(|reason| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), reason);
        ApiError::unauthorized_access()
    })?;

    let claims = auth::validate_jwt(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("empty JWT token");
    }
    Ok(token)
}

/// Claims placed by `jwt_auth_middleware`; absent means the route was wired
/// without it.
pub(crate) fn claims_from(request: &Request) -> Result<Claims, ApiError> {
    request
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(ApiError::unauthorized_access)
}
