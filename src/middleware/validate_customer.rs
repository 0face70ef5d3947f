use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::claims_from;
use crate::auth::PrincipalKind;
use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::ApiError;

/// The customer behind a customer token, loaded fresh for each request.
#[derive(Clone, Debug)]
pub struct ValidatedCustomer(pub Customer);

/// Requires a customer token whose customer still exists.
pub async fn validate_customer_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = claims_from(&request)?;
    if claims.kind != PrincipalKind::Customer {
        tracing::warn!("Customer route called with {:?} token (id {})", claims.kind, claims.id);
        return Err(ApiError::unauthorized_access());
    }

    let ShopPool(pool) = request
        .extensions()
        .get::<ShopPool>()
        .cloned()
        .ok_or_else(|| ApiError::internal_server_error("database pool missing from request extensions"))?;

    let customer = Customer::find_by_id(&pool, claims.id).await?.ok_or_else(|| {
        tracing::warn!("Token for customer {} refers to a missing account", claims.id);
        ApiError::unauthorized_access()
    })?;

    tracing::debug!("Customer {} authenticated", customer.id);
    request.extensions_mut().insert(ValidatedCustomer(customer));

    Ok(next.run(request).await)
}
