// handlers/auth/login.rs - POST /api/v1/auth/login handler

use axum::extract::Extension;

use super::LoginRequest;
use crate::auth::{self, password::verify_password, PrincipalKind};
use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::RequiredFields;

pub async fn customer_login(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<String> {
    RequiredFields::new()
        .field("email", &payload.email)
        .field("password", &payload.password)
        .check()?;

    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let customer = Customer::find_by_email(&pool, &email)
        .await?
        .filter(|c| verify_password(&password, &c.password))
        .ok_or_else(|| {
            tracing::warn!("Failed customer login for {}", email);
            ApiError::incorrect_credentials()
        })?;

    let token = auth::issue_token(customer.id, &customer.email, PrincipalKind::Customer)?;
    tracing::info!("Customer {} logged in", customer.id);
    Ok(ApiResponse::token(token))
}
