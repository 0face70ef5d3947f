// handlers/auth/change_password.rs - PUT /api/v1/auth/change-password handler

use axum::extract::Extension;

use super::{ChangePasswordRequest, CURRENT_PASSWORD_INCORRECT, PASSWORD_UPDATED};
use crate::auth::password::{hash_password, verify_password};
use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, ValidatedCustomer};
use crate::validate::RequiredFields;

pub async fn customer_change_password(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedCustomer(customer)): Extension<ValidatedCustomer>,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> ApiResult<String> {
    RequiredFields::new()
        .field("currentPassword", &payload.current_password)
        .field("newPassword", &payload.new_password)
        .check()?;

    if !verify_password(payload.current_password.as_deref().unwrap_or_default(), &customer.password) {
        tracing::warn!("Customer {} supplied a wrong current password", customer.id);
        return Err(ApiError::unauthorized(CURRENT_PASSWORD_INCORRECT));
    }

    let password_hash = hash_password(payload.new_password.as_deref().unwrap_or_default())?;
    Customer::set_password(&pool, customer.id, &password_hash).await?;

    tracing::info!("Customer {} changed password", customer.id);
    Ok(ApiResponse::message(PASSWORD_UPDATED))
}
