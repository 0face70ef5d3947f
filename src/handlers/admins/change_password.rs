// handlers/admins/change_password.rs - POST /api/v1/admins/change-password handler

use axum::extract::Extension;

use crate::auth::password::{hash_password, verify_password};
use crate::database::models::Admin;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::handlers::auth::{ChangePasswordRequest, CURRENT_PASSWORD_INCORRECT, PASSWORD_UPDATED};
use crate::middleware::{ApiResponse, ApiResult, JsonBody, ValidatedAdmin};
use crate::validate::RequiredFields;

pub async fn admin_change_password(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedAdmin(admin)): Extension<ValidatedAdmin>,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> ApiResult<String> {
    RequiredFields::new()
        .field("currentPassword", &payload.current_password)
        .field("newPassword", &payload.new_password)
        .check()?;

    if !verify_password(payload.current_password.as_deref().unwrap_or_default(), &admin.password) {
        tracing::warn!("Admin {} supplied a wrong current password", admin.id);
        return Err(ApiError::unauthorized(CURRENT_PASSWORD_INCORRECT));
    }

    let password_hash = hash_password(payload.new_password.as_deref().unwrap_or_default())?;
    Admin::set_password(&pool, admin.id, &password_hash).await?;

    tracing::info!("Admin {} changed password", admin.id);
    Ok(ApiResponse::message(PASSWORD_UPDATED))
}
