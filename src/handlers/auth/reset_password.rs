// handlers/auth/reset_password.rs - POST /api/v1/auth/reset-password/:resettoken handler

use axum::extract::{Extension, Path};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::reset::hash_reset_token;
use crate::auth::{self, PrincipalKind};
use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::RequiredFields;

#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Option<String>,
}

pub async fn reset_password(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(reset_token): Path<String>,
    JsonBody(payload): JsonBody<ResetPasswordRequest>,
) -> ApiResult<String> {
    RequiredFields::new().field("password", &payload.password).check()?;

    let customer = Customer::find_by_reset_token(&pool, &hash_reset_token(&reset_token))
        .await?
        .ok_or_else(|| ApiError::invalid_argument("reset token is invalid or has expired"))?;

    let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())?;
    Customer::set_password(&pool, customer.id, &password_hash).await?;
    tracing::info!("Customer {} reset password", customer.id);

    let token = auth::issue_token(customer.id, &customer.email, PrincipalKind::Customer)?;
    Ok(ApiResponse::token(token))
}
