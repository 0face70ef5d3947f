// handlers/admins/login.rs - POST /api/v1/admins/login handler

use axum::extract::Extension;

use crate::auth::{self, password::verify_password, PrincipalKind};
use crate::database::models::Admin;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::handlers::auth::LoginRequest;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::RequiredFields;

pub async fn admin_login(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<String> {
    RequiredFields::new()
        .field("email", &payload.email)
        .field("password", &payload.password)
        .check()?;

    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let admin = Admin::find_by_email(&pool, &email)
        .await?
        .filter(|a| verify_password(&password, &a.password))
        .ok_or_else(|| {
            tracing::warn!("Failed admin login for {}", email);
            ApiError::incorrect_credentials()
        })?;

    let token = auth::issue_token(admin.id, &admin.email, PrincipalKind::Admin)?;
    tracing::info!("Admin {} ({}) logged in", admin.id, admin.role);
    Ok(ApiResponse::token(token))
}
