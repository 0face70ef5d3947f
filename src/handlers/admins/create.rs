// handlers/admins/create.rs - POST /api/v1/admins handler

use axum::extract::Extension;
use serde_json::{json, Value};

use super::AdminPayload;
use crate::auth::password::hash_password;
use crate::database::models::{Admin, NewAdmin};
use crate::database::ShopPool;
use crate::handlers::utils::resource_location;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, ValidatedAdmin};
use crate::validate::{normalize_email, AdminRole, RequiredFields};

/// Responds with `{ id, username, email, role }`; the password is never echoed.
pub async fn admin_create(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedAdmin(creator)): Extension<ValidatedAdmin>,
    JsonBody(payload): JsonBody<AdminPayload>,
) -> ApiResult<Value> {
    RequiredFields::new()
        .field("username", &payload.username)
        .field("email", &payload.email)
        .field("password", &payload.password)
        .check()?;

    let email = normalize_email(payload.email.as_deref().unwrap_or_default())?;
    let role = match payload.role.as_deref() {
        Some(raw) if !raw.is_empty() => AdminRole::parse(raw)?,
        _ => AdminRole::Admin,
    };

    let admin = NewAdmin {
        username: payload.username.unwrap_or_default(),
        email,
        password_hash: hash_password(payload.password.as_deref().unwrap_or_default())?,
        role,
    };

    let id = Admin::insert(&pool, &admin).await?;
    tracing::info!("Admin {} created admin {} <{}> as {}", creator.id, id, admin.email, role);

    Ok(ApiResponse::created(json!({
        "id": id,
        "username": admin.username,
        "email": admin.email,
        "role": role,
    }))
    .with_location(resource_location("admins", id)))
}
