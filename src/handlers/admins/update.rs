// handlers/admins/update.rs - PUT /api/v1/admins/:id handler

use axum::extract::{Extension, Path};
use serde_json::Value;

use super::AdminPayload;
use crate::database::models::{Admin, AdminChanges};
use crate::database::{Repository, ShopPool, ADMINS};
use crate::error::{ApiError, UPDATE_NOT_FOUND};
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::{non_blank, normalize_email, parse_id, AdminRole};

/// Superadmin edit of `username`, `email` and `role`. Passwords are only
/// changed by their owner.
pub async fn admin_update(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<AdminPayload>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;

    let changes = AdminChanges {
        username: non_blank(payload.username),
        email: non_blank(payload.email).map(|e| normalize_email(&e)).transpose()?,
        role: non_blank(payload.role).map(|r| AdminRole::parse(&r)).transpose()?,
    };

    if !Admin::update(&pool, id, &changes).await? {
        return Err(ApiError::not_found(UPDATE_NOT_FOUND));
    }

    let row = Repository::new(&ADMINS, pool).select_404(id, FilterData::default()).await?;
    Ok(ApiResponse::success(row))
}
