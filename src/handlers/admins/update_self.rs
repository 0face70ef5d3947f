// handlers/admins/update_self.rs - PUT /api/v1/admins handler

use axum::extract::Extension;
use serde_json::Value;

use super::AdminPayload;
use crate::database::models::{Admin, AdminChanges};
use crate::database::{Repository, ShopPool, ADMINS};
use crate::error::{ApiError, UPDATE_NOT_FOUND};
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, ValidatedAdmin};
use crate::validate::{non_blank, normalize_email};

/// Any admin may change their own `username` and `email`; `role` is ignored.
pub async fn admin_update_self(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedAdmin(admin)): Extension<ValidatedAdmin>,
    JsonBody(payload): JsonBody<AdminPayload>,
) -> ApiResult<Value> {
    let changes = AdminChanges {
        username: non_blank(payload.username),
        email: non_blank(payload.email).map(|e| normalize_email(&e)).transpose()?,
        role: None,
    };

    if !Admin::update(&pool, admin.id, &changes).await? {
        return Err(ApiError::not_found(UPDATE_NOT_FOUND));
    }

    let filter = FilterData {
        select: Some(vec!["username".into(), "email".into(), "updatedAt".into()]),
        ..Default::default()
    };
    let row = Repository::new(&ADMINS, pool).select_404(admin.id, filter).await?;
    Ok(ApiResponse::success(row))
}
