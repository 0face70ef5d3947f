// handlers/admins/delete.rs - DELETE /api/v1/admins/:id handler

use axum::extract::{Extension, Path};

use crate::database::models::Admin;
use crate::database::ShopPool;
use crate::error::{ApiError, DELETE_NOT_FOUND};
use crate::middleware::{ApiResponse, ApiResult, ValidatedAdmin};
use crate::validate::parse_id;

pub async fn admin_delete(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedAdmin(current)): Extension<ValidatedAdmin>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    if id == current.id {
        return Err(ApiError::invalid_argument("you cannot delete your own account"));
    }

    if !Admin::delete(&pool, id).await? {
        return Err(ApiError::not_found(DELETE_NOT_FOUND));
    }

    tracing::info!("Admin {} deleted admin {}", current.id, id);
    Ok(ApiResponse::no_content())
}
