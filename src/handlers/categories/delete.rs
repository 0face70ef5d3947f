// handlers/categories/delete.rs - DELETE /api/v1/categories/:id handler

use axum::extract::{Extension, Path};

use crate::database::models::category;
use crate::database::ShopPool;
use crate::error::{ApiError, DELETE_NOT_FOUND};
use crate::handlers::utils::on_foreign_key;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validate::parse_id;

pub async fn category_delete(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;

    let deleted = category::delete(&pool, id)
        .await
        .map_err(on_foreign_key("category still has products and cannot be deleted"))?;
    if !deleted {
        return Err(ApiError::not_found(DELETE_NOT_FOUND));
    }

    tracing::info!("Deleted category {}", id);
    Ok(ApiResponse::no_content())
}
