// handlers/products/delete.rs - DELETE /api/v1/products/:id handler

use axum::extract::{Extension, Path};

use crate::database::models::product;
use crate::database::ShopPool;
use crate::error::{ApiError, DELETE_NOT_FOUND};
use crate::middleware::{ApiResponse, ApiResult};
use crate::validate::parse_id;

pub async fn product_delete(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    if !product::delete(&pool, id).await? {
        return Err(ApiError::not_found(DELETE_NOT_FOUND));
    }
    tracing::info!("Deleted product {}", id);
    Ok(ApiResponse::no_content())
}
