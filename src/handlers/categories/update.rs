// handlers/categories/update.rs - PUT /api/v1/categories/:id handler

use axum::extract::{Extension, Path};
use serde_json::Value;

use super::CategoryPayload;
use crate::database::models::{category, CategoryChanges};
use crate::database::{Repository, ShopPool, CATEGORIES};
use crate::error::{ApiError, UPDATE_NOT_FOUND};
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::{non_blank, parse_id};

/// Absent or blank fields keep their stored value.
pub async fn category_update(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;

    let changes = CategoryChanges {
        name: non_blank(payload.name),
        description: non_blank(payload.description),
        thumbnail_image: non_blank(payload.thumbnail_image),
    };

    if !category::update(&pool, id, &changes).await? {
        return Err(ApiError::not_found(UPDATE_NOT_FOUND));
    }

    let row = Repository::new(&CATEGORIES, pool).select_404(id, FilterData::default()).await?;
    Ok(ApiResponse::success(row))
}
