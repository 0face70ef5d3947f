// handlers/products/update.rs - PUT /api/v1/products/:id handler

use axum::extract::{Extension, Path};
use serde_json::Value;

use super::{ProductPayload, UNKNOWN_CATEGORY};
use crate::database::models::{product, ProductChanges};
use crate::database::{Repository, ShopPool, PRODUCTS};
use crate::error::{ApiError, UPDATE_NOT_FOUND};
use crate::filter::FilterData;
use crate::handlers::utils::on_foreign_key;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::{non_blank, parse_id};

/// Absent or blank text fields keep their stored value.
pub async fn product_update(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    payload.check_ranges()?;

    let changes = ProductChanges {
        name: non_blank(payload.name),
        price: payload.price,
        discount_percent: payload.discount_percent,
        description: non_blank(payload.description),
        detail: non_blank(payload.detail),
        category_id: payload.category_id,
        image1: non_blank(payload.image1),
        image2: non_blank(payload.image2),
        stock: payload.stock,
    };

    let updated = product::update(&pool, id, &changes)
        .await
        .map_err(on_foreign_key(UNKNOWN_CATEGORY))?;
    if !updated {
        return Err(ApiError::not_found(UPDATE_NOT_FOUND));
    }

    let row = Repository::new(&PRODUCTS, pool).select_404(id, FilterData::default()).await?;
    Ok(ApiResponse::success(row))
}
