// handlers/products/create.rs - POST /api/v1/products handler

use axum::extract::Extension;
use serde_json::Value;

use super::{ProductPayload, UNKNOWN_CATEGORY};
use crate::database::models::{product, NewProduct};
use crate::database::{Repository, ShopPool, PRODUCTS};
use crate::filter::FilterData;
use crate::handlers::utils::{on_foreign_key, resource_location};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::RequiredFields;

pub async fn product_create(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ApiResult<Value> {
    RequiredFields::new()
        .field("name", &payload.name)
        .field("price", &payload.price)
        .field("description", &payload.description)
        .field("image1", &payload.image1)
        .field("image2", &payload.image2)
        .field("categoryId", &payload.category_id)
        .check()?;
    payload.check_ranges()?;

    let new_product = NewProduct {
        id: payload.id,
        name: payload.name.unwrap_or_default(),
        price: payload.price.unwrap_or_default(),
        discount_percent: payload.discount_percent,
        description: payload.description.unwrap_or_default(),
        detail: payload.detail,
        category_id: payload.category_id.unwrap_or_default(),
        image1: payload.image1.unwrap_or_default(),
        image2: payload.image2.unwrap_or_default(),
        stock: payload.stock.unwrap_or(0),
    };

    let id = product::insert(&pool, &new_product)
        .await
        .map_err(on_foreign_key(UNKNOWN_CATEGORY))?;
    tracing::info!("Created product {} ({}) in category {}", id, new_product.name, new_product.category_id);

    let row = Repository::new(&PRODUCTS, pool).select_404(id, FilterData::default()).await?;
    Ok(ApiResponse::created(row).with_location(resource_location("products", id)))
}
