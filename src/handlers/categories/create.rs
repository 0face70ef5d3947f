// handlers/categories/create.rs - POST /api/v1/categories handler

use axum::extract::Extension;
use serde_json::Value;

use super::CategoryPayload;
use crate::database::models::{category, NewCategory};
use crate::database::{Repository, ShopPool, CATEGORIES};
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::handlers::utils::resource_location;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::{is_integer_and_positive, RequiredFields};

pub async fn category_create(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> ApiResult<Value> {
    RequiredFields::new().field("name", &payload.name).check()?;

    if let Some(id) = payload.id {
        if !is_integer_and_positive(i64::from(id)) {
            return Err(ApiError::invalid_argument("id must be a positive integer"));
        }
    }

    let new_category = NewCategory {
        id: payload.id,
        name: payload.name.unwrap_or_default(),
        description: payload.description,
        thumbnail_image: payload.thumbnail_image,
    };

    let id = category::insert(&pool, &new_category).await?;
    tracing::info!("Created category {} ({})", id, new_category.name);

    let row = Repository::new(&CATEGORIES, pool).select_404(id, FilterData::default()).await?;
    Ok(ApiResponse::created(row).with_location(resource_location("categories", id)))
}
