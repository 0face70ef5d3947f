// handlers/categories/list.rs - GET /api/v1/categories handler

use axum::extract::{Extension, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, CATEGORIES};
use crate::handlers::utils::list_filter;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn category_list(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Value>> {
    let filter = list_filter(&CATEGORIES, query.as_deref())?;
    let rows = Repository::new(&CATEGORIES, pool).select_any(filter).await?;
    Ok(ApiResponse::list(rows))
}
