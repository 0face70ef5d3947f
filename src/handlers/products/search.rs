// handlers/products/search.rs - GET /api/v1/products/search handler

use axum::extract::{Extension, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, PRODUCTS};
use crate::handlers::utils::search_filter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validate::RequiredFields;

/// Case-insensitive match of `q` against name, description and detail.
pub async fn product_search(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Value>> {
    let filter = search_filter(&PRODUCTS, query.as_deref())?;
    RequiredFields::new().field("q", &filter.search).check()?;

    let rows = Repository::new(&PRODUCTS, pool).select_any(filter).await?;
    Ok(ApiResponse::list(rows))
}
