// handlers/products/list.rs - GET /api/v1/products handler

use axum::extract::{Extension, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, PRODUCTS};
use crate::handlers::utils::list_filter;
use crate::middleware::{ApiResponse, ApiResult};

/// Supports `select`, `order_by`, `limit`, `offset`, `include=category` and
/// range filters on `price`, `stock`, `discountPercent` and `categoryId`.
pub async fn product_list(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Value>> {
    let filter = list_filter(&PRODUCTS, query.as_deref())?;
    let rows = Repository::new(&PRODUCTS, pool).select_any(filter).await?;
    Ok(ApiResponse::list(rows))
}
