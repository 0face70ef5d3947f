// handlers/customers/list.rs - GET /api/v1/customers handler

use axum::extract::{Extension, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, CUSTOMERS};
use crate::handlers::utils::list_filter;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn customer_list(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Value>> {
    let filter = list_filter(&CUSTOMERS, query.as_deref())?;
    let rows = Repository::new(&CUSTOMERS, pool).select_any(filter).await?;
    Ok(ApiResponse::list(rows))
}
