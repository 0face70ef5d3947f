// handlers/admins/list.rs - GET /api/v1/admins handler

use axum::extract::{Extension, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, ADMINS};
use crate::handlers::utils::list_filter;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn admin_list(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Value>> {
    let filter = list_filter(&ADMINS, query.as_deref())?;
    let rows = Repository::new(&ADMINS, pool).select_any(filter).await?;
    Ok(ApiResponse::list(rows))
}
