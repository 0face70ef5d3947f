// handlers/customers/show.rs - GET /api/v1/customers/:id handler

use axum::extract::{Extension, Path, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, CUSTOMERS};
use crate::handlers::utils::detail_filter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validate::parse_id;

pub async fn customer_show(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let filter = detail_filter(&CUSTOMERS, query.as_deref())?;
    let row = Repository::new(&CUSTOMERS, pool).select_404(id, filter).await?;
    Ok(ApiResponse::success(row))
}
