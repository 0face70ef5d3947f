// handlers/categories/show.rs - GET /api/v1/categories/:id handler

use axum::extract::{Extension, Path, RawQuery};
use serde_json::Value;

use crate::database::{Repository, ShopPool, CATEGORIES};
use crate::handlers::utils::detail_filter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validate::parse_id;

pub async fn category_show(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let filter = detail_filter(&CATEGORIES, query.as_deref())?;
    let row = Repository::new(&CATEGORIES, pool).select_404(id, filter).await?;
    Ok(ApiResponse::success(row))
}
