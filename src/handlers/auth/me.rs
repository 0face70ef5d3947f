// handlers/auth/me.rs - GET /api/v1/auth/me handler

use axum::extract::Extension;
use serde_json::Value;

use crate::database::{Repository, ShopPool, CUSTOMERS};
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult, ValidatedCustomer};

pub async fn customer_me(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedCustomer(customer)): Extension<ValidatedCustomer>,
) -> ApiResult<Value> {
    let profile = Repository::new(&CUSTOMERS, pool)
        .select_404(customer.id, FilterData::default())
        .await?;
    Ok(ApiResponse::success(profile))
}
