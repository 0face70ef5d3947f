// handlers/auth/update_details.rs - PUT /api/v1/auth/update-details handler

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::{Customer, CustomerChanges};
use crate::database::{Repository, ShopPool, CUSTOMERS};
use crate::error::{ApiError, UPDATE_NOT_FOUND};
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, ValidatedCustomer};
use crate::validate::{non_blank, normalize_email};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

/// Absent or empty fields keep their stored value.
pub async fn customer_update_details(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedCustomer(customer)): Extension<ValidatedCustomer>,
    JsonBody(payload): JsonBody<UpdateDetailsRequest>,
) -> ApiResult<Value> {
    let changes = CustomerChanges {
        fullname: non_blank(payload.fullname),
        email: non_blank(payload.email).map(|e| normalize_email(&e)).transpose()?,
        shipping_address: non_blank(payload.shipping_address),
        phone: non_blank(payload.phone),
    };

    if !Customer::update_details(&pool, customer.id, &changes).await? {
        return Err(ApiError::not_found(UPDATE_NOT_FOUND));
    }

    let profile = Repository::new(&CUSTOMERS, pool)
        .select_404(customer.id, FilterData::default())
        .await?;
    Ok(ApiResponse::success(profile))
}
