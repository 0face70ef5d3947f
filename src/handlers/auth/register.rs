// handlers/auth/register.rs - POST /api/v1/auth/register handler

use axum::{extract::Extension, http::StatusCode};
use serde::Deserialize;

use crate::auth::{self, password::hash_password, PrincipalKind};
use crate::database::models::{Customer, NewCustomer};
use crate::database::ShopPool;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::{normalize_email, RequiredFields};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub fullname: Option<String>,
    pub password: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

pub async fn customer_register(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<String> {
    RequiredFields::new()
        .field("email", &payload.email)
        .field("fullname", &payload.fullname)
        .field("password", &payload.password)
        .field("shippingAddress", &payload.shipping_address)
        .check()?;

    let email = normalize_email(payload.email.as_deref().unwrap_or_default())?;
    let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())?;

    let customer = NewCustomer {
        fullname: payload.fullname.unwrap_or_default(),
        email,
        password_hash,
        shipping_address: payload.shipping_address.unwrap_or_default(),
        phone: payload.phone.filter(|p| !p.is_empty()),
    };

    let id = Customer::insert(&pool, &customer).await?;
    tracing::info!("Registered customer {} <{}>", id, customer.email);

    let token = auth::issue_token(id, &customer.email, PrincipalKind::Customer)?;
    Ok(ApiResponse::token(token).status(StatusCode::CREATED))
}
