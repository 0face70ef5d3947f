// handlers/customers/delete.rs - DELETE /api/v1/customers/:id handler

use axum::extract::{Extension, Path};

use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::{ApiError, DELETE_NOT_FOUND};
use crate::middleware::{ApiResponse, ApiResult, ValidatedAdmin};
use crate::validate::parse_id;

pub async fn customer_delete(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(ValidatedAdmin(admin)): Extension<ValidatedAdmin>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    if !Customer::delete(&pool, id).await? {
        return Err(ApiError::not_found(DELETE_NOT_FOUND));
    }
    tracing::info!("Customer {} deleted by admin {}", id, admin.id);
    Ok(ApiResponse::no_content())
}
