// handlers/admins/me.rs - GET /api/v1/admins/me handler

use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, ValidatedAdmin};

pub async fn admin_me(Extension(ValidatedAdmin(admin)): Extension<ValidatedAdmin>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": admin.id,
        "username": admin.username,
        "email": admin.email,
        "role": admin.role,
    })))
}
