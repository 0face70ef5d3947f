// handlers/auth/forgot_password.rs - POST /api/v1/auth/forgot-password handler

use axum::extract::Extension;
use serde::Deserialize;

use crate::auth::reset::ResetToken;
use crate::database::models::Customer;
use crate::database::ShopPool;
use crate::error::ApiError;
use crate::handlers::utils::public_url;
use crate::mail::{OutgoingMail, SharedMailer};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::validate::RequiredFields;

const RESET_MAIL_SENT: &str = "if the email is registered, a password reset link has been sent";

#[derive(Debug, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Answers identically whether or not the address is registered.
pub async fn forgot_password(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Extension(mailer): Extension<SharedMailer>,
    JsonBody(payload): JsonBody<ForgotPasswordRequest>,
) -> ApiResult<String> {
    RequiredFields::new().field("email", &payload.email).check()?;
    let email = payload.email.unwrap_or_default().trim().to_lowercase();

    let Some(customer) = Customer::find_by_email(&pool, &email).await? else {
        tracing::info!("Password reset requested for unknown address {}", email);
        return Ok(ApiResponse::message(RESET_MAIL_SENT));
    };

    let reset = ResetToken::generate();
    Customer::set_reset_token(&pool, customer.id, &reset.hash, reset.expires_at).await?;

    let reset_url = public_url(&format!("/api/v1/auth/reset-password/{}", reset.token));
    if let Err(e) = mailer.send(OutgoingMail::password_reset(&customer.email, &reset_url)).await {
        // a token nobody received must not stay valid
        Customer::clear_reset_token(&pool, customer.id).await?;
        return Err(ApiError::from(e));
    }

    tracing::info!("Password reset mail sent to customer {}", customer.id);
    Ok(ApiResponse::message(RESET_MAIL_SENT))
}
