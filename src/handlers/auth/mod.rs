// handlers/auth - /api/v1/auth (customer self-service)
//
// register, login, forgot-password and reset-password are public; the rest
// require a customer token.

use serde::Deserialize;

pub mod change_password; // PUT  /api/v1/auth/change-password
pub mod forgot_password; // POST /api/v1/auth/forgot-password
pub mod login; //           POST /api/v1/auth/login
pub mod me; //              GET  /api/v1/auth/me
pub mod register; //        POST /api/v1/auth/register
pub mod reset_password; //  POST /api/v1/auth/reset-password/:resettoken
pub mod update_details; //  PUT  /api/v1/auth/update-details

pub use change_password::customer_change_password;
pub use forgot_password::forgot_password;
pub use login::customer_login;
pub use me::customer_me;
pub use register::customer_register;
pub use reset_password::reset_password;
pub use update_details::customer_update_details;

/// Body shared by customer and admin login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body shared by customer and admin password changes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub(crate) const CURRENT_PASSWORD_INCORRECT: &str = "current password is incorrect";
pub(crate) const PASSWORD_UPDATED: &str = "password has been updated";
