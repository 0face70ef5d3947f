// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::password::PasswordError;
use crate::auth::JwtError;
use crate::database::manager::DatabaseError;
use crate::filter::FilterError;
use crate::mail::MailError;

pub const INVALID_ARGUMENTS: &str = "invalid one or more argument(s)";
pub const UNAUTHORIZED_ACCESS: &str = "unauthorized access";
pub const INCORRECT_CREDENTIALS: &str = "email or password is incorrect";
pub const RESOURCE_NOT_FOUND: &str = "Resource Not Found";
pub const PAGE_NOT_FOUND: &str = "Page Not Found";
pub const DELETE_NOT_FOUND: &str = "record to delete does not exist.";
pub const UPDATE_NOT_FOUND: &str = "record to update not found.";
pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const PERMISSION_DENIED: &str = "you do not have permission to perform this action";

/// One entry of an error's `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    /// `shippingAddress` → `{ code: "missingShippingAddress", message: "shippingAddress field is missing" }`
    pub fn missing_field(field: &str) -> Self {
        let mut chars = field.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        Self::new(format!("missing{}", capitalized), format!("{} field is missing", field))
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // 400 Bad Request
    InvalidArgument {
        message: String,
        detail: Option<Vec<ErrorDetail>>,
    },
    AlreadyExists(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError {
        message: String,
        cause: Option<String>,
    },

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidArgument { .. } => 400,
            ApiError::AlreadyExists(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError { .. } => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidArgument { message, .. } => message,
            ApiError::AlreadyExists(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Error `type` for client handling
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument { .. } => "invalidArgument",
            ApiError::AlreadyExists(_) => "alreadyExists",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "notFound",
            ApiError::InternalServerError { .. } => "internalError",
            ApiError::ServiceUnavailable(_) => "serviceUnavailable",
        }
    }

    /// The error object placed under `"error"` in the response envelope.
    pub fn to_json(&self) -> Value {
        let mut error = json!({
            "status": self.status_code(),
            "type": self.error_type(),
            "message": self.message(),
        });

        match self {
            ApiError::InvalidArgument { detail: Some(detail), .. } => {
                error["detail"] = json!(detail);
            }
            ApiError::InternalServerError { cause: Some(cause), .. } if crate::is_development!() => {
                error["detail"] = json!([ErrorDetail::new("cause", cause.clone())]);
            }
            _ => {}
        }

        error
    }
}

// Static constructor methods
impl ApiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::InvalidArgument { message: message.into(), detail: None }
    }

    pub fn invalid_argument_with(message: impl Into<String>, detail: Vec<ErrorDetail>) -> Self {
        ApiError::InvalidArgument { message: message.into(), detail: Some(detail) }
    }

    /// The generic 400 listing every problem field.
    pub fn invalid_arguments(detail: Vec<ErrorDetail>) -> Self {
        Self::invalid_argument_with(INVALID_ARGUMENTS, detail)
    }

    pub fn invalid_email() -> Self {
        Self::invalid_argument("email is not valid")
    }

    pub fn already_exists(field: &str) -> Self {
        ApiError::AlreadyExists(format!("{} already exists", field))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn unauthorized_access() -> Self {
        Self::unauthorized(UNAUTHORIZED_ACCESS)
    }

    pub fn incorrect_credentials() -> Self {
        Self::unauthorized(INCORRECT_CREDENTIALS)
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(PERMISSION_DENIED.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn resource_not_found() -> Self {
        Self::not_found(RESOURCE_NOT_FOUND)
    }

    pub fn internal_server_error(cause: impl Into<String>) -> Self {
        ApiError::InternalServerError { message: INTERNAL_ERROR.to_string(), cause: Some(cause.into()) }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::invalid_argument(err.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::UniqueViolation { field } => ApiError::already_exists(&field),
            DatabaseError::ForeignKeyViolation { constraint } => {
                ApiError::invalid_argument(format!("operation violates relation {}", constraint))
            }
            DatabaseError::CheckViolation { constraint } => {
                ApiError::invalid_argument(format!("value violates constraint {}", constraint))
            }
            DatabaseError::OutOfRange(msg) => {
                tracing::warn!("Rejected out-of-range value: {}", msg);
                ApiError::invalid_argument("numeric value is out of range")
            }
            DatabaseError::Filter(e) => e.into(),
            DatabaseError::Unavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::ConfigMissing(name) => {
                tracing::error!("Missing database configuration: {}", name);
                ApiError::internal_server_error(format!("missing configuration {}", name))
            }
            DatabaseError::UnexpectedRow(msg) => {
                tracing::error!("Unexpected row format: {}", msg);
                ApiError::internal_server_error(msg)
            }
            DatabaseError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error(sqlx_err.to_string())
            }
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Invalid(msg) => {
                tracing::warn!("Rejected token: {}", msg);
                ApiError::unauthorized_access()
            }
            JwtError::TokenGeneration(_) | JwtError::InvalidSecret => {
                tracing::error!("JWT failure: {}", err);
                ApiError::internal_server_error(err.to_string())
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        tracing::error!("Mail delivery failed: {}", err);
        ApiError::InternalServerError { message: "email could not be sent".to_string(), cause: Some(err.to_string()) }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "success": false, "error": self.to_json() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_detail_capitalizes_code() {
        assert_eq!(
            ErrorDetail::missing_field("shippingAddress"),
            ErrorDetail::new("missingShippingAddress", "shippingAddress field is missing")
        );
        assert_eq!(ErrorDetail::missing_field("email").code, "missingEmail");
    }

    #[test]
    fn invalid_arguments_carry_detail() {
        let err = ApiError::invalid_arguments(vec![ErrorDetail::missing_field("name")]);
        assert_eq!(
            err.to_json(),
            json!({
                "status": 400,
                "type": "invalidArgument",
                "message": "invalid one or more argument(s)",
                "detail": [{ "code": "missingName", "message": "name field is missing" }]
            })
        );
    }

    #[test]
    fn plain_errors_have_no_detail_key() {
        let json = ApiError::already_exists("email").to_json();
        assert_eq!(json, json!({ "status": 400, "type": "alreadyExists", "message": "email already exists" }));
        assert_eq!(
            ApiError::resource_not_found().to_json(),
            json!({ "status": 404, "type": "notFound", "message": "Resource Not Found" })
        );
    }

    #[test]
    fn status_codes_match_types() {
        assert_eq!(ApiError::unauthorized_access().status_code(), 401);
        assert_eq!(ApiError::forbidden().status_code(), 403);
        assert_eq!(ApiError::internal_server_error("boom").status_code(), 500);
        assert_eq!(ApiError::internal_server_error("boom").message(), INTERNAL_ERROR);
    }

    #[test]
    fn filter_errors_become_invalid_argument() {
        let err: ApiError = FilterError::InvalidLimit.into();
        assert_eq!(err.error_type(), "invalidArgument");
        assert_eq!(err.message(), "limit must be a positive integer");
    }

    #[test]
    fn numeric_overflow_is_a_client_error() {
        let err: ApiError = DatabaseError::OutOfRange("numeric field overflow".into()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json(), json!({ "status": 400, "type": "invalidArgument", "message": "numeric value is out of range" }));
    }

    #[test]
    fn unique_violations_name_the_field() {
        let err: ApiError = DatabaseError::UniqueViolation { field: "name".into() }.into();
        assert_eq!(err, ApiError::AlreadyExists("name already exists".into()));
    }
}
