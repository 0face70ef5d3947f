pub mod auth;
pub mod body;
pub mod response;
pub mod validate_admin;
pub mod validate_customer;

pub use auth::jwt_auth_middleware;
pub use body::JsonBody;
pub use response::{ApiResponse, ApiResult};
pub use validate_admin::{require_superadmin, validate_admin_middleware, ValidatedAdmin};
pub use validate_customer::{validate_customer_middleware, ValidatedCustomer};
