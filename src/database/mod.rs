pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager, ShopPool};
pub use models::admin::ADMINS;
pub use models::category::CATEGORIES;
pub use models::customer::CUSTOMERS;
pub use models::product::PRODUCTS;
pub use repository::Repository;
