pub mod admin;
pub mod category;
pub mod customer;
pub mod product;

pub use admin::{Admin, AdminChanges, NewAdmin};
pub use category::{CategoryChanges, NewCategory};
pub use customer::{Customer, CustomerChanges, NewCustomer};
pub use product::{NewProduct, ProductChanges};

use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Move an identity sequence past explicitly supplied ids so later inserts
/// without an id do not collide.
pub(crate) async fn sync_identity(pool: &PgPool, table: &'static str) -> Result<(), DatabaseError> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), GREATEST((SELECT MAX(id) FROM {table}), 1))"
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
