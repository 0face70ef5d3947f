use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::filter::{FieldDef, FieldKind, ResourceSchema};

/// Public shape of a customer. `password` and the reset token columns are
/// never exposed.
pub static CUSTOMERS: ResourceSchema = ResourceSchema {
    table: "customers",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer).filterable(),
        FieldDef::new("fullname", "fullname", FieldKind::Text).searchable(),
        FieldDef::new("email", "email", FieldKind::Text).searchable(),
        FieldDef::new("shippingAddress", "shipping_address", FieldKind::Text),
        FieldDef::new("phone", "phone", FieldKind::Text),
        FieldDef::new("createdAt", "created_at", FieldKind::Timestamp),
        FieldDef::new("updatedAt", "updated_at", FieldKind::Timestamp),
    ],
    relations: &[],
};

/// Full customer row, used for authentication only.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub shipping_address: String,
    pub phone: Option<String>,
    pub reset_password_token: Option<String>,
    pub reset_password_expire: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub shipping_address: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

const COLUMNS: &str = "id, fullname, email, password, shipping_address, phone, \
                       reset_password_token, reset_password_expire, created_at, updated_at";

impl Customer {
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Customer>, DatabaseError> {
        let sql = format!("SELECT {} FROM customers WHERE id = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Customer>(&sql).bind(id).fetch_optional(pool).await?)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let sql = format!("SELECT {} FROM customers WHERE email = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Customer>(&sql).bind(email).fetch_optional(pool).await?)
    }

    /// Lookup by hashed reset token; expired tokens do not match.
    pub async fn find_by_reset_token(pool: &PgPool, token_hash: &str) -> Result<Option<Customer>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM customers WHERE reset_password_token = $1 AND reset_password_expire > NOW()",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Customer>(&sql).bind(token_hash).fetch_optional(pool).await?)
    }

    pub async fn insert(pool: &PgPool, customer: &NewCustomer) -> Result<i32, DatabaseError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO customers (fullname, email, password, shipping_address, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&customer.fullname)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(&customer.shipping_address)
        .bind(&customer.phone)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update_details(pool: &PgPool, id: i32, changes: &CustomerChanges) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                fullname = COALESCE($2, fullname),
                email = COALESCE($3, email),
                shipping_address = COALESCE($4, shipping_address),
                phone = COALESCE($5, phone),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.fullname)
        .bind(&changes.email)
        .bind(&changes.shipping_address)
        .bind(&changes.phone)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set a new password hash. Any pending reset token is consumed.
    pub async fn set_password(pool: &PgPool, id: i32, password_hash: &str) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE customers SET
                password = $2,
                reset_password_token = NULL,
                reset_password_expire = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn set_reset_token(
        pool: &PgPool,
        id: i32,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE customers SET reset_password_token = $2, reset_password_expire = $3 WHERE id = $1")
            .bind(id)
            .bind(token_hash)
            .bind(expires_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn clear_reset_token(pool: &PgPool, id: i32) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE customers SET reset_password_token = NULL, reset_password_expire = NULL WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1").bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
