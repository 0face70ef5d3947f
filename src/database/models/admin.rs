use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::filter::{FieldDef, FieldKind, ResourceSchema};
use crate::validate::AdminRole;

pub static ADMINS: ResourceSchema = ResourceSchema {
    table: "admins",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer).filterable(),
        FieldDef::new("username", "username", FieldKind::Text).searchable(),
        FieldDef::new("email", "email", FieldKind::Text).searchable(),
        FieldDef::new("role", "role", FieldKind::Text),
        FieldDef::new("createdAt", "created_at", FieldKind::Timestamp),
        FieldDef::new("updatedAt", "updated_at", FieldKind::Timestamp),
    ],
    relations: &[],
};

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<AdminRole>,
}

const COLUMNS: &str = "id, username, email, password, role, created_at, updated_at";

impl Admin {
    pub fn is_superadmin(&self) -> bool {
        self.role == AdminRole::Superadmin.as_str()
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!("SELECT {} FROM admins WHERE id = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql).bind(id).fetch_optional(pool).await?)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!("SELECT {} FROM admins WHERE email = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql).bind(email).fetch_optional(pool).await?)
    }

    pub async fn insert(pool: &PgPool, admin: &NewAdmin) -> Result<i32, DatabaseError> {
        let id = sqlx::query_scalar(
            "INSERT INTO admins (username, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i32, changes: &AdminChanges) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE admins SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.role.map(|r| r.as_str()))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_password(pool: &PgPool, id: i32, password_hash: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE admins SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1").bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
