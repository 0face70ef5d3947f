use std::time::Duration;

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config;
use crate::filter::FilterError;

/// Errors from the database layer, classified so the HTTP layer can map them.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique violation on {field}")]
    UniqueViolation { field: String },

    #[error("Foreign key violation: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("Check violation: {constraint}")]
    CheckViolation { constraint: String },

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected row: {0}")]
    UnexpectedRow(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Migration failed: {0}")]
    Migration(#[from] MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let code = db.code().map(|c| c.into_owned());
            let constraint = db.constraint().unwrap_or_default().to_string();
            match code.as_deref() {
                Some("23505") => return DatabaseError::UniqueViolation { field: constraint_field(&constraint) },
                Some("23503") => return DatabaseError::ForeignKeyViolation { constraint },
                Some("23514") => return DatabaseError::CheckViolation { constraint },
                Some("22003") => return DatabaseError::OutOfRange(db.message().to_string()),
                _ => {}
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::Unavailable(err.to_string())
            }
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// API field name behind a `<table>_<column>_key` / `<table>_pkey` constraint.
fn constraint_field(constraint: &str) -> String {
    if constraint.ends_with("_pkey") {
        return "id".to_string();
    }
    let column = constraint
        .split_once('_')
        .map(|(_, rest)| rest)
        .unwrap_or(constraint);
    let column = column.strip_suffix("_key").unwrap_or(column);

    let mut field = String::with_capacity(column.len());
    let mut upper = false;
    for c in column.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            field.extend(c.to_uppercase());
            upper = false;
        } else {
            field.push(c);
        }
    }
    field
}

/// Shared pool handed to handlers and middleware through request extensions.
#[derive(Clone, Debug)]
pub struct ShopPool(pub PgPool);

/// Pool construction, migrations and health checks.
pub struct DatabaseManager;

impl DatabaseManager {
    pub fn database_url() -> Result<String, DatabaseError> {
        std::env::var("DATABASE_URL").map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))
    }

    fn pool_options() -> PgPoolOptions {
        let settings = &config::config().database;
        PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connection_timeout))
    }

    /// Connect eagerly, failing fast when the database is unreachable.
    pub async fn connect() -> Result<PgPool, DatabaseError> {
        let url = Self::database_url()?;
        let pool = Self::pool_options().connect(&url).await?;
        info!(
            "Connected to database (max_connections={})",
            config::config().database.max_connections
        );
        Ok(pool)
    }

    /// Build a pool that only connects on first use.
    pub fn connect_lazy(url: &str) -> Result<PgPool, DatabaseError> {
        Ok(Self::pool_options().connect_lazy(url)?)
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_names_map_to_api_fields() {
        assert_eq!(constraint_field("categories_name_key"), "name");
        assert_eq!(constraint_field("customers_email_key"), "email");
        assert_eq!(constraint_field("products_thumbnail_image_key"), "thumbnailImage");
        assert_eq!(constraint_field("admins_pkey"), "id");
    }

    #[test]
    fn pool_errors_are_unavailable() {
        assert!(matches!(DatabaseError::from(sqlx::Error::PoolTimedOut), DatabaseError::Unavailable(_)));
        assert!(matches!(DatabaseError::from(sqlx::Error::RowNotFound), DatabaseError::NotFound(_)));
    }

    #[test]
    fn missing_url_is_reported() {
        assert!(DatabaseManager::connect_lazy("not a url").is_err());
    }
}
