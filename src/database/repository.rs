use serde_json::Value;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::error::RESOURCE_NOT_FOUND;
use crate::filter::{FilterData, ResourceSchema};

/// Read access to one resource, returning rows already shaped as API JSON.
pub struct Repository {
    schema: &'static ResourceSchema,
    pool: PgPool,
}

impl Repository {
    pub fn new(schema: &'static ResourceSchema, pool: PgPool) -> Self {
        Self { schema, pool }
    }

    pub async fn select_any(&self, filter_data: FilterData) -> Result<Vec<Value>, DatabaseError> {
        QueryBuilder::new(self.schema)
            .filter(filter_data)?
            .select_all(&self.pool)
            .await
    }

    /// `filter_data` still applies `select` and `include`.
    pub async fn select_one(&self, id: i32, filter_data: FilterData) -> Result<Option<Value>, DatabaseError> {
        QueryBuilder::new(self.schema)
            .filter(filter_data)?
            .by_id(id)
            .select_optional(&self.pool)
            .await
    }

    pub async fn select_404(&self, id: i32, filter_data: FilterData) -> Result<Value, DatabaseError> {
        self.select_one(id, filter_data)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(RESOURCE_NOT_FOUND.to_string()))
    }
}
