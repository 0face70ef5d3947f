use serde_json::Value;
use sqlx::{self, postgres::PgArguments, postgres::PgRow, PgPool, Postgres, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterData, ResourceSchema, SqlParam, SqlResult};

/// Runs a `Filter` and decodes each `row_to_json` row.
pub struct QueryBuilder {
    filter: Filter,
}

impl QueryBuilder {
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self { filter: Filter::new(schema) }
    }

    pub fn filter(mut self, filter_data: FilterData) -> Result<Self, DatabaseError> {
        self.filter.assign(filter_data)?;
        Ok(self)
    }

    pub fn by_id(mut self, id: i32) -> Self {
        self.filter.by_id(id);
        self
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<Value>, DatabaseError> {
        let sql_result = self.filter.to_sql();
        let rows = build_query(&sql_result).fetch_all(pool).await?;
        rows.iter().map(decode_row).collect()
    }

    pub async fn select_optional(self, pool: &PgPool) -> Result<Option<Value>, DatabaseError> {
        let sql_result = self.filter.to_sql();
        let row = build_query(&sql_result).fetch_optional(pool).await?;
        row.as_ref().map(decode_row).transpose()
    }
}

fn build_query(sql_result: &SqlResult) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    sql_result
        .params
        .iter()
        .fold(sqlx::query(&sql_result.query), bind_param)
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    param: &SqlParam,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match param {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Decimal(d) => q.bind(*d),
        SqlParam::Text(s) => q.bind(s.clone()),
    }
}

fn decode_row(row: &PgRow) -> Result<Value, DatabaseError> {
    row.try_get::<Value, _>("row")
        .map_err(|e| DatabaseError::UnexpectedRow(e.to_string()))
}
