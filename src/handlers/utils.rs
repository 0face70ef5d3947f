// Shared helpers for the resource handlers.

use crate::config;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::filter::query::filter_data_from_pairs;
use crate::filter::{FilterData, ResourceSchema};

pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    })
    .unwrap_or_default()
}

/// Full list options: projection, filters, ordering, pagination, includes.
pub fn list_filter(schema: &ResourceSchema, raw: Option<&str>) -> Result<FilterData, ApiError> {
    let mut data = search_filter(schema, raw)?;
    data.search = None;
    Ok(data)
}

/// List options plus the `q` search term.
pub fn search_filter(schema: &ResourceSchema, raw: Option<&str>) -> Result<FilterData, ApiError> {
    Ok(filter_data_from_pairs(schema, &query_pairs(raw))?)
}

/// Single-record reads only honour `select` and `include`.
pub fn detail_filter(schema: &ResourceSchema, raw: Option<&str>) -> Result<FilterData, ApiError> {
    let data = list_filter(schema, raw)?;
    Ok(FilterData { select: data.select, include: data.include, ..Default::default() })
}

/// Absolute URI under `api.public_url`.
pub fn public_url(path: &str) -> String {
    let base = &config::config().api.public_url;
    match url::Url::parse(base).and_then(|url| url.join(path)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", base.trim_end_matches('/'), path),
    }
}

/// Absolute URI of a newly created record, e.g. `http://host/api/v1/categories/7`.
pub fn resource_location(collection: &str, id: i32) -> String {
    public_url(&format!("/api/v1/{}/{}", collection, id))
}

/// Foreign key failures carry a message that depends on the operation.
pub fn on_foreign_key(message: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| match err {
        DatabaseError::ForeignKeyViolation { constraint } => {
            tracing::debug!("Foreign key violation on {}", constraint);
            ApiError::invalid_argument(message)
        }
        other => other.into(),
    }
}
