//! Query-string mini-language used by list endpoints:
//!
//! - `select=name,price` projects fields
//! - `order_by=name.desc,price` sorts (direction defaults to asc)
//! - `price=gte:50,lt:100` or `price=gte:50&price=lt:100` filters numeric fields
//! - `limit=10&offset=50` paginates
//! - `include=category` embeds a related row
//! - `q=shirt` searches text fields (search endpoints only)

use super::error::FilterError;
use super::schema::ResourceSchema;
use super::types::{FilterData, FilterOp, FilterOrderInfo, RawCondition, SortDirection};

const RESERVED_KEYS: &[&str] = &["select", "order_by", "limit", "offset", "include", "q"];

/// `"a, b,,c"` → `["a", "b", "c"]`
pub fn selected_query(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"name.desc,price"` → `[name DESC, price ASC]`
pub fn ordered_query(query: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
    let mut out = Vec::new();
    for part in query.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (column, direction) = match trimmed.split_once('.') {
            Some((column, direction)) => (column.trim(), direction.trim()),
            None => (trimmed, "asc"),
        };
        let sort = if direction.eq_ignore_ascii_case("asc") || direction.is_empty() {
            SortDirection::Asc
        } else if direction.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            return Err(FilterError::InvalidSortDirection {
                column: column.to_string(),
                direction: direction.to_string(),
            });
        };
        out.push(FilterOrderInfo { column: column.to_string(), sort });
    }
    Ok(out)
}

/// `["gte:50", "lt:100"]` or `["gte:50,lt:100"]` → `[(gte, "50"), (lt, "100")]`.
/// A bare value means equality.
pub fn filtered_query<S: AsRef<str>>(field: &str, values: &[S]) -> Result<Vec<RawCondition>, FilterError> {
    let mut out = Vec::new();
    for value in values {
        for term in value.as_ref().split(',') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            let (operator, raw) = match term.split_once(':') {
                Some((op, raw)) => {
                    let operator = FilterOp::from_query(op.trim())
                        .ok_or_else(|| FilterError::UnsupportedOperator(op.trim().to_string()))?;
                    (operator, raw.trim())
                }
                None => (FilterOp::Eq, term),
            };
            if raw.is_empty() {
                return Err(FilterError::InvalidValue { field: field.to_string(), value: term.to_string() });
            }
            out.push(RawCondition { field: field.to_string(), operator, value: raw.to_string() });
        }
    }
    Ok(out)
}

pub fn parse_limit(raw: &str) -> Result<i64, FilterError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FilterError::InvalidLimit),
    }
}

pub fn parse_offset(raw: &str) -> Result<i64, FilterError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(FilterError::InvalidOffset),
    }
}

/// Build `FilterData` from decoded query pairs. Keys that are neither reserved
/// nor a filterable field of `schema` are ignored.
pub fn filter_data_from_pairs(
    schema: &ResourceSchema,
    pairs: &[(String, String)],
) -> Result<FilterData, FilterError> {
    let mut data = FilterData::default();

    for (key, value) in pairs {
        match key.as_str() {
            "select" => {
                data.select.get_or_insert_with(Vec::new).extend(selected_query(value));
            }
            "order_by" => data.order.extend(ordered_query(value)?),
            "limit" => data.limit = Some(parse_limit(value)?),
            "offset" => data.offset = Some(parse_offset(value)?),
            "include" => data.include.extend(selected_query(value)),
            "q" => data.search = Some(value.clone()),
            _ => {}
        }
    }

    for (key, value) in pairs {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        if schema.field(key).is_some_and(|field| field.filterable) {
            data.where_clause.extend(filtered_query(key, std::slice::from_ref(value))?);
        }
    }

    Ok(data)
}
