use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "eq")] Eq,
    #[serde(rename = "ne")] Ne,
    #[serde(rename = "gt")] Gt,
    #[serde(rename = "gte")] Gte,
    #[serde(rename = "lt")] Lt,
    #[serde(rename = "lte")] Lte,
    #[serde(rename = "ilike")] ILike,
}

impl FilterOp {
    /// Operators accepted in `field=op:value` query terms.
    pub fn from_query(op: &str) -> Option<Self> {
        match op.to_ascii_lowercase().as_str() {
            "eq" => Some(FilterOp::Eq),
            "ne" => Some(FilterOp::Ne),
            "gt" => Some(FilterOp::Gt),
            "gte" => Some(FilterOp::Gte),
            "lt" => Some(FilterOp::Lt),
            "lte" => Some(FilterOp::Lte),
            _ => None,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::ILike => "ILIKE",
        }
    }
}

/// Typed bind value produced by the filter layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

/// Everything a list request asked for, before it is checked against a schema.
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub select: Option<Vec<String>>,
    pub where_clause: Vec<RawCondition>,
    pub order: Vec<FilterOrderInfo>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub include: Vec<String>,
    pub search: Option<String>,
}

/// A `field=op:value` term as it appeared in the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCondition {
    pub field: String,
    pub operator: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub column: &'static str,
    pub operator: FilterOp,
    pub data: SqlParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
