use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("{0} is not a valid field")]
    InvalidColumn(String),

    #[error("{0} cannot be used as a filter")]
    NotFilterable(String),

    #[error("invalid sort direction '{direction}' for {column}, expected asc or desc")]
    InvalidSortDirection { column: String, direction: String },

    #[error("unsupported filter operator '{0}'")]
    UnsupportedOperator(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },

    #[error("{0} is not a valid include")]
    InvalidInclude(String),

    #[error("limit must be a positive integer")]
    InvalidLimit,

    #[error("offset must be a non-negative integer")]
    InvalidOffset,

    #[error("search term must not be empty")]
    EmptySearch,
}
