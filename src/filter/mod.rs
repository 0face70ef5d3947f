pub mod types;
pub mod schema;
pub mod query;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::Filter;
pub use schema::{FieldDef, FieldKind, RelationDef, ResourceSchema};
