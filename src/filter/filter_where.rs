use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::FilterError;
use super::schema::{FieldKind, ResourceSchema};
use super::types::{FilterOp, FilterWhereInfo, RawCondition, SqlParam};

pub struct FilterWhere<'a> {
    table: &'a str,
    param_values: Vec<SqlParam>,
    param_index: usize,
}

impl<'a> FilterWhere<'a> {
    pub fn new(table: &'a str, starting_param_index: usize) -> Self {
        Self {
            table,
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Check raw query conditions against the schema and type their values.
    pub fn resolve(schema: &ResourceSchema, raw: &[RawCondition]) -> Result<Vec<FilterWhereInfo>, FilterError> {
        raw.iter()
            .map(|condition| {
                let field = schema
                    .field(&condition.field)
                    .ok_or_else(|| FilterError::InvalidColumn(condition.field.clone()))?;
                if !field.filterable {
                    return Err(FilterError::NotFilterable(condition.field.clone()));
                }
                let data = Self::typed_value(field.kind, &condition.field, &condition.value)?;
                Ok(FilterWhereInfo { column: field.column, operator: condition.operator, data })
            })
            .collect()
    }

    fn typed_value(kind: FieldKind, field: &str, value: &str) -> Result<SqlParam, FilterError> {
        let invalid = || FilterError::InvalidValue { field: field.to_string(), value: value.to_string() };
        match kind {
            FieldKind::Integer => value.parse::<i64>().map(SqlParam::Int).map_err(|_| invalid()),
            FieldKind::Decimal => Decimal::from_str(value).map(SqlParam::Decimal).map_err(|_| invalid()),
            FieldKind::Text | FieldKind::Timestamp => Err(FilterError::NotFilterable(field.to_string())),
        }
    }

    /// Returns the joined predicate (empty when there is nothing to filter on)
    /// and the parameters it binds, numbered from the starting index.
    pub fn generate(
        mut self,
        conditions: &[FilterWhereInfo],
        search: Option<(&str, Vec<&'static str>)>,
    ) -> (String, Vec<SqlParam>) {
        let mut sql_conditions = vec![];

        for condition in conditions {
            let placeholder = self.param(condition.data.clone());
            sql_conditions.push(format!(
                "\"{}\".\"{}\" {} {}",
                self.table,
                condition.column,
                condition.operator.to_sql(),
                placeholder
            ));
        }

        if let Some((term, columns)) = search {
            if !columns.is_empty() {
                let placeholder = self.param(SqlParam::Text(format!("%{}%", escape_like(term))));
                let parts = columns
                    .iter()
                    .map(|c| format!("\"{}\".\"{}\" {} {}", self.table, c, FilterOp::ILike.to_sql(), placeholder))
                    .collect::<Vec<_>>();
                sql_conditions.push(format!("({})", parts.join(" OR ")));
            }
        }

        (sql_conditions.join(" AND "), self.param_values)
    }

    fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::schema::fixtures::WIDGETS;

    fn raw(field: &str, operator: FilterOp, value: &str) -> RawCondition {
        RawCondition { field: field.into(), operator, value: value.into() }
    }

    #[test]
    fn resolves_decimal_and_integer_values() {
        let resolved = FilterWhere::resolve(
            &WIDGETS,
            &[raw("price", FilterOp::Gte, "49.99"), raw("binId", FilterOp::Eq, "3")],
        )
        .unwrap();
        assert_eq!(resolved[0].data, SqlParam::Decimal(Decimal::new(4999, 2)));
        assert_eq!(resolved[1].column, "bin_id");
        assert_eq!(resolved[1].data, SqlParam::Int(3));
    }

    #[test]
    fn integer_fields_reject_fractions() {
        let err = FilterWhere::resolve(&WIDGETS, &[raw("binId", FilterOp::Eq, "2.5")]).unwrap_err();
        assert_eq!(err, FilterError::InvalidValue { field: "binId".into(), value: "2.5".into() });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = FilterWhere::resolve(&WIDGETS, &[raw("password", FilterOp::Eq, "x")]).unwrap_err();
        assert_eq!(err, FilterError::InvalidColumn("password".into()));
    }

    #[test]
    fn generates_numbered_placeholders() {
        let resolved = FilterWhere::resolve(
            &WIDGETS,
            &[raw("price", FilterOp::Gte, "50"), raw("price", FilterOp::Lt, "100")],
        )
        .unwrap();
        let (sql, params) = FilterWhere::new("widgets", 0).generate(&resolved, None);
        assert_eq!(sql, "\"widgets\".\"price\" >= $1 AND \"widgets\".\"price\" < $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn search_shares_one_escaped_parameter() {
        let (sql, params) = FilterWhere::new("widgets", 2).generate(&[], Some(("50%_off", vec!["name", "label"])));
        assert_eq!(sql, "(\"widgets\".\"name\" ILIKE $3 OR \"widgets\".\"label\" ILIKE $3)");
        assert_eq!(params, vec![SqlParam::Text("%50\\%\\_off%".into())]);
    }

    #[test]
    fn empty_input_generates_empty_predicate() {
        let (sql, params) = FilterWhere::new("widgets", 0).generate(&[], None);
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }
}
