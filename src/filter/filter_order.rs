use super::error::FilterError;
use super::schema::ResourceSchema;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Map API field names onto columns, rejecting anything the schema does not expose.
    pub fn validate_and_resolve(
        schema: &ResourceSchema,
        order: &[FilterOrderInfo],
    ) -> Result<Vec<FilterOrderInfo>, FilterError> {
        order
            .iter()
            .map(|info| {
                let field = schema
                    .field(&info.column)
                    .ok_or_else(|| FilterError::InvalidColumn(info.column.clone()))?;
                Ok(FilterOrderInfo { column: field.column.to_string(), sort: info.sort })
            })
            .collect()
    }

    /// Always ends with `id` so paging is stable across equal sort keys.
    pub fn generate(table: &str, infos: &[FilterOrderInfo]) -> String {
        let mut parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\".\"{}\" {}", table, i.column, i.sort.to_sql()))
            .collect();
        if !infos.iter().any(|i| i.column == "id") {
            parts.push(format!("\"{}\".\"id\" {}", table, SortDirection::Asc.to_sql()));
        }
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::schema::fixtures::WIDGETS;

    #[test]
    fn default_order_is_by_id() {
        assert_eq!(FilterOrder::generate("widgets", &[]), "ORDER BY \"widgets\".\"id\" ASC");
    }

    #[test]
    fn resolves_api_names_and_appends_tiebreaker() {
        let order = vec![FilterOrderInfo { column: "createdAt".into(), sort: SortDirection::Desc }];
        let resolved = FilterOrder::validate_and_resolve(&WIDGETS, &order).unwrap();
        assert_eq!(
            FilterOrder::generate("widgets", &resolved),
            "ORDER BY \"widgets\".\"created_at\" DESC, \"widgets\".\"id\" ASC"
        );
    }

    #[test]
    fn explicit_id_order_is_not_duplicated() {
        let order = vec![FilterOrderInfo { column: "id".into(), sort: SortDirection::Desc }];
        let resolved = FilterOrder::validate_and_resolve(&WIDGETS, &order).unwrap();
        assert_eq!(FilterOrder::generate("widgets", &resolved), "ORDER BY \"widgets\".\"id\" DESC");
    }

    #[test]
    fn rejects_unknown_sort_field() {
        let order = vec![FilterOrderInfo { column: "drop table".into(), sort: SortDirection::Asc }];
        assert!(FilterOrder::validate_and_resolve(&WIDGETS, &order).is_err());
    }
}
