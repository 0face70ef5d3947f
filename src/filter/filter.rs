use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::schema::{FieldDef, RelationDef, ResourceSchema};
use super::types::{FilterData, FilterOp, FilterOrderInfo, FilterWhereInfo, SqlParam, SqlResult};

pub struct Filter {
    schema: &'static ResourceSchema,
    select_fields: Vec<&'static FieldDef>,
    includes: Vec<&'static RelationDef>,
    where_data: Vec<FilterWhereInfo>,
    search: Option<String>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            select_fields: vec![],
            includes: vec![],
            where_data: vec![],
            search: None,
            order_data: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(select) = data.select { self.select(&select)?; }
        if !data.include.is_empty() { self.include(&data.include)?; }
        if !data.where_clause.is_empty() {
            self.where_data = FilterWhere::resolve(self.schema, &data.where_clause)?;
        }
        if let Some(term) = data.search { self.search(term)?; }
        if !data.order.is_empty() { self.order(&data.order)?; }
        if let Some(limit) = data.limit { self.limit(limit)?; }
        if let Some(offset) = data.offset { self.offset(offset)?; }
        Ok(self)
    }

    pub fn select(&mut self, names: &[String]) -> Result<&mut Self, FilterError> {
        self.select_fields = names
            .iter()
            .map(|name| self.schema.field(name).ok_or_else(|| FilterError::InvalidColumn(name.clone())))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn include(&mut self, names: &[String]) -> Result<&mut Self, FilterError> {
        for name in names {
            let relation = self
                .schema
                .relation(name)
                .ok_or_else(|| FilterError::InvalidInclude(name.clone()))?;
            if !self.includes.iter().any(|r| r.name == relation.name) {
                self.includes.push(relation);
            }
        }
        Ok(self)
    }

    /// Restrict to a single primary key.
    pub fn by_id(&mut self, id: i32) -> &mut Self {
        self.where_data.push(FilterWhereInfo { column: "id", operator: FilterOp::Eq, data: SqlParam::Int(id as i64) });
        self
    }

    pub fn search(&mut self, term: String) -> Result<&mut Self, FilterError> {
        let term = term.trim().to_string();
        if term.is_empty() {
            return Err(FilterError::EmptySearch);
        }
        self.search = Some(term);
        Ok(self)
    }

    pub fn order(&mut self, order: &[FilterOrderInfo]) -> Result<&mut Self, FilterError> {
        self.order_data = FilterOrder::validate_and_resolve(self.schema, order)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64) -> Result<&mut Self, FilterError> {
        if limit <= 0 { return Err(FilterError::InvalidLimit); }

        // Apply max limit from config
        let max_limit = crate::config::CONFIG.filter.max_limit.unwrap_or(i64::MAX);
        let applied_limit = if limit > max_limit {
            if crate::config::CONFIG.filter.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max_limit);
            }
            max_limit
        } else {
            limit
        };

        self.limit = Some(applied_limit);
        Ok(self)
    }

    pub fn offset(&mut self, offset: i64) -> Result<&mut Self, FilterError> {
        if offset < 0 { return Err(FilterError::InvalidOffset); }
        self.offset = Some(offset);
        Ok(self)
    }

    /// Whole query, one JSON object per row in the `row` column.
    pub fn to_sql(&self) -> SqlResult {
        let table = self.schema.table;
        let search = self
            .search
            .as_deref()
            .map(|term| (term, self.schema.searchable_fields().map(|f| f.column).collect()));
        let (where_clause, params) = FilterWhere::new(table, 0).generate(&self.where_data, search);

        let inner = [
            format!("SELECT {}", self.build_select_clause()),
            format!("FROM \"{}\"", table),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            FilterOrder::generate(table, &self.order_data),
            self.build_limit_clause(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let query = format!("SELECT row_to_json(t) AS row FROM ({}) t", inner);
        if crate::config::CONFIG.filter.debug_logging {
            tracing::debug!(sql = %query, params = params.len(), "generated filter query");
        }
        SqlResult { query, params }
    }

    fn build_select_clause(&self) -> String {
        let fields: Vec<&FieldDef> = if self.select_fields.is_empty() {
            self.schema.fields.iter().collect()
        } else {
            self.select_fields.clone()
        };
        fields
            .into_iter()
            .map(|f| f.select_expression(self.schema.table))
            .chain(self.includes.iter().map(|r| self.schema.relation_expression(r)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            (None, Some(o)) => format!("OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::query::filter_data_from_pairs;
    use crate::filter::schema::fixtures::WIDGETS;

    fn filter_for(items: &[(&str, &str)]) -> Result<Filter, FilterError> {
        let pairs: Vec<(String, String)> = items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let mut filter = Filter::new(&WIDGETS);
        filter.assign(filter_data_from_pairs(&WIDGETS, &pairs)?)?;
        Ok(filter)
    }

    #[test]
    fn selects_all_exposed_fields_by_default() {
        let sql = filter_for(&[]).unwrap().to_sql();
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM (SELECT \"widgets\".\"id\" AS \"id\", \"widgets\".\"name\" AS \"name\", \
             \"widgets\".\"price\"::text AS \"price\", \"widgets\".\"bin_id\" AS \"binId\", \
             \"widgets\".\"created_at\" AS \"createdAt\" FROM \"widgets\" ORDER BY \"widgets\".\"id\" ASC) t"
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn projection_order_and_pagination() {
        let sql = filter_for(&[("select", "name"), ("order_by", "name.desc"), ("limit", "10"), ("offset", "50")])
            .unwrap()
            .to_sql();
        assert!(sql.query.contains("SELECT \"widgets\".\"name\" AS \"name\" FROM"));
        assert!(sql.query.contains("ORDER BY \"widgets\".\"name\" DESC, \"widgets\".\"id\" ASC LIMIT 10 OFFSET 50"));
    }

    #[test]
    fn range_filters_become_bound_parameters() {
        let sql = filter_for(&[("price", "gte:50,lt:100")]).unwrap().to_sql();
        assert!(sql.query.contains("WHERE \"widgets\".\"price\" >= $1 AND \"widgets\".\"price\" < $2"));
        assert_eq!(sql.params.len(), 2);
    }

    #[test]
    fn limit_is_capped_by_config() {
        let max = crate::config::CONFIG.filter.max_limit.unwrap_or(i64::MAX);
        let mut filter = Filter::new(&WIDGETS);
        filter.limit(i64::MAX).unwrap();
        assert!(filter.to_sql().query.contains(&format!("LIMIT {}", max)));
    }

    #[test]
    fn by_id_combines_with_select() {
        let mut filter = Filter::new(&WIDGETS);
        filter.select(&["name".to_string()]).unwrap().by_id(7);
        let sql = filter.to_sql();
        assert!(sql.query.contains("WHERE \"widgets\".\"id\" = $1"));
        assert_eq!(sql.params, vec![SqlParam::Int(7)]);
    }

    #[test]
    fn include_embeds_relation() {
        let sql = filter_for(&[("include", "bin")]).unwrap().to_sql();
        assert!(sql.query.contains("AS \"bin\""));
        assert!(matches!(filter_for(&[("include", "owner")]), Err(FilterError::InvalidInclude(_))));
    }

    #[test]
    fn search_uses_searchable_fields_only() {
        let sql = filter_for(&[("q", "bolt")]).unwrap().to_sql();
        assert!(sql.query.contains("(\"widgets\".\"name\" ILIKE $1)"));
        assert!(matches!(filter_for(&[("q", "   ")]), Err(FilterError::EmptySearch)));
    }

    #[test]
    fn unknown_select_field_is_rejected() {
        assert_eq!(
            filter_for(&[("select", "name,password")]).err(),
            Some(FilterError::InvalidColumn("password".into()))
        );
    }
}
