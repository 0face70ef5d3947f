/// Column kinds the filter layer knows how to project and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Timestamp,
}

/// One exposed column: `name` is what clients see, `column` what Postgres has.
#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub filterable: bool,
    pub searchable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind, filterable: false, searchable: false }
    }

    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Projection expression aliased to the API name. Decimals go out as text
    /// so prices keep their scale in JSON.
    pub fn select_expression(&self, table: &str) -> String {
        match self.kind {
            FieldKind::Decimal => format!("\"{}\".\"{}\"::text AS \"{}\"", table, self.column, self.name),
            _ => format!("\"{}\".\"{}\" AS \"{}\"", table, self.column, self.name),
        }
    }
}

/// A to-one relation that can be embedded with `include=<name>`.
#[derive(Debug)]
pub struct RelationDef {
    pub name: &'static str,
    pub schema: &'static ResourceSchema,
    pub local_column: &'static str,
}

/// The exposed shape of a table. Anything not listed here (password hashes,
/// reset tokens) can never be selected, sorted or filtered on.
#[derive(Debug)]
pub struct ResourceSchema {
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub relations: &'static [RelationDef],
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Correlated sub-select embedding the related row as a JSON object.
    pub fn relation_expression(&self, relation: &RelationDef) -> String {
        let related = relation.schema;
        let columns = related
            .fields
            .iter()
            .map(|f| f.select_expression(related.table))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "(SELECT row_to_json(r) FROM (SELECT {} FROM \"{}\" WHERE \"{}\".\"id\" = \"{}\".\"{}\") r) AS \"{}\"",
            columns, related.table, related.table, self.table, relation.local_column, relation.name
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub static WIDGETS: ResourceSchema = ResourceSchema {
        table: "widgets",
        fields: &[
            FieldDef::new("id", "id", FieldKind::Integer).filterable(),
            FieldDef::new("name", "name", FieldKind::Text).searchable(),
            FieldDef::new("price", "price", FieldKind::Decimal).filterable(),
            FieldDef::new("binId", "bin_id", FieldKind::Integer).filterable(),
            FieldDef::new("createdAt", "created_at", FieldKind::Timestamp),
        ],
        relations: &[RelationDef { name: "bin", schema: &BINS, local_column: "bin_id" }],
    };

    pub static BINS: ResourceSchema = ResourceSchema {
        table: "bins",
        fields: &[
            FieldDef::new("id", "id", FieldKind::Integer),
            FieldDef::new("label", "label", FieldKind::Text),
        ],
        relations: &[],
    };
}

#[cfg(test)]
mod tests {
    use super::fixtures::WIDGETS;
    use super::*;

    #[test]
    fn decimal_fields_are_projected_as_text() {
        let price = WIDGETS.field("price").unwrap();
        assert_eq!(price.select_expression("widgets"), "\"widgets\".\"price\"::text AS \"price\"");
    }

    #[test]
    fn api_names_are_aliased_from_columns() {
        let bin = WIDGETS.field("binId").unwrap();
        assert_eq!(bin.select_expression("widgets"), "\"widgets\".\"bin_id\" AS \"binId\"");
        assert!(WIDGETS.field("bin_id").is_none());
    }

    #[test]
    fn relation_expression_is_correlated_on_local_column() {
        let rel = WIDGETS.relation("bin").unwrap();
        let sql = WIDGETS.relation_expression(rel);
        assert!(sql.contains("WHERE \"bins\".\"id\" = \"widgets\".\"bin_id\""));
        assert!(sql.ends_with("AS \"bin\""));
    }
}
