//! Resource schemas
//!
//! A schema is the ordered list of columns a resource exposes together with the
//! rule each value must satisfy. Its order fixes the column order of inserts.

use crate::query_builder::ParamType;

/// Validation rule attached to a schema field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Any string
    Text,
    /// A number strictly greater than zero
    PositiveNumber,
    /// `{lat, lng}` object with latitude in [-90, 90] and longitude in [-180, 180]
    Coordinates,
}

impl FieldRule {
    /// PostgreSQL column type used when creating the table
    pub fn column_type(&self) -> &'static str {
        match self {
            FieldRule::Text => "TEXT",
            FieldRule::PositiveNumber => "NUMERIC",
            FieldRule::Coordinates => "JSONB",
        }
    }

    /// SQL type values of this field are bound as
    pub fn param_type(&self) -> ParamType {
        match self {
            FieldRule::Text => ParamType::Text,
            FieldRule::PositiveNumber => ParamType::Numeric,
            FieldRule::Coordinates => ParamType::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: &'static str,
    pub rule: FieldRule,
}

/// Ordered column description of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    table: &'static str,
    entity: &'static str,
    fields: Vec<SchemaField>,
}

impl Schema {
    /// Name of the primary key column every schema-backed table carries
    pub const ID_FIELD: &'static str = "id";

    pub fn new(table: &'static str, entity: &'static str) -> Self {
        Self {
            table,
            entity,
            fields: Vec::new(),
        }
    }

    /// Append a field; fields keep the order they are declared in
    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.push(SchemaField { name, rule });
        self
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Human readable name of one row, used in error messages
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// True for declared fields and the primary key
    pub fn has_column(&self, name: &str) -> bool {
        name == Self::ID_FIELD || self.get(name).is_some()
    }

    /// Bind type for `column`; unknown columns stay untyped
    pub fn param_type(&self, column: &str) -> ParamType {
        if column == Self::ID_FIELD {
            return ParamType::Uuid;
        }
        self.get(column)
            .map_or(ParamType::Untyped, |field| field.rule.param_type())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Message for a missing row of this schema
    pub fn missing_row_message(&self, id: &str) -> String {
        format!("{} with id {} does not exist", self.entity, id)
    }

    /// CREATE TABLE statement for this schema with a generated uuid primary key
    pub fn create_table_sql(&self) -> String {
        let mut columns = vec![format!(
            "{} UUID PRIMARY KEY DEFAULT gen_random_uuid()",
            Self::ID_FIELD
        )];
        columns.extend(
            self.fields
                .iter()
                .map(|field| format!("{} {}", field.name, field.rule.column_type())),
        );

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            columns.join(", ")
        )
    }
}

/// Schema of the `moths` table
pub fn moths_schema() -> Schema {
    Schema::new("moths", "moth")
        .field("species", FieldRule::Text)
        .field("wingspan", FieldRule::PositiveNumber)
        .field("weight", FieldRule::PositiveNumber)
        .field("last_spotted", FieldRule::Coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_keeps_declaration_order() {
        let schema = moths_schema();
        let keys: Vec<_> = schema.keys().collect();
        assert_eq!(keys, vec!["species", "wingspan", "weight", "last_spotted"]);
        assert_eq!(schema.table(), "moths");
        assert_eq!(schema.entity(), "moth");
    }

    #[test]
    fn test_has_column_includes_id() {
        let schema = moths_schema();
        assert!(schema.has_column("id"));
        assert!(schema.has_column("weight"));
        assert!(!schema.has_column("colour"));
    }

    #[test]
    fn test_create_table_sql() {
        let schema = Schema::new("bats", "bat")
            .field("name", FieldRule::Text)
            .field("mass", FieldRule::PositiveNumber);

        assert_eq!(
            schema.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS bats (id UUID PRIMARY KEY DEFAULT gen_random_uuid(), name TEXT, mass NUMERIC)"
        );
    }

    #[test]
    fn test_param_type_follows_the_column() {
        let schema = moths_schema();
        assert_eq!(schema.param_type("id"), ParamType::Uuid);
        assert_eq!(schema.param_type("species"), ParamType::Text);
        assert_eq!(schema.param_type("weight"), ParamType::Numeric);
        assert_eq!(schema.param_type("last_spotted"), ParamType::Json);
        assert_eq!(schema.param_type("colour"), ParamType::Untyped);
    }

    #[test]
    fn test_missing_row_message() {
        let schema = moths_schema();
        assert_eq!(
            schema.missing_row_message("abc"),
            "moth with id abc does not exist"
        );
    }
}
