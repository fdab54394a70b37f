//! Declared type to warehouse column type mapping
//!
//! One static table per dialect, with caller-supplied overrides consulted
//! first. The Snowflake table is the default; the DuckDB table matches the
//! embedded driver.

use crate::contract::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Warehouse dialect selecting the base type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Snowflake type names (NUMBER, VARIANT, TIMESTAMP_NTZ, ...)
    #[default]
    Snowflake,
    /// DuckDB type names for the embedded driver
    Duckdb,
}

/// Maps declared field types to warehouse column type names
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    dialect: Dialect,
    overrides: HashMap<FieldType, String>,
}

impl TypeMapper {
    /// Mapper with the Snowflake base table
    pub fn snowflake() -> Self {
        Self {
            dialect: Dialect::Snowflake,
            overrides: HashMap::new(),
        }
    }

    /// Mapper with the DuckDB base table
    pub fn duckdb() -> Self {
        Self {
            dialect: Dialect::Duckdb,
            overrides: HashMap::new(),
        }
    }

    /// Mapper for an explicit dialect
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            overrides: HashMap::new(),
        }
    }

    /// Override the column type for one declared type
    #[must_use]
    pub fn with_override(mut self, field_type: FieldType, column_type: impl Into<String>) -> Self {
        self.overrides.insert(field_type, column_type.into());
        self
    }

    /// Add overrides from a config map
    pub fn add_overrides<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a FieldType, &'a String)>,
    {
        for (field_type, column_type) in overrides {
            self.overrides.insert(*field_type, column_type.clone());
        }
    }

    /// The dialect of the base table
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Resolve the column type name for a declared type.
    ///
    /// Overrides take precedence over the static table.
    pub fn column_type(&self, field_type: FieldType) -> String {
        if let Some(custom) = self.overrides.get(&field_type) {
            return custom.clone();
        }

        let name = match self.dialect {
            Dialect::Snowflake => snowflake_type(field_type),
            Dialect::Duckdb => duckdb_type(field_type),
        };
        name.to_string()
    }

    /// Whether a resolved column type takes JSON through a semi-structured
    /// path rather than a plain string literal.
    pub fn is_semi_structured(column_type: &str) -> bool {
        matches!(
            column_type.to_uppercase().as_str(),
            "VARIANT" | "OBJECT" | "ARRAY"
        )
    }
}

/// Snowflake base table
fn snowflake_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "BOOLEAN",
        FieldType::Integer => "NUMBER",
        FieldType::Float => "FLOAT",
        FieldType::Text => "VARCHAR",
        FieldType::Timestamp => "TIMESTAMP_NTZ",
        FieldType::Date => "DATE",
        FieldType::List | FieldType::Map | FieldType::Nested => "VARIANT",
    }
}

/// DuckDB base table. No VARIANT equivalent; JSON stays textual.
fn duckdb_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "BOOLEAN",
        FieldType::Integer => "BIGINT",
        FieldType::Float => "DOUBLE",
        FieldType::Text => "VARCHAR",
        FieldType::Timestamp => "TIMESTAMP",
        FieldType::Date => "DATE",
        FieldType::List | FieldType::Map | FieldType::Nested => "VARCHAR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FieldType::Boolean, "BOOLEAN")]
    #[test_case(FieldType::Integer, "NUMBER")]
    #[test_case(FieldType::Float, "FLOAT")]
    #[test_case(FieldType::Text, "VARCHAR")]
    #[test_case(FieldType::Timestamp, "TIMESTAMP_NTZ")]
    #[test_case(FieldType::Date, "DATE")]
    #[test_case(FieldType::List, "VARIANT")]
    #[test_case(FieldType::Map, "VARIANT")]
    #[test_case(FieldType::Nested, "VARIANT")]
    fn test_snowflake_table(field_type: FieldType, expected: &str) {
        assert_eq!(TypeMapper::snowflake().column_type(field_type), expected);
    }

    #[test_case(FieldType::Integer, "BIGINT")]
    #[test_case(FieldType::Float, "DOUBLE")]
    #[test_case(FieldType::Timestamp, "TIMESTAMP")]
    #[test_case(FieldType::Map, "VARCHAR")]
    fn test_duckdb_table(field_type: FieldType, expected: &str) {
        assert_eq!(TypeMapper::duckdb().column_type(field_type), expected);
    }

    #[test]
    fn test_override_wins_over_base_table() {
        let mapper = TypeMapper::snowflake()
            .with_override(FieldType::Integer, "NUMBER(38,0)")
            .with_override(FieldType::Text, "STRING");

        assert_eq!(mapper.column_type(FieldType::Integer), "NUMBER(38,0)");
        assert_eq!(mapper.column_type(FieldType::Text), "STRING");
        // Untouched types still come from the base table
        assert_eq!(mapper.column_type(FieldType::Float), "FLOAT");
    }

    #[test]
    fn test_add_overrides_from_map() {
        let mut mapper = TypeMapper::snowflake();
        let overrides = std::collections::BTreeMap::from([
            (FieldType::Timestamp, "TIMESTAMP_TZ".to_string()),
        ]);
        mapper.add_overrides(&overrides);

        assert_eq!(mapper.column_type(FieldType::Timestamp), "TIMESTAMP_TZ");
    }

    #[test]
    fn test_semi_structured_column_types() {
        assert!(TypeMapper::is_semi_structured("VARIANT"));
        assert!(TypeMapper::is_semi_structured("variant"));
        assert!(TypeMapper::is_semi_structured("OBJECT"));
        assert!(!TypeMapper::is_semi_structured("VARCHAR"));
        assert!(!TypeMapper::is_semi_structured("NUMBER(38,0)"));
    }

    #[test]
    fn test_default_dialect_is_snowflake() {
        assert_eq!(TypeMapper::default().dialect(), Dialect::Snowflake);
    }
}
