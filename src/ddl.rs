//! Table references and DDL generation
//!
//! Column names are uppercased in DDL; database, schema and table names are
//! used as given. Identifiers are validated before they reach a statement.

use crate::contract::ContractSchema;
use crate::error::{Error, Result};
use crate::mapping::TypeMapper;
use serde::{Deserialize, Serialize};

/// Fully qualified table target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Database (catalog) name
    pub database: String,
    /// Schema name
    pub schema: String,
    /// Table name
    pub table: String,
}

impl TableRef {
    /// Create a table reference, validating each part
    pub fn new(database: &str, schema: &str, table: &str) -> Result<Self> {
        for part in [database, schema, table] {
            validate_identifier(part)?;
        }
        Ok(Self {
            database: database.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }

    /// `DATABASE.SCHEMA.TABLE`, parts as given
    pub fn qualified(&self) -> String {
        format!("{}.{}.{}", self.database, self.schema, self.table)
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// Validate an identifier: letters, digits and underscores, not starting
/// with a digit. Anything else would need quoting and is rejected outright.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_identifier(name))
    }
}

/// Build the `CREATE OR REPLACE TABLE` statement for a contract schema.
///
/// Columns appear in declared order with uppercased names.
pub fn create_table_sql(
    table: &TableRef,
    schema: &ContractSchema,
    mapper: &TypeMapper,
) -> Result<String> {
    if schema.is_empty() {
        return Err(Error::contract(format!(
            "contract '{}' declares no fields",
            schema.name
        )));
    }

    let mut columns = Vec::with_capacity(schema.len());
    for field in &schema.fields {
        validate_identifier(&field.name)?;
        let column_type = mapper.column_type(field.field_type);
        columns.push(format!("{} {}", field.name.to_uppercase(), column_type));
    }

    Ok(format!(
        "CREATE OR REPLACE TABLE {} ({})",
        table.qualified(),
        columns.join(", ")
    ))
}

/// Expected `(UPPER_NAME, UPPER_TYPE)` pairs in declared order, for schema
/// verification against `INFORMATION_SCHEMA.COLUMNS`.
pub fn expected_columns(schema: &ContractSchema, mapper: &TypeMapper) -> Vec<(String, String)> {
    schema
        .fields
        .iter()
        .map(|field| {
            (
                field.name.to_uppercase(),
                mapper.column_type(field.field_type).to_uppercase(),
            )
        })
        .collect()
}
