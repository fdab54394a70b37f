//! Sink configuration loaded from YAML
//!
//! Mirrors the programmatic API: target table, dialect, type overrides and
//! the insert batch size used by statement-based drivers.

use crate::contract::FieldType;
use crate::ddl::TableRef;
use crate::error::Result;
use crate::mapping::{Dialect, TypeMapper};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default rows per INSERT statement for statement-based drivers
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 1000;

/// Complete sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Target database (catalog)
    pub database: String,

    /// Target schema
    pub schema: String,

    /// Target table
    pub table: String,

    /// Warehouse dialect for the base type table
    #[serde(default)]
    pub dialect: Dialect,

    /// Column type overrides keyed by declared type
    #[serde(default)]
    pub type_overrides: BTreeMap<FieldType, String>,

    /// Rows per INSERT statement (statement-based drivers only)
    #[serde(default = "default_insert_batch_size")]
    pub insert_batch_size: usize,
}

fn default_insert_batch_size() -> usize {
    DEFAULT_INSERT_BATCH_SIZE
}

impl SinkConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// The validated table reference
    pub fn table_ref(&self) -> Result<TableRef> {
        TableRef::new(&self.database, &self.schema, &self.table)
    }

    /// A mapper for the configured dialect with the configured overrides
    pub fn mapper(&self) -> TypeMapper {
        let mut mapper = TypeMapper::for_dialect(self.dialect);
        mapper.add_overrides(&self.type_overrides);
        mapper
    }
}
