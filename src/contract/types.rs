//! Contract schema types

use serde::{Deserialize, Serialize};

/// Declared type of a contract field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// True/false
    Boolean,
    /// Whole number
    Integer,
    /// Floating-point number
    Float,
    /// Character data
    Text,
    /// Date and time of day
    Timestamp,
    /// Calendar date
    Date,
    /// Ordered collection; stored as semi-structured JSON
    List,
    /// Key/value collection; stored as semi-structured JSON
    Map,
    /// Embedded contract; stored as semi-structured JSON
    Nested,
}

impl FieldType {
    /// Whether values of this type are serialized to JSON text rather than a
    /// warehouse scalar.
    pub fn is_semi_structured(&self) -> bool {
        matches!(self, FieldType::List | FieldType::Map | FieldType::Nested)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::Text => write!(f, "text"),
            FieldType::Timestamp => write!(f, "timestamp"),
            FieldType::Date => write!(f, "date"),
            FieldType::List => write!(f, "list"),
            FieldType::Map => write!(f, "map"),
            FieldType::Nested => write!(f, "nested"),
        }
    }
}

/// A single declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as declared on the contract
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field may be null
    #[serde(default)]
    pub nullable: bool,
}

impl FieldDef {
    /// Create a non-nullable field
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            nullable: false,
        }
    }

    /// Create a nullable field
    pub fn nullable(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            nullable: true,
        }
    }
}

/// Ordered field list for one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSchema {
    /// Contract name (informational; not part of the DDL)
    pub name: String,

    /// Fields in declared order
    pub fields: Vec<FieldDef>,
}

impl ContractSchema {
    /// Create an empty schema
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Append a non-nullable field
    #[must_use]
    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldDef::new(name, field_type));
        self
    }

    /// Append a nullable field
    #[must_use]
    pub fn nullable_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldDef::nullable(name, field_type));
        self
    }

    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declared order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
