//! Row container types

use crate::contract::FieldType;

/// One warehouse-compatible scalar
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Double-precision float
    Float(f64),
    /// Character data, including JSON text for semi-structured columns
    Text(String),
}

impl CellValue {
    /// Whether this cell is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Boolean value, if this cell holds one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value, if this cell holds one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float value; integers coerce
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text value, if this cell holds one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render any non-null cell as a string
    pub fn render(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

/// One output column: uppercased name plus declared and mapped types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Uppercased column name
    pub name: String,
    /// Declared contract type
    pub field_type: FieldType,
    /// Mapped warehouse column type
    pub sql_type: String,
}

/// The tabular in-memory structure handed to a driver's bulk loader
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    /// Columns in declared order
    pub columns: Vec<ColumnDef>,
    /// Row-major cell data; every row has one cell per column
    pub rows: Vec<Vec<CellValue>>,
}

impl RowSet {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Uppercased column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
