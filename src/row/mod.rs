//! Row serialization into the tabular write container
//!
//! Each contract instance serializes through serde to JSON; the declared
//! field list then drives a single pass that flattens every instance into
//! warehouse-compatible scalars. Lists, maps and nested contracts become
//! compact JSON text, which is what warehouse semi-structured columns take.

mod types;

pub use types::{CellValue, ColumnDef, RowSet};

use crate::contract::Contract;
use crate::error::{Error, Result};
use crate::mapping::TypeMapper;
use serde_json::Value;

/// Serialize contract instances into a [`RowSet`].
///
/// Columns follow the declared order with uppercased names; every row carries
/// every declared column. Fields absent from the serialized output become
/// NULL.
pub fn serialize_rows<T: Contract>(mapper: &TypeMapper, items: &[T]) -> Result<RowSet> {
    let schema = T::schema();

    let columns: Vec<ColumnDef> = schema
        .fields
        .iter()
        .map(|field| ColumnDef {
            name: field.name.to_uppercase(),
            field_type: field.field_type,
            sql_type: mapper.column_type(field.field_type),
        })
        .collect();

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let value = serde_json::to_value(item)?;
        let Value::Object(object) = value else {
            return Err(Error::contract(format!(
                "contract '{}' did not serialize to an object",
                schema.name
            )));
        };

        let mut row = Vec::with_capacity(schema.len());
        for field in &schema.fields {
            let cell = match object.get(&field.name) {
                None => CellValue::Null,
                Some(value) => convert_value(value)?,
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(RowSet { columns, rows })
}

/// Convert one serialized field value to a warehouse-compatible scalar.
///
/// Arrays and objects are re-encoded as compact JSON text.
fn convert_value(value: &Value) -> Result<CellValue> {
    match value {
        Value::Null => Ok(CellValue::Null),
        Value::Bool(b) => Ok(CellValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(CellValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(CellValue::Float(f))
            } else {
                // u64 beyond i64 range keeps full precision as text
                Ok(CellValue::Text(n.to_string()))
            }
        }
        Value::String(s) => Ok(CellValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Ok(CellValue::Text(serde_json::to_string(value)?)),
    }
}
