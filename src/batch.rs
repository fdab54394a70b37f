//! Arrow RecordBatch interchange
//!
//! Converts a [`RowSet`] into an Arrow `RecordBatch`, the columnar container
//! used by bulk-loading tooling. Array types follow the declared field types;
//! semi-structured columns stay as JSON text.

use crate::contract::FieldType;
use crate::error::{Error, Result};
use crate::row::{CellValue, RowSet};
use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::sync::Arc;

/// Build a `RecordBatch` from a row set.
///
/// All columns are nullable. Timestamp and date columns parse their textual
/// values; a cell that does not parse is an error rather than a silent NULL.
pub fn to_record_batch(rows: &RowSet) -> Result<RecordBatch> {
    let fields: Vec<Field> = rows
        .columns
        .iter()
        .map(|column| Field::new(&column.name, arrow_type(column.field_type), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    for (row_index, row) in rows.rows.iter().enumerate() {
        if row.len() != rows.columns.len() {
            return Err(Error::output(format!(
                "row {row_index} has {} cells, expected {}",
                row.len(),
                rows.columns.len()
            )));
        }
    }

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(rows.columns.len());
    for (index, column) in rows.columns.iter().enumerate() {
        let cells: Vec<&CellValue> = rows.rows.iter().map(|row| &row[index]).collect();
        arrays.push(build_array(&column.name, column.field_type, &cells)?);
    }

    RecordBatch::try_new(schema, arrays).map_err(Error::Arrow)
}

/// Arrow data type for a declared field type
fn arrow_type(field_type: FieldType) -> DataType {
    match field_type {
        FieldType::Boolean => DataType::Boolean,
        FieldType::Integer => DataType::Int64,
        FieldType::Float => DataType::Float64,
        FieldType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        FieldType::Date => DataType::Date32,
        FieldType::Text | FieldType::List | FieldType::Map | FieldType::Nested => DataType::Utf8,
    }
}

/// Build one typed column array
fn build_array(name: &str, field_type: FieldType, cells: &[&CellValue]) -> Result<ArrayRef> {
    match field_type {
        FieldType::Boolean => {
            let arr: BooleanArray = cells.iter().map(|c| c.as_bool()).collect();
            Ok(Arc::new(arr))
        }
        FieldType::Integer => {
            let arr: Int64Array = cells.iter().map(|c| c.as_i64()).collect();
            Ok(Arc::new(arr))
        }
        FieldType::Float => {
            let arr: Float64Array = cells.iter().map(|c| c.as_f64()).collect();
            Ok(Arc::new(arr))
        }
        FieldType::Timestamp => {
            let mut values: Vec<Option<i64>> = Vec::with_capacity(cells.len());
            for cell in cells {
                values.push(match cell {
                    CellValue::Null => None,
                    other => Some(parse_timestamp_micros(name, other)?),
                });
            }
            Ok(Arc::new(TimestampMicrosecondArray::from(values)))
        }
        FieldType::Date => {
            let mut values: Vec<Option<i32>> = Vec::with_capacity(cells.len());
            for cell in cells {
                values.push(match cell {
                    CellValue::Null => None,
                    other => Some(parse_date_days(name, other)?),
                });
            }
            Ok(Arc::new(Date32Array::from(values)))
        }
        FieldType::Text | FieldType::List | FieldType::Map | FieldType::Nested => {
            let arr: StringArray = cells.iter().map(|c| c.render()).collect();
            Ok(Arc::new(arr))
        }
    }
}

/// Parse a timestamp cell to microseconds since the epoch.
///
/// Accepts RFC 3339 text or naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` text, which
/// are how chrono types come through serde.
pub(crate) fn parse_timestamp_micros(column: &str, cell: &CellValue) -> Result<i64> {
    let text = cell.as_text().ok_or_else(|| {
        Error::output(format!("column '{column}': timestamp cell is not text"))
    })?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp_micros());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().timestamp_micros());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc().timestamp_micros());
    }

    Err(Error::output(format!(
        "column '{column}': unparseable timestamp '{text}'"
    )))
}

/// Parse a date cell to days since 1970-01-01
pub(crate) fn parse_date_days(column: &str, cell: &CellValue) -> Result<i32> {
    let text = cell
        .as_text()
        .ok_or_else(|| Error::output(format!("column '{column}': date cell is not text")))?;

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        Error::output(format!("column '{column}': unparseable date '{text}'"))
    })?;

    // 719163 days from 1 CE to the Unix epoch
    Ok(date.num_days_from_ce() - 719_163)
}
