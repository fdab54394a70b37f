//! Embedded DuckDB driver
//!
//! Bulk writes go through the duckdb `Appender`, the driver's native
//! high-throughput load path. Timestamp and date cells are converted to the
//! driver's temporal values before appending; everything else maps directly.

use super::{ColumnInfo, WarehouseClient};
use crate::batch::{parse_date_days, parse_timestamp_micros};
use crate::contract::FieldType;
use crate::ddl::TableRef;
use crate::error::{Error, Result};
use crate::row::{CellValue, ColumnDef, RowSet};
use async_trait::async_trait;
use duckdb::types::TimeUnit;
use duckdb::{appender_params_from_iter, params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Warehouse client backed by an embedded DuckDB connection
pub struct DuckdbClient {
    conn: Mutex<Connection>,
}

impl DuckdbClient {
    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::statement("connection lock poisoned"))
    }

    /// Row count of a table; smoke-check helper, not a read path
    pub fn row_count(&self, table: &TableRef) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.qualified()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

#[async_trait]
impl WarehouseClient for DuckdbClient {
    async fn execute(&self, sql: &str) -> Result<()> {
        debug!("Executing statement: {}", sql);
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    async fn table_columns(&self, table: &TableRef) -> Result<Vec<ColumnInfo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT column_name, data_type \
             FROM information_schema.columns \
             WHERE lower(table_catalog) = lower(?) \
               AND lower(table_schema) = lower(?) \
               AND lower(table_name) = lower(?) \
             ORDER BY ordinal_position",
        )?;

        let columns = stmt
            .query_map(params![table.database, table.schema, table.table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        Ok(columns)
    }

    async fn bulk_insert(&self, table: &TableRef, rows: &RowSet) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        debug!(
            "Appending {} rows into {} via the duckdb appender",
            rows.len(),
            table.qualified()
        );

        let conn = self.lock()?;
        let mut appender = conn.appender_to_db(&table.table, &table.schema)?;
        for row in &rows.rows {
            let values = row
                .iter()
                .zip(&rows.columns)
                .map(|(cell, column)| to_duckdb_value(cell, column))
                .collect::<Result<Vec<_>>>()?;
            appender.append_row(appender_params_from_iter(values))?;
        }
        appender.flush()?;

        Ok(rows.len() as u64)
    }
}

/// Convert one cell to the driver's value type
fn to_duckdb_value(cell: &CellValue, column: &ColumnDef) -> Result<duckdb::types::Value> {
    if cell.is_null() {
        return Ok(duckdb::types::Value::Null);
    }

    match column.field_type {
        FieldType::Timestamp => {
            let micros = parse_timestamp_micros(&column.name, cell)?;
            Ok(duckdb::types::Value::Timestamp(TimeUnit::Microsecond, micros))
        }
        FieldType::Date => {
            let days = parse_date_days(&column.name, cell)?;
            Ok(duckdb::types::Value::Date32(days))
        }
        _ => Ok(match cell {
            CellValue::Null => duckdb::types::Value::Null,
            CellValue::Bool(b) => duckdb::types::Value::Boolean(*b),
            CellValue::Int(i) => duckdb::types::Value::BigInt(*i),
            CellValue::Float(f) => duckdb::types::Value::Double(*f),
            CellValue::Text(s) => duckdb::types::Value::Text(s.clone()),
        }),
    }
}
