//! Warehouse client seam and drivers
//!
//! The sink talks to warehouses through [`WarehouseClient`]. Two drivers
//! ship with the crate: an embedded DuckDB driver whose bulk path is the
//! duckdb `Appender`, and a Snowflake driver speaking the SQL REST API v2.
//! Connection lifecycle and authentication stay with the driver.

mod duckdb;
mod snowflake;

pub use duckdb::DuckdbClient;
pub use snowflake::{SnowflakeClient, SnowflakeConfig};

use crate::ddl::TableRef;
use crate::error::Result;
use crate::row::RowSet;
use async_trait::async_trait;

/// One column as reported by the warehouse's `INFORMATION_SCHEMA`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name as stored by the warehouse
    pub name: String,
    /// Declared column type, e.g. `NUMBER(38,0)`
    pub data_type: String,
}

/// Minimal surface the sink needs from a warehouse driver
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Run a single DDL/DML statement
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Columns of a table in ordinal order; empty when the table is missing
    async fn table_columns(&self, table: &TableRef) -> Result<Vec<ColumnInfo>>;

    /// Hand a row set to the driver's bulk-insert facility.
    ///
    /// Returns the number of rows written.
    async fn bulk_insert(&self, table: &TableRef, rows: &RowSet) -> Result<u64>;
}
