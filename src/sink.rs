//! The translation layer tying schema, rows and client together
//!
//! `WarehouseSink` owns a target table, a type mapper and a driver. Its
//! operations are the whole surface of the crate: emit DDL, create the table,
//! verify its shape, and bulk-write contract instances, with a convenience
//! that chains the three.

use crate::batch;
use crate::client::WarehouseClient;
use crate::config::SinkConfig;
use crate::contract::Contract;
use crate::ddl::{self, TableRef};
use crate::error::Result;
use crate::mapping::TypeMapper;
use crate::row::{serialize_rows, RowSet};
use arrow::record_batch::RecordBatch;
use tracing::{debug, info};

/// Writes data contracts into one warehouse table
pub struct WarehouseSink<C: WarehouseClient> {
    client: C,
    table: TableRef,
    mapper: TypeMapper,
}

impl<C: WarehouseClient> WarehouseSink<C> {
    /// Sink with the default (Snowflake) type table
    pub fn new(client: C, table: TableRef) -> Self {
        Self {
            client,
            table,
            mapper: TypeMapper::snowflake(),
        }
    }

    /// Sink configured from a [`SinkConfig`]
    pub fn from_config(client: C, config: &SinkConfig) -> Result<Self> {
        Ok(Self {
            client,
            table: config.table_ref()?,
            mapper: config.mapper(),
        })
    }

    /// Replace the type mapper
    #[must_use]
    pub fn with_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// The target table
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// The type mapper in use
    pub fn mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// The underlying driver
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The `CREATE OR REPLACE TABLE` statement for a contract
    pub fn create_table_sql<T: Contract>(&self) -> Result<String> {
        ddl::create_table_sql(&self.table, &T::schema(), &self.mapper)
    }

    /// Create (or replace) the target table from a contract's schema
    pub async fn create_table<T: Contract>(&self) -> Result<()> {
        let sql = self.create_table_sql::<T>()?;
        info!("Creating table {}", self.table.qualified());
        self.client.execute(&sql).await
    }

    /// Check that the live table matches a contract's schema.
    ///
    /// Returns false when the table is missing, the column count differs, a
    /// column name differs, or an expected type is not contained in the
    /// reported type (NUMBER matches NUMBER(38,0)). Driver errors propagate.
    pub async fn verify_table<T: Contract>(&self) -> Result<bool> {
        let actual = self.client.table_columns(&self.table).await?;
        if actual.is_empty() {
            debug!("Table {} not found or has no columns", self.table.qualified());
            return Ok(false);
        }

        let expected = ddl::expected_columns(&T::schema(), &self.mapper);
        if expected.len() != actual.len() {
            return Ok(false);
        }

        for ((expected_name, expected_type), column) in expected.iter().zip(&actual) {
            if *expected_name != column.name.to_uppercase() {
                return Ok(false);
            }
            if !column.data_type.to_uppercase().contains(expected_type) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Ensure the target table exists, then bulk-write.
    ///
    /// With `skip_if_valid`, DDL is issued only when [`Self::verify_table`]
    /// reports a mismatch, so rows already in a matching table survive.
    /// Otherwise the table is created (or replaced) unconditionally before
    /// the write.
    pub async fn write_with_create<T: Contract>(
        &self,
        items: &[T],
        skip_if_valid: bool,
    ) -> Result<u64> {
        if skip_if_valid && self.verify_table::<T>().await? {
            debug!(
                "Table {} already matches the contract, skipping DDL",
                self.table.qualified()
            );
        } else {
            self.create_table::<T>().await?;
        }
        self.write(items).await
    }

    /// Serialize contract instances and hand them to the driver's bulk path.
    ///
    /// Returns the number of rows written; an empty slice writes nothing.
    pub async fn write<T: Contract>(&self, items: &[T]) -> Result<u64> {
        if items.is_empty() {
            return Ok(0);
        }

        let rows = self.rows(items)?;
        debug!(
            "Writing {} rows ({} columns) to {}",
            rows.len(),
            rows.columns.len(),
            self.table.qualified()
        );
        self.client.bulk_insert(&self.table, &rows).await
    }

    /// Serialize contract instances into the tabular write container
    pub fn rows<T: Contract>(&self, items: &[T]) -> Result<RowSet> {
        serialize_rows(&self.mapper, items)
    }

    /// Serialize contract instances into an Arrow `RecordBatch`
    pub fn record_batch<T: Contract>(&self, items: &[T]) -> Result<RecordBatch> {
        let rows = self.rows(items)?;
        batch::to_record_batch(&rows)
    }
}
