//! # snowsink
//!
//! Serialize typed data contracts into cloud warehouse tables.
//!
//! A data contract is any `serde::Serialize` type that also declares an
//! ordered field list via the [`Contract`] trait. snowsink walks that field
//! list, maps each declared type to a warehouse column type, emits a
//! `CREATE OR REPLACE TABLE` statement and hands the serialized rows to the
//! driver's bulk-insert facility. Connection lifecycle, authentication and
//! bulk transport belong to the driver, not to this crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snowsink::{Contract, ContractSchema, DuckdbClient, FieldType, Result};
//! use snowsink::{TableRef, TypeMapper, WarehouseSink};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Event {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Contract for Event {
//!     fn schema() -> ContractSchema {
//!         ContractSchema::new("event")
//!             .field("id", FieldType::Integer)
//!             .field("name", FieldType::Text)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = DuckdbClient::open_in_memory()?;
//!     let table = TableRef::new("memory", "main", "events")?;
//!     let sink = WarehouseSink::new(client, table).with_mapper(TypeMapper::duckdb());
//!
//!     sink.create_table::<Event>().await?;
//!     sink.write(&[Event { id: 1, name: "signup".into() }]).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Contract (declared fields) ──► TypeMapper ──► DDL builder ──► execute()
//!          │
//!          └─► Row serializer ──► RowSet ──► bulk_insert()  (driver's loader)
//!                                   └─► Arrow RecordBatch (interchange)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Data-contract schema declarations
pub mod contract;

/// Declared type to warehouse column type mapping
pub mod mapping;

/// Table references and DDL generation
pub mod ddl;

/// Row serialization into the tabular write container
pub mod row;

/// Arrow RecordBatch interchange
pub mod batch;

/// Sink configuration loaded from YAML
pub mod config;

/// Warehouse client seam and drivers
pub mod client;

/// The translation layer tying schema, rows and client together
pub mod sink;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{ColumnInfo, DuckdbClient, SnowflakeClient, SnowflakeConfig, WarehouseClient};
pub use config::SinkConfig;
pub use contract::{Contract, ContractSchema, FieldDef, FieldType};
pub use ddl::TableRef;
pub use error::{Error, Result};
pub use mapping::{Dialect, TypeMapper};
pub use row::{CellValue, ColumnDef, RowSet};
pub use sink::WarehouseSink;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
