//! Data-contract schema declarations
//!
//! A contract is a `serde::Serialize` type that also declares an ordered
//! field list. The declared list, not the serialized output, drives column
//! ordering and type mapping.

mod types;

pub use types::{ContractSchema, FieldDef, FieldType};

use serde::Serialize;

/// A typed data contract.
///
/// Implementors declare their field list once; instances serialize through
/// serde. The declared order is the column order of the target table.
pub trait Contract: Serialize {
    /// The declared schema for this contract.
    fn schema() -> ContractSchema;
}
