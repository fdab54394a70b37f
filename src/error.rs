//! Error types for snowsink
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for snowsink
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Bad or incomplete configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// YAML config failed to parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Contract / Mapping Errors
    // ============================================================================
    /// The contract schema or a serialized instance is unusable
    #[error("Contract error: {message}")]
    Contract { message: String },

    /// Identifier would need quoting; only `[A-Za-z_][A-Za-z0-9_]*` is allowed
    #[error("Invalid identifier: '{name}'")]
    InvalidIdentifier { name: String },

    // ============================================================================
    // Warehouse Errors
    // ============================================================================
    /// A statement was rejected by the warehouse
    #[error("Statement failed: {message}")]
    Statement { message: String },

    /// Embedded driver error
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP response from the SQL API
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Output Errors
    // ============================================================================
    /// RecordBatch construction failed
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Row or batch conversion failed
    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O and Generic Errors
    // ============================================================================
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Free-form error
    #[error("{0}")]
    Other(String),

    /// Wrapped error from a collaborator
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a contract error
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Create a statement error
    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

/// Result type alias for snowsink
pub type Result<T> = std::result::Result<T, Error>;
