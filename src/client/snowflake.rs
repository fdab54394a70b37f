//! Snowflake driver over the SQL REST API v2
//!
//! Statements are posted to `/api/v2/statements` with a caller-provided
//! bearer token; key-pair auth and token refresh happen outside this crate.
//! Bulk writes are chunked `INSERT INTO ... SELECT ... FROM VALUES` statements
//! so VARIANT columns can go through `PARSE_JSON`.

use super::{ColumnInfo, WarehouseClient};
use crate::config::DEFAULT_INSERT_BATCH_SIZE;
use crate::ddl::TableRef;
use crate::error::{Error, Result};
use crate::mapping::TypeMapper;
use crate::row::{CellValue, RowSet};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the Snowflake driver
#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    /// Account identifier, e.g. `xy12345.eu-central-1`
    pub account: String,
    /// Bearer token (key-pair JWT); produced outside this crate
    pub token: String,
    /// Warehouse to run statements on
    pub warehouse: String,
    /// Role to assume, if any
    pub role: Option<String>,
    /// Statement timeout in seconds
    pub timeout_secs: Option<u32>,
    /// Rows per INSERT statement
    pub insert_batch_size: usize,
    /// Base URL override; testing hook, normally derived from the account
    pub base_url: Option<String>,
}

impl SnowflakeConfig {
    /// Config with defaults for everything optional
    pub fn new(
        account: impl Into<String>,
        token: impl Into<String>,
        warehouse: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            token: token.into(),
            warehouse: warehouse.into(),
            role: None,
            timeout_secs: None,
            insert_batch_size: DEFAULT_INSERT_BATCH_SIZE,
            base_url: None,
        }
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the statement timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set rows per INSERT statement
    #[must_use]
    pub fn with_insert_batch_size(mut self, size: usize) -> Self {
        self.insert_batch_size = size.max(1);
        self
    }

    /// Point the client at a different endpoint
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

/// Warehouse client speaking the Snowflake SQL REST API
pub struct SnowflakeClient {
    http: reqwest::Client,
    base: Url,
    config: SnowflakeConfig,
}

#[derive(Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u32>,
    warehouse: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

#[derive(Deserialize)]
struct StatementResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<Vec<Option<String>>>>,
}

impl SnowflakeClient {
    /// Create a client from config
    pub fn new(config: SnowflakeConfig) -> Result<Self> {
        let base = match &config.base_url {
            Some(url) => Url::parse(url)?,
            None => Url::parse(&format!(
                "https://{}.snowflakecomputing.com/api/v2/",
                config.account
            ))?,
        };

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            config,
        })
    }

    fn statement_url(&self) -> Result<Url> {
        let mut url = self.base.join("statements")?;
        url.query_pairs_mut()
            .append_pair("requestId", &request_id());
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(5);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Snowflake-Authorization-Token-Type",
            HeaderValue::from_static("KEYPAIR_JWT"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.token))
                .map_err(|_| Error::config("bearer token contains invalid header characters"))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        Ok(headers)
    }

    async fn post_statement(&self, statement: &str) -> Result<StatementResponse> {
        let body = StatementRequest {
            statement,
            timeout: self.config.timeout_secs,
            warehouse: &self.config.warehouse,
            role: self.config.role.as_deref(),
        };

        tracing::debug!("Posting statement: {}", statement);

        let response = self
            .http
            .post(self.statement_url()?)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let parsed: StatementResponse = response.json().await?;
        if let Some(message) = &parsed.message {
            tracing::debug!("Statement response: {}", message);
        }
        Ok(parsed)
    }
}

#[async_trait]
impl WarehouseClient for SnowflakeClient {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.post_statement(sql).await?;
        Ok(())
    }

    async fn table_columns(&self, table: &TableRef) -> Result<Vec<ColumnInfo>> {
        // Identifiers were validated by TableRef; schema/table names fold to
        // uppercase the way Snowflake stores unquoted identifiers.
        let sql = format!(
            "SELECT COLUMN_NAME, DATA_TYPE FROM {}.INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' \
             ORDER BY ORDINAL_POSITION",
            table.database,
            table.schema.to_uppercase(),
            table.table.to_uppercase()
        );

        let response = self.post_statement(&sql).await?;
        let rows = response.data.unwrap_or_default();

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = row.into_iter();
            let name = cells.next().flatten().ok_or_else(|| {
                Error::statement("INFORMATION_SCHEMA row without a column name")
            })?;
            let data_type = cells.next().flatten().unwrap_or_default();
            columns.push(ColumnInfo { name, data_type });
        }
        Ok(columns)
    }

    async fn bulk_insert(&self, table: &TableRef, rows: &RowSet) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut written = 0u64;
        for chunk in rows.rows.chunks(self.config.insert_batch_size) {
            let sql = insert_statement(table, rows, chunk);
            self.post_statement(&sql).await?;
            written += chunk.len() as u64;
        }

        tracing::info!(
            "Inserted {} rows into {} over the SQL API",
            written,
            table.qualified()
        );
        Ok(written)
    }
}

/// Build one multi-row INSERT statement.
///
/// The `SELECT ... FROM VALUES` shape is required because `PARSE_JSON` is not
/// allowed directly inside a VALUES clause.
fn insert_statement(table: &TableRef, rows: &RowSet, chunk: &[Vec<CellValue>]) -> String {
    let column_list = rows.column_names().join(", ");

    let select_exprs: Vec<String> = rows
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if TypeMapper::is_semi_structured(&column.sql_type) {
                format!("PARSE_JSON(column{})", i + 1)
            } else {
                format!("column{}", i + 1)
            }
        })
        .collect();

    let values: Vec<String> = chunk
        .iter()
        .map(|row| {
            let literals: Vec<String> = row.iter().map(sql_literal).collect();
            format!("({})", literals.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) SELECT {} FROM VALUES {}",
        table.qualified(),
        column_list,
        select_exprs.join(", "),
        values.join(", ")
    )
}

/// Encode one cell as a SQL literal
fn sql_literal(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => "NULL".to_string(),
        CellValue::Bool(true) => "TRUE".to_string(),
        CellValue::Bool(false) => "FALSE".to_string(),
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => {
            if f.is_finite() {
                f.to_string()
            } else {
                "NULL".to_string()
            }
        }
        CellValue::Text(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''")),
    }
}

fn request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{timestamp:x}")
}
