//! Snowflake SQL REST API tests against a mock HTTP server

use serde::Serialize;
use serde_json::json;
use snowsink::{
    Contract, ContractSchema, FieldType, SnowflakeClient, SnowflakeConfig, TableRef,
    WarehouseClient, WarehouseSink,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Serialize)]
struct Metric {
    name: String,
    value: f64,
    labels: Vec<String>,
}

impl Contract for Metric {
    fn schema() -> ContractSchema {
        ContractSchema::new("metric")
            .field("name", FieldType::Text)
            .field("value", FieldType::Float)
            .field("labels", FieldType::List)
    }
}

fn client_for(server: &MockServer, batch_size: usize) -> SnowflakeClient {
    SnowflakeClient::new(
        SnowflakeConfig::new("xy12345", "test-token", "COMPUTE_WH")
            .with_role("LOADER")
            .with_insert_batch_size(batch_size)
            .with_base_url(server.uri()),
    )
    .unwrap()
}

fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Statement executed successfully."
    }))
}

#[tokio::test]
async fn test_execute_posts_statement_with_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header(
            "X-Snowflake-Authorization-Token-Type",
            "KEYPAIR_JWT",
        ))
        .and(body_partial_json(json!({
            "statement": "SELECT 1",
            "warehouse": "COMPUTE_WH",
            "role": "LOADER"
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, 100).execute("SELECT 1").await.unwrap();
}

#[tokio::test]
async fn test_table_columns_parses_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .and(body_partial_json(json!({
            "statement": "SELECT COLUMN_NAME, DATA_TYPE FROM db.INFORMATION_SCHEMA.COLUMNS \
                          WHERE TABLE_SCHEMA = 'RAW' AND TABLE_NAME = 'METRICS' \
                          ORDER BY ORDINAL_POSITION"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Statement executed successfully.",
            "data": [
                ["NAME", "VARCHAR(16777216)"],
                ["VALUE", "FLOAT"],
                ["LABELS", "VARIANT"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let table = TableRef::new("db", "raw", "metrics").unwrap();
    let columns = client_for(&server, 100)
        .table_columns(&table)
        .await
        .unwrap();

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].name, "NAME");
    assert_eq!(columns[2].data_type, "VARIANT");
}

#[tokio::test]
async fn test_missing_table_yields_no_columns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .respond_with(ok_response())
        .mount(&server)
        .await;

    let table = TableRef::new("db", "raw", "absent").unwrap();
    let columns = client_for(&server, 100)
        .table_columns(&table)
        .await
        .unwrap();
    assert!(columns.is_empty());
}

#[tokio::test]
async fn test_bulk_insert_chunks_by_batch_size() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .respond_with(ok_response())
        .expect(3)
        .mount(&server)
        .await;

    let table = TableRef::new("db", "raw", "metrics").unwrap();
    let sink = WarehouseSink::new(client_for(&server, 1), table);

    let metrics: Vec<Metric> = (0..3)
        .map(|i| Metric {
            name: format!("m{i}"),
            value: f64::from(i),
            labels: vec!["host".to_string()],
        })
        .collect();

    assert_eq!(sink.write(&metrics).await.unwrap(), 3);
}

#[tokio::test]
async fn test_insert_statement_uses_parse_json_for_variant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .and(body_partial_json(json!({
            "statement": "INSERT INTO db.raw.metrics (NAME, VALUE, LABELS) \
                          SELECT column1, column2, PARSE_JSON(column3) FROM VALUES \
                          ('cpu', 0.75, '[\"host\"]')"
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let table = TableRef::new("db", "raw", "metrics").unwrap();
    let sink = WarehouseSink::new(client_for(&server, 100), table);

    let metrics = vec![Metric {
        name: "cpu".to_string(),
        value: 0.75,
        labels: vec!["host".to_string()],
    }];
    sink.write(&metrics).await.unwrap();
}

#[tokio::test]
async fn test_http_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statements"))
        .respond_with(ResponseTemplate::new(422).set_body_string("compilation error"))
        .mount(&server)
        .await;

    let err = client_for(&server, 100)
        .execute("SELECT broken")
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("422"));
    assert!(message.contains("compilation error"));
}
