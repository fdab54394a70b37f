//! End-to-end tests against an in-memory DuckDB database
//!
//! Full flow: declared contract → DDL → appender bulk write → verification.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Serialize;
use snowsink::{
    Contract, ContractSchema, DuckdbClient, FieldType, TableRef, TypeMapper, WarehouseClient,
    WarehouseSink,
};
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Order {
    id: i64,
    customer: String,
    paid: bool,
    total: f64,
    placed_at: chrono::DateTime<Utc>,
    ship_date: Option<NaiveDate>,
    items: Vec<String>,
    metadata: BTreeMap<String, String>,
}

impl Contract for Order {
    fn schema() -> ContractSchema {
        ContractSchema::new("order")
            .field("id", FieldType::Integer)
            .field("customer", FieldType::Text)
            .field("paid", FieldType::Boolean)
            .field("total", FieldType::Float)
            .field("placed_at", FieldType::Timestamp)
            .nullable_field("ship_date", FieldType::Date)
            .field("items", FieldType::List)
            .field("metadata", FieldType::Map)
    }
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            customer: "Ada".to_string(),
            paid: true,
            total: 19.99,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            ship_date: Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
            items: vec!["book".to_string(), "pen".to_string()],
            metadata: BTreeMap::from([("channel".to_string(), "web".to_string())]),
        },
        Order {
            id: 2,
            customer: "O'Brien".to_string(),
            paid: false,
            total: 5.0,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap(),
            ship_date: None,
            items: vec![],
            metadata: BTreeMap::new(),
        },
    ]
}

fn duckdb_sink() -> WarehouseSink<DuckdbClient> {
    let client = DuckdbClient::open_in_memory().unwrap();
    let table = TableRef::new("memory", "main", "orders").unwrap();
    WarehouseSink::new(client, table).with_mapper(TypeMapper::duckdb())
}

#[tokio::test]
async fn test_create_write_verify_round_trip() {
    let sink = duckdb_sink();

    sink.create_table::<Order>().await.unwrap();
    assert!(sink.verify_table::<Order>().await.unwrap());

    let written = sink.write(&sample_orders()).await.unwrap();
    assert_eq!(written, 2);

    let count = sink.client().row_count(sink.table()).unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_create_table_replaces_existing() {
    let sink = duckdb_sink();

    sink.create_table::<Order>().await.unwrap();
    sink.write(&sample_orders()).await.unwrap();

    // CREATE OR REPLACE drops the previous contents
    sink.create_table::<Order>().await.unwrap();
    assert_eq!(sink.client().row_count(sink.table()).unwrap(), 0);
}

#[tokio::test]
async fn test_write_with_create_keeps_rows_when_schema_matches() {
    let sink = duckdb_sink();

    sink.create_table::<Order>().await.unwrap();
    sink.write(&sample_orders()).await.unwrap();

    // The table already matches, so no DDL runs and the first batch survives
    sink.write_with_create(&sample_orders(), true).await.unwrap();
    assert_eq!(sink.client().row_count(sink.table()).unwrap(), 4);
}

#[tokio::test]
async fn test_write_with_create_builds_missing_table() {
    let sink = duckdb_sink();

    let written = sink.write_with_create(&sample_orders(), true).await.unwrap();
    assert_eq!(written, 2);
    assert_eq!(sink.client().row_count(sink.table()).unwrap(), 2);
}

#[tokio::test]
async fn test_verify_fails_before_create() {
    let sink = duckdb_sink();
    assert!(!sink.verify_table::<Order>().await.unwrap());
}

#[tokio::test]
async fn test_verify_fails_on_drifted_table() {
    let sink = duckdb_sink();
    sink.client()
        .execute("CREATE TABLE memory.main.orders (ID BIGINT, WRONG VARCHAR)")
        .await
        .unwrap();

    assert!(!sink.verify_table::<Order>().await.unwrap());
}

#[tokio::test]
async fn test_created_columns_match_duckdb_mapping() {
    let sink = duckdb_sink();
    sink.create_table::<Order>().await.unwrap();
    sink.write(&sample_orders()).await.unwrap();

    let columns = sink.client().table_columns(sink.table()).await.unwrap();
    assert_eq!(columns.len(), 8);
    assert_eq!(columns[0].name, "ID");
    assert_eq!(columns[0].data_type, "BIGINT");
    assert_eq!(columns[3].data_type, "DOUBLE");
    assert_eq!(columns[4].data_type, "TIMESTAMP");
    assert_eq!(columns[5].data_type, "DATE");
}

#[tokio::test]
async fn test_write_empty_slice_is_noop() {
    let sink = duckdb_sink();
    sink.create_table::<Order>().await.unwrap();

    let orders: Vec<Order> = vec![];
    assert_eq!(sink.write(&orders).await.unwrap(), 0);
    assert_eq!(sink.client().row_count(sink.table()).unwrap(), 0);
}

#[tokio::test]
async fn test_record_batch_matches_rowset() {
    let sink = duckdb_sink();
    let batch = sink.record_batch(&sample_orders()).unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 8);
    let schema = batch.schema();
    assert_eq!(schema.field(0).name(), "ID");
    assert_eq!(schema.field(5).name(), "SHIP_DATE");
}
