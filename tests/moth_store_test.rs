//! Integration tests for the moths store
//!
//! The first group drives the store through an in-memory executor. The
//! database group needs DATABASE_URL and is skipped when it is not set.

use mothhaus::prelude::*;
use std::sync::Arc;
use store_object::testing::RecordingExecutor;

fn body(value: Value) -> IndexMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// In-memory executor
// ============================================================================

#[tokio::test]
async fn test_range_filter_list_statement() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = GenericStore::new(executor.clone(), moths_schema());

    let filter: QueryFilter = serde_json::from_str(
        r#"{"wingspan": {"gt": "4", "lt": "6"}, "weight": {"gte": "3", "lte": "7"}}"#,
    )
    .unwrap();
    store
        .list(QueryBuilder::new().filter(filter))
        .await
        .unwrap();

    let statements = executor.statements();
    assert_eq!(
        statements[0].text,
        "SELECT * FROM moths WHERE wingspan > $1 AND wingspan < $2 AND weight >= $3 AND weight <= $4"
    );
    assert_eq!(
        statements[0].args,
        vec![json!("4"), json!("6"), json!("3"), json!("7")]
    );
}

#[tokio::test]
async fn test_create_binds_missing_fields_as_null() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = GenericStore::new(executor.clone(), moths_schema());

    let moth = body(json!({"weight": 2, "species": "luna"}));
    validate_body(&moth, store.schema()).unwrap();
    store.create(moth).await.unwrap();

    let statements = executor.statements();
    assert_eq!(
        statements[0].text,
        "INSERT INTO moths (species, wingspan, weight, last_spotted) VALUES ($1, $2, $3, $4)"
    );
    assert_eq!(
        statements[0].args,
        vec![json!("luna"), Value::Null, json!(2), Value::Null]
    );
}

#[tokio::test]
async fn test_numeric_looking_species_is_bound_as_text() {
    let executor = Arc::new(RecordingExecutor::new());
    let store = GenericStore::new(executor.clone(), moths_schema());

    store
        .create(body(json!({"species": "007.50", "weight": 1})))
        .await
        .unwrap();
    store
        .list(QueryBuilder::new().filter(QueryFilter::new().eq("species", json!("007.50"))))
        .await
        .unwrap();

    let statements = executor.statements();
    assert_eq!(statements[0].args[0], json!("007.50"));
    assert_eq!(statements[0].types[0], ParamType::Text);
    assert_eq!(statements[1].args, vec![json!("007.50")]);
    assert_eq!(statements[1].types, vec![ParamType::Text]);
}

#[tokio::test]
async fn test_replace_of_missing_moth() {
    let executor = Arc::new(RecordingExecutor::new().row_exists(false));
    let store = GenericStore::new(executor.clone(), moths_schema());
    let id = parse_id("0b6d7a58-4f33-4b7e-9d7c-58e1b3f0c001").unwrap();

    let err = store
        .replace(id, body(json!({"weight": 3})))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(404));
    assert_eq!(executor.statements().len(), 1);
}

// ============================================================================
// PostgreSQL
// ============================================================================

async fn connect() -> Option<MothHaus> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let mothhaus = MothHaus::new(DatabaseConfig::from_url(url))
        .await
        .expect("Failed to connect to database");
    mothhaus
        .auto_migrate(&moths_schema())
        .await
        .expect("Failed to migrate moths table");
    Some(mothhaus)
}

#[tokio::test]
async fn test_postgres_crud_round() {
    let Some(mothhaus) = connect().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let store = mothhaus.store(moths_schema());
    let species = format!("test-{}", Uuid::new_v4());

    store
        .create(body(json!({
            "species": species,
            "wingspan": 5.5,
            "weight": 4,
            "last_spotted": {"lat": 10.5, "lng": -20}
        })))
        .await
        .unwrap();

    let rows = store
        .list(QueryBuilder::new().filter(
            QueryFilter::new()
                .eq("species", json!(species))
                .op("wingspan", "gt", json!("4"))
                .op("wingspan", "lt", json!("6")),
        ))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["last_spotted"]["lat"], json!(10.5));

    let id = parse_id(rows[0]["id"].as_str().unwrap()).unwrap();
    store
        .patch(id, UpdateSet::set("weight", json!(9)))
        .await
        .unwrap();
    let row = store
        .get_by_id(id, QueryBuilder::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row["weight"], json!(9));

    store
        .replace(id, body(json!({"species": species, "weight": 1})))
        .await
        .unwrap();
    assert!(store.get_by_id(id, QueryBuilder::new()).await.unwrap().is_none());

    let rows = store
        .list(QueryBuilder::new().filter(QueryFilter::new().eq("species", json!(species))))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["wingspan"], Value::Null);

    let replaced = parse_id(rows[0]["id"].as_str().unwrap()).unwrap();
    assert!(store.delete(replaced).await.unwrap());
    assert!(!store.delete(replaced).await.unwrap());
}

#[tokio::test]
async fn test_postgres_unknown_column_is_unprocessable() {
    let Some(mothhaus) = connect().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let store = mothhaus.store(moths_schema());

    let err = store
        .list(QueryBuilder::new().filter(QueryFilter::new().eq("colour", json!("grey"))))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(422));
    mothhaus.health_check().await.unwrap();
}

#[tokio::test]
async fn test_postgres_numeric_looking_species_round_trip() {
    let Some(mothhaus) = connect().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let store = mothhaus.store(moths_schema());
    let by_species = || QueryFilter::new().eq("species", json!("007.50"));

    for row in store.list(QueryBuilder::new().filter(by_species())).await.unwrap() {
        let id = parse_id(row["id"].as_str().unwrap()).unwrap();
        store.delete(id).await.unwrap();
    }

    store
        .create(body(json!({"species": "007.50", "weight": 1})))
        .await
        .unwrap();

    let rows = store
        .list(QueryBuilder::new().filter(by_species()))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["species"], json!("007.50"));

    let id = parse_id(rows[0]["id"].as_str().unwrap()).unwrap();
    store
        .patch(id, UpdateSet::set("species", json!("0042")))
        .await
        .unwrap();
    let row = store
        .get_by_id(id, QueryBuilder::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row["species"], json!("0042"));
    assert!(store.delete(id).await.unwrap());
}
