//! Result Shaping Tests
//!
//! End-to-end behavior through the public client API:
//! - INSERT reports the cast generated key and affected rows
//! - UPDATE/DELETE report affected rows only
//! - Joined SELECTs nest by qualifier
//! - Executor failures reach the caller unchanged

use rowshape::cast::wire_type::{INT8, TEXT};
use rowshape::client::{ColumnDescriptor, RawResult, Row, RowMode, ScriptedError, ScriptedPool};
use rowshape::{Client, ClientConfig, MutationSummary, QueryOutcome, StatementRequest};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn client() -> Client<ScriptedPool> {
    Client::new(
        ClientConfig::new()
            .with_host("localhost")
            .with_port(5432)
            .with_database("blog"),
    )
}

fn article_author_fields() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new(1, "id", INT8),
        ColumnDescriptor::new(1, "title", TEXT),
        ColumnDescriptor::new(2, "id", INT8),
        ColumnDescriptor::new(2, "name", TEXT),
    ]
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[tokio::test]
async fn test_insert_on_acquired_connection() {
    let client = client();
    client.pool().executor().push_result(RawResult {
        rows: vec![serde_json::from_value(json!({ "id": "42" })).unwrap()],
        fields: vec![ColumnDescriptor::new(15629, "id", INT8)],
        row_count: 1,
    });

    let conn = client.acquire().await.unwrap();
    let outcome = conn
        .execute(
            StatementRequest::new("INSERT INTO articles (title) VALUES (?)").primary_key("id"),
            vec![json!("New Post")],
        )
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({ "insertId": 42, "affectedRows": 1 })
    );

    let calls = client.pool().executor().calls();
    assert_eq!(
        calls[0].statement.text,
        "INSERT INTO articles (title) VALUES ($1) RETURNING \"id\""
    );
    assert_eq!(client.pool().acquired(), 1);
    assert_eq!(client.metrics().inserts, 1);
}

#[tokio::test]
async fn test_primary_key_with_quote_is_escaped() {
    let client = client();
    client.pool().executor().push_result(RawResult {
        rows: vec![serde_json::from_value(json!({ "odd\"id": "3" })).unwrap()],
        fields: vec![ColumnDescriptor::new(7, "odd\"id", INT8)],
        row_count: 1,
    });

    let outcome = client
        .execute(
            StatementRequest::new("INSERT INTO t (a) VALUES (?)").primary_key("odd\"id"),
            vec![json!(1)],
        )
        .await
        .unwrap();

    assert_eq!(outcome.as_mutation().unwrap().insert_id(), Some(&json!(3)));
    assert!(client.pool().executor().calls()[0]
        .statement
        .text
        .ends_with("RETURNING \"odd\"\"id\""));
}

#[tokio::test]
async fn test_update_discards_rows() {
    let client = client();
    client.pool().executor().push_result(RawResult {
        rows: vec![Row::Positional(vec![json!(1)])],
        fields: vec![ColumnDescriptor::new(1, "id", INT8)],
        row_count: 3,
    });

    let outcome = client
        .execute(
            "update articles set title = ? where author_id = ?",
            vec![json!("x"), json!(7)],
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        QueryOutcome::Mutation(MutationSummary::Modify { affected_rows: 3 })
    );
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({ "affectedRows": 3 })
    );
}

// =============================================================================
// Nesting Tests
// =============================================================================

#[tokio::test]
async fn test_joined_select_is_nested() {
    let client = client();
    client.pool().executor().push_result(RawResult {
        rows: vec![
            Row::Positional(vec![json!("1"), json!("Post"), json!("7"), json!("Alice")]),
            Row::Positional(vec![json!("2"), json!("Draft"), json!("7"), json!("Alice")]),
        ],
        fields: article_author_fields(),
        row_count: 2,
    });

    let request = StatementRequest::new(
        "SELECT articles.id, articles.title, users.id, users.name \
         FROM articles JOIN users ON users.id = articles.author_id WHERE users.id = ?",
    )
    .nest(["articles", "users"]);
    let nested = client
        .execute(request, vec![json!(7)])
        .await
        .unwrap()
        .into_nested()
        .unwrap();

    assert_eq!(nested.rows.len(), 2);
    assert_eq!(
        serde_json::to_value(&nested.rows).unwrap(),
        json!([
            { "articles": { "id": 1, "title": "Post" }, "users": { "id": 7, "name": "Alice" } },
            { "articles": { "id": 2, "title": "Draft" }, "users": { "id": 7, "name": "Alice" } }
        ])
    );
    assert_eq!(nested.fields, article_author_fields());
    assert_eq!(client.pool().executor().calls()[0].mode, RowMode::Array);
    assert_eq!(client.metrics().nested_rows, 2);
}

#[tokio::test]
async fn test_plain_select_is_raw() {
    let client = client();
    let raw = RawResult {
        rows: vec![serde_json::from_value(json!({ "count": "12" })).unwrap()],
        fields: vec![ColumnDescriptor::new(0, "count", INT8)],
        row_count: 1,
    };
    client.pool().executor().push_result(raw.clone());

    let outcome = client
        .execute("SELECT count(*) FROM articles", Vec::new())
        .await
        .unwrap();

    // Raw results are not cast
    assert_eq!(outcome.into_rows().unwrap(), raw);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_protocol_failure_is_not_wrapped() {
    let client = client();
    client
        .pool()
        .executor()
        .push_error(ScriptedError::new("duplicate key value violates unique constraint"));

    let err = client
        .execute(
            StatementRequest::new("INSERT INTO users (email) VALUES (?)").primary_key("id"),
            vec![json!("a@example.com")],
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScriptedError::new("duplicate key value violates unique constraint")
    );
    assert_eq!(client.metrics().statements_failed, 1);
    assert_eq!(client.metrics().statements_executed, 0);
}

#[tokio::test]
async fn test_escape_identifier_on_client() {
    let client = client();
    assert_eq!(client.escape_identifier("a\"b"), "\"a\"\"b\"");
}
