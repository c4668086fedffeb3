//! Connection wrapper
//!
//! Holds one acquired raw connection and exposes the normalized
//! `execute`/`escape_identifier` contract on top of it.

use std::sync::Arc;

use serde_json::Value;

use super::executor::RawExecutor;
use crate::dispatch::{Dispatcher, QueryOutcome, StatementRequest};
use crate::observability::MetricsRegistry;

/// One checked-out connection with result shaping
pub struct Connection<E: RawExecutor> {
    inner: E,
    metrics: Arc<MetricsRegistry>,
}

impl<E: RawExecutor> Connection<E> {
    /// Wrap `inner` with its own counters
    pub fn new(inner: E) -> Self {
        Self::with_metrics(inner, Arc::new(MetricsRegistry::new()))
    }

    pub(crate) fn with_metrics(inner: E, metrics: Arc<MetricsRegistry>) -> Self {
        Self { inner, metrics }
    }

    /// Bind, execute and shape one statement on this connection
    pub async fn execute(
        &self,
        request: impl Into<StatementRequest>,
        values: Vec<Value>,
    ) -> Result<QueryOutcome, E::Error> {
        Dispatcher::new(&self.inner)
            .with_metrics(&self.metrics)
            .execute(request, values)
            .await
    }

    pub fn escape_identifier(&self, name: &str) -> String {
        self.inner.escape_identifier(name)
    }

    pub fn get_ref(&self) -> &E {
        &self.inner
    }

    /// Give the raw connection back, e.g. to release it to its pool
    pub fn into_inner(self) -> E {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::wire_type::INT8;
    use crate::client::{ColumnDescriptor, RawResult, ScriptedExecutor};
    use crate::dispatch::MutationSummary;
    use serde_json::json;

    #[tokio::test]
    async fn test_connection_executes_through_dispatcher() {
        let executor = ScriptedExecutor::new();
        executor.push_result(RawResult {
            rows: vec![serde_json::from_value(json!({ "id": "9" })).unwrap()],
            fields: vec![ColumnDescriptor::new(3, "id", INT8)],
            row_count: 1,
        });
        let conn = Connection::new(executor);

        let outcome = conn
            .execute(
                StatementRequest::new("INSERT INTO users (name) VALUES (?)").primary_key("id"),
                vec![json!("Alice")],
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.as_mutation(),
            Some(&MutationSummary::Insert {
                insert_id: Some(json!(9)),
                affected_rows: 1,
            })
        );
        assert_eq!(conn.get_ref().calls().len(), 1);
    }

    #[test]
    fn test_escape_identifier_passthrough() {
        let conn = Connection::new(ScriptedExecutor::new());
        assert_eq!(conn.escape_identifier("a\"b"), "\"a\"\"b\"");
    }
}
