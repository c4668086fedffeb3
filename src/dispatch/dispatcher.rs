//! Statement dispatch
//!
//! Every statement is bound first. Then:
//!
//! 1. Nesting requested → fetch rows as arrays, nest them
//! 2. INSERT → append `RETURNING <pk>`, report generated key + row count
//! 3. UPDATE / DELETE → report row count, drop rows
//! 4. Anything else → raw rows and fields
//!
//! Executor errors are returned exactly as the executor produced them.

use serde_json::Value;
use uuid::Uuid;

use super::outcome::{MutationSummary, QueryOutcome};
use super::statement::{StatementKind, StatementRequest};
use crate::binder::{prepare, BoundStatement};
use crate::cast::TypeCastRegistry;
use crate::client::{RawExecutor, RawResult, RowMode};
use crate::nest::{nest_with, QualifierPlan};
use crate::observability::{log_event, Event, MetricsRegistry};

/// Shapes the results of one executor
pub struct Dispatcher<'a, E: RawExecutor> {
    executor: &'a E,
    registry: &'a TypeCastRegistry,
    metrics: Option<&'a MetricsRegistry>,
}

impl<'a, E: RawExecutor> Dispatcher<'a, E> {
    /// Dispatcher casting through the process-wide registry
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            registry: TypeCastRegistry::global(),
            metrics: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a TypeCastRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_metrics(mut self, metrics: &'a MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Bind, execute and shape one statement
    pub async fn execute(
        &self,
        request: impl Into<StatementRequest>,
        values: Vec<Value>,
    ) -> Result<QueryOutcome, E::Error> {
        let request = request.into();
        let statement_id = Uuid::new_v4().to_string();
        let kind = request.kind();
        let bound = prepare(&request.sql, values);

        let result = match (&request.nest, kind) {
            (Some(plan), _) => self.execute_nested(&bound, plan).await,
            (None, StatementKind::Insert) => {
                self.execute_insert(&bound, request.primary_key.as_deref(), &statement_id)
                    .await
            }
            (None, StatementKind::Update | StatementKind::Delete) => {
                self.execute_mutation(&bound).await
            }
            (None, StatementKind::Select | StatementKind::Other) => {
                self.execute_statement(&bound, RowMode::Keyed)
                    .await
                    .map(QueryOutcome::Rows)
            }
        };

        match &result {
            Ok(outcome) => {
                let shape = match outcome {
                    QueryOutcome::Nested(_) => "nested",
                    QueryOutcome::Mutation(_) => "mutation",
                    QueryOutcome::Rows(_) => "rows",
                };
                log_event(
                    Event::StatementExecuted,
                    &[
                        ("kind", kind.as_str()),
                        ("shape", shape),
                        ("statement_id", statement_id.as_str()),
                    ],
                );
            }
            Err(err) => {
                if let Some(metrics) = self.metrics {
                    metrics.increment_statements_failed();
                }
                let reason = err.to_string();
                log_event(
                    Event::StatementFailed,
                    &[
                        ("kind", kind.as_str()),
                        ("reason", reason.as_str()),
                        ("statement_id", statement_id.as_str()),
                    ],
                );
            }
        }

        result
    }

    async fn execute_statement(
        &self,
        statement: &BoundStatement,
        mode: RowMode,
    ) -> Result<RawResult, E::Error> {
        let raw = self.executor.execute_statement(statement, mode).await?;
        if let Some(metrics) = self.metrics {
            metrics.increment_statements_executed();
        }
        Ok(raw)
    }

    /// Array mode: joined columns may share a name and would collide as keys
    async fn execute_nested(
        &self,
        statement: &BoundStatement,
        plan: &QualifierPlan,
    ) -> Result<QueryOutcome, E::Error> {
        let raw = self.execute_statement(statement, RowMode::Array).await?;
        let nested = nest_with(self.registry, raw.rows, raw.fields, plan);
        if let Some(metrics) = self.metrics {
            metrics.add_nested_rows(nested.rows.len() as u64);
        }
        Ok(QueryOutcome::Nested(nested))
    }

    async fn execute_insert(
        &self,
        statement: &BoundStatement,
        primary_key: Option<&str>,
        statement_id: &str,
    ) -> Result<QueryOutcome, E::Error> {
        let Some(primary_key) = primary_key else {
            let raw = self.execute_statement(statement, RowMode::Keyed).await?;
            self.count_insert();
            return Ok(QueryOutcome::Mutation(MutationSummary::Insert {
                insert_id: None,
                affected_rows: raw.row_count,
            }));
        };

        let returning = statement.with_suffix(&format!(
            " RETURNING {}",
            self.executor.escape_identifier(primary_key)
        ));
        let raw = self.execute_statement(&returning, RowMode::Keyed).await?;
        self.count_insert();

        let insert_id = raw
            .fields
            .iter()
            .find(|field| field.name == primary_key)
            .and_then(|field| {
                raw.rows
                    .first()
                    .and_then(|row| row.value_named(primary_key, &raw.fields))
                    .map(|value| self.registry.cast(value.clone(), field))
            });

        if insert_id.is_none() {
            if let Some(metrics) = self.metrics {
                metrics.increment_missing_generated_keys();
            }
            log_event(
                Event::GeneratedKeyMissing,
                &[
                    ("primary_key", primary_key),
                    ("statement_id", statement_id),
                ],
            );
        }

        Ok(QueryOutcome::Mutation(MutationSummary::Insert {
            insert_id,
            affected_rows: raw.row_count,
        }))
    }

    fn count_insert(&self) {
        if let Some(metrics) = self.metrics {
            metrics.increment_inserts();
        }
    }

    async fn execute_mutation(
        &self,
        statement: &BoundStatement,
    ) -> Result<QueryOutcome, E::Error> {
        let raw = self.execute_statement(statement, RowMode::Keyed).await?;
        if let Some(metrics) = self.metrics {
            metrics.increment_mutations();
        }
        Ok(QueryOutcome::Mutation(MutationSummary::Modify {
            affected_rows: raw.row_count,
        }))
    }
}
