//! Flat row → `{ qualifier: { column: value } }`
//!
//! Columns of one source table arrive contiguously, so each change of
//! `table_id` while walking left to right starts a new run and takes the next
//! qualifier from the plan. `NO_TABLE` runs go under `""` and do not consume
//! a plan entry.
//!
//! Assignment is by run position, not by `table_id` value: two separate runs
//! of the same table (a self-join) consume two plan entries.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::plan::QualifierPlan;
use crate::cast::TypeCastRegistry;
use crate::client::{ColumnDescriptor, Row, NO_TABLE};
use crate::observability::{log_event, Event};

/// One source row regrouped by qualifier
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedRow(BTreeMap<String, Map<String, Value>>);

impl NormalizedRow {
    /// Columns grouped under `qualifier`
    pub fn get(&self, qualifier: &str) -> Option<&Map<String, Value>> {
        self.0.get(qualifier)
    }

    pub fn qualifiers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Map<String, Value>> {
        self.0
    }

    /// Render as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(q, cols)| (q.clone(), Value::Object(cols.clone())))
                .collect(),
        )
    }

    fn insert(&mut self, qualifier: &str, column: &str, value: Value) {
        self.0
            .entry(qualifier.to_string())
            .or_default()
            .insert(column.to_string(), value);
    }
}

/// Nested rows plus the untouched column metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NestedResult {
    pub rows: Vec<NormalizedRow>,
    pub fields: Vec<ColumnDescriptor>,
}

/// Qualifier for every column position
fn assign_qualifiers(fields: &[ColumnDescriptor], plan: &QualifierPlan) -> Vec<String> {
    let mut assigned = Vec::with_capacity(fields.len());
    let mut table_was: Option<u32> = None;
    let mut cursor = 0usize;
    let mut qualifier = String::new();
    let mut exhausted = false;

    for field in fields {
        if table_was != Some(field.table_id) {
            qualifier = if field.table_id == NO_TABLE {
                String::new()
            } else {
                let next = plan.get(cursor);
                cursor += 1;
                match next {
                    Some(q) => q.to_string(),
                    None => {
                        exhausted = true;
                        String::new()
                    }
                }
            };
            table_was = Some(field.table_id);
        }
        assigned.push(qualifier.clone());
    }

    if exhausted {
        let runs = cursor.to_string();
        let planned = plan.len().to_string();
        log_event(
            Event::QualifierPlanExhausted,
            &[("planned", planned.as_str()), ("runs", runs.as_str())],
        );
    }

    assigned
}

/// Regroup `rows` with the process-wide cast registry
pub fn nest(rows: Vec<Row>, fields: Vec<ColumnDescriptor>, plan: &QualifierPlan) -> NestedResult {
    nest_with(TypeCastRegistry::global(), rows, fields, plan)
}

/// Regroup `rows`, casting each value through `registry`
///
/// Produces exactly one [`NormalizedRow`] per input row. Positions missing
/// from a short row become `null`.
pub fn nest_with(
    registry: &TypeCastRegistry,
    rows: Vec<Row>,
    fields: Vec<ColumnDescriptor>,
    plan: &QualifierPlan,
) -> NestedResult {
    let qualifiers = assign_qualifiers(&fields, plan);

    let rows = rows
        .into_iter()
        .map(|row| {
            let mut nested = NormalizedRow::default();
            for (i, field) in fields.iter().enumerate() {
                let raw = row.value_at(i, &fields).cloned().unwrap_or(Value::Null);
                nested.insert(&qualifiers[i], &field.name, registry.cast(raw, field));
            }
            nested
        })
        .collect();

    NestedResult { rows, fields }
}
