//! Shaped results handed back to the mapping layer

use serde::Serialize;
use serde_json::Value;

use crate::client::RawResult;
use crate::nest::NestedResult;

/// Summary of a write statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MutationSummary {
    /// INSERT; `insert_id` is absent when RETURNING yielded no key
    Insert {
        #[serde(rename = "insertId", skip_serializing_if = "Option::is_none")]
        insert_id: Option<Value>,
        #[serde(rename = "affectedRows")]
        affected_rows: u64,
    },
    /// UPDATE or DELETE
    Modify {
        #[serde(rename = "affectedRows")]
        affected_rows: u64,
    },
}

impl MutationSummary {
    pub fn affected_rows(&self) -> u64 {
        match self {
            MutationSummary::Insert { affected_rows, .. }
            | MutationSummary::Modify { affected_rows } => *affected_rows,
        }
    }

    /// Generated key of an INSERT
    pub fn insert_id(&self) -> Option<&Value> {
        match self {
            MutationSummary::Insert { insert_id, .. } => insert_id.as_ref(),
            MutationSummary::Modify { .. } => None,
        }
    }
}

/// Result of [`Dispatcher::execute`](super::Dispatcher::execute)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Nested(NestedResult),
    Mutation(MutationSummary),
    /// SELECT, DDL and anything else, unmodified
    Rows(RawResult),
}

impl QueryOutcome {
    pub fn as_nested(&self) -> Option<&NestedResult> {
        match self {
            QueryOutcome::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn as_mutation(&self) -> Option<&MutationSummary> {
        match self {
            QueryOutcome::Mutation(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&RawResult> {
        match self {
            QueryOutcome::Rows(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn into_nested(self) -> Option<NestedResult> {
        match self {
            QueryOutcome::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<RawResult> {
        match self {
            QueryOutcome::Rows(raw) => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_summary_json() {
        let summary = MutationSummary::Insert {
            insert_id: Some(json!(42)),
            affected_rows: 1,
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"insertId": 42, "affectedRows": 1})
        );
        assert_eq!(summary.insert_id(), Some(&json!(42)));
    }

    #[test]
    fn test_missing_insert_id_is_omitted() {
        let summary = MutationSummary::Insert {
            insert_id: None,
            affected_rows: 1,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value, json!({"affectedRows": 1}));
        assert!(value.get("insertId").is_none());
    }

    #[test]
    fn test_modify_summary_json() {
        let summary = MutationSummary::Modify { affected_rows: 3 };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"affectedRows": 3})
        );
        assert_eq!(summary.affected_rows(), 3);
        assert!(summary.insert_id().is_none());
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = QueryOutcome::Mutation(MutationSummary::Modify { affected_rows: 1 });
        assert!(outcome.as_mutation().is_some());
        assert!(outcome.as_rows().is_none());
        assert!(outcome.into_nested().is_none());
    }
}
