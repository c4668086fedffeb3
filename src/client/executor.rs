//! Raw executor contract and wire-level result types
//!
//! The raw executor issues the parameterized statement over the wire. Its
//! errors are its own and travel through this crate unchanged.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identifier::escape_identifier;
use crate::binder::BoundStatement;

/// `table_id` reported for computed columns that belong to no table
pub const NO_TABLE: u32 = 0;

/// Per-column metadata from the row description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Source table OID, [`NO_TABLE`] for expressions
    pub table_id: u32,
    pub name: String,
    /// Type OID
    pub wire_type: u32,
}

impl ColumnDescriptor {
    pub fn new(table_id: u32, name: impl Into<String>, wire_type: u32) -> Self {
        Self {
            table_id,
            name: name.into(),
            wire_type,
        }
    }
}

/// Shape requested for returned rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowMode {
    /// One object per row keyed by column name; duplicate names collide
    #[default]
    Keyed,
    /// One array per row in column order
    Array,
}

/// One returned row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    Keyed(Map<String, Value>),
    Positional(Vec<Value>),
}

impl Row {
    /// Value in column `index`
    ///
    /// Keyed rows resolve through the name in `fields[index]`.
    pub fn value_at(&self, index: usize, fields: &[ColumnDescriptor]) -> Option<&Value> {
        match self {
            Row::Positional(values) => values.get(index),
            Row::Keyed(map) => fields.get(index).and_then(|f| map.get(&f.name)),
        }
    }

    /// Value of the column called `name`
    ///
    /// Positional rows resolve through the first field with that name.
    pub fn value_named(&self, name: &str, fields: &[ColumnDescriptor]) -> Option<&Value> {
        match self {
            Row::Keyed(map) => map.get(name),
            Row::Positional(values) => fields
                .iter()
                .position(|f| f.name == name)
                .and_then(|i| values.get(i)),
        }
    }
}

/// Rows, column metadata and reported row count of one statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawResult {
    pub rows: Vec<Row>,
    pub fields: Vec<ColumnDescriptor>,
    /// Rows affected or returned, as reported by the server
    pub row_count: u64,
}

/// Future returned by [`RawExecutor::execute_statement`]
pub type ExecuteFuture<'a, E> = Pin<Box<dyn Future<Output = Result<RawResult, E>> + Send + 'a>>;

/// Issues parameterized statements over the wire
pub trait RawExecutor: Send + Sync {
    /// Protocol failure type, propagated unchanged
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `statement`, returning rows in `mode`
    fn execute_statement<'a>(
        &'a self,
        statement: &'a BoundStatement,
        mode: RowMode,
    ) -> ExecuteFuture<'a, Self::Error>;

    /// Quote an identifier in the dialect's convention
    fn escape_identifier(&self, name: &str) -> String {
        escape_identifier(name)
    }
}

impl<E: RawExecutor> RawExecutor for Arc<E> {
    type Error = E::Error;

    fn execute_statement<'a>(
        &'a self,
        statement: &'a BoundStatement,
        mode: RowMode,
    ) -> ExecuteFuture<'a, Self::Error> {
        self.as_ref().execute_statement(statement, mode)
    }

    fn escape_identifier(&self, name: &str) -> String {
        self.as_ref().escape_identifier(name)
    }
}
