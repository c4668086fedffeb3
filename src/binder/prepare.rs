//! Positional placeholder rewriting (`?` → `$1`, `$2`, ...)

use serde::Serialize;
use serde_json::Value;

use super::literal::escape_literal;
use crate::observability::{log_event, Event, Logger};

/// Placeholder marker accepted in incoming SQL
pub const PLACEHOLDER: char = '?';

/// SQL rewritten to the server's placeholder syntax, with its bind values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundStatement {
    pub text: String,
    pub values: Vec<Value>,
}

impl BoundStatement {
    /// Copy of this statement with `suffix` appended to the text
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            text: format!("{}{}", self.text, suffix),
            values: self.values.clone(),
        }
    }
}

/// Rewrite every `?` in `sql` to `$N` and pair the text with `values`
///
/// Values are not checked against the marker count; a mismatch surfaces as
/// an executor error. The interpolated statement is logged at TRACE only.
pub fn prepare(sql: &str, values: Vec<Value>) -> BoundStatement {
    let text = rewrite_placeholders(sql);
    if Logger::enabled(Event::StatementPrepared.severity()) {
        let interpolated = interpolate(sql, &values);
        log_event(
            Event::StatementPrepared,
            &[("sql", interpolated.as_str()), ("text", text.as_str())],
        );
    }
    BoundStatement { text, values }
}

/// Replace the Nth marker with `$N`
pub fn rewrite_placeholders(sql: &str) -> String {
    let mut text = String::with_capacity(sql.len() + 8);
    let mut position = 0usize;
    for c in sql.chars() {
        if c == PLACEHOLDER {
            position += 1;
            text.push('$');
            text.push_str(&position.to_string());
        } else {
            text.push(c);
        }
    }
    text
}

/// Replace each marker with its escaped value, for diagnostics only
///
/// Markers without a value render as `NULL`.
pub fn interpolate(sql: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len() + values.len() * 8);
    let mut values = values.iter();
    for c in sql.chars() {
        if c == PLACEHOLDER {
            match values.next() {
                Some(value) => out.push_str(&escape_literal(value)),
                None => out.push_str("NULL"),
            }
        } else {
            out.push(c);
        }
    }
    out
}
