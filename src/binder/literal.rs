//! SQL literal escaping for statement traces
//!
//! Only used to render a readable statement in the debug log. Values sent to
//! the server always stay parameterized.

use serde_json::Value;

/// Render `value` as a SQL literal
pub fn escape_literal(value: &Value) -> String {
    let mut out = String::new();
    push_literal(&mut out, value);
    out
}

fn push_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => push_quoted(out, s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                push_literal(out, item);
            }
        }
        Value::Object(_) => push_quoted(out, &value.to_string()),
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\x08' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(escape_literal(&Value::Null), "NULL");
        assert_eq!(escape_literal(&json!(true)), "true");
        assert_eq!(escape_literal(&json!(42)), "42");
        assert_eq!(escape_literal(&json!(1.5)), "1.5");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(escape_literal(&json!("Post")), "'Post'");
        assert_eq!(escape_literal(&json!("it's")), "'it\\'s'");
        assert_eq!(escape_literal(&json!("a\nb\\c")), "'a\\nb\\\\c'");
    }

    #[test]
    fn test_array_is_comma_joined() {
        assert_eq!(escape_literal(&json!([1, "a", null])), "1, 'a', NULL");
    }

    #[test]
    fn test_object_is_quoted_json() {
        assert_eq!(escape_literal(&json!({"k": 1})), "'{\\\"k\\\":1}'");
    }
}
