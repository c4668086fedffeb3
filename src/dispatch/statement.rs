//! Statement classification and request options

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::nest::QualifierPlan;

/// Statement kind, taken from the leading SQL keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// DDL and everything else
    Other,
}

static LEADING_KEYWORD: OnceLock<Option<Regex>> = OnceLock::new();

fn leading_keyword() -> Option<&'static Regex> {
    LEADING_KEYWORD
        .get_or_init(|| Regex::new(r"(?i)^\s*(select|insert|update|delete)\b").ok())
        .as_ref()
}

impl StatementKind {
    /// Classify `sql` by its first keyword, case-insensitively
    pub fn classify(sql: &str) -> Self {
        let Some(caps) = leading_keyword().and_then(|re| re.captures(sql)) else {
            return StatementKind::Other;
        };
        match caps[1].to_ascii_lowercase().as_str() {
            "select" => StatementKind::Select,
            "insert" => StatementKind::Insert,
            "update" => StatementKind::Update,
            "delete" => StatementKind::Delete,
            _ => StatementKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SQL plus the shaping options the mapping layer attaches to it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementRequest {
    /// SQL with `?` placeholders
    pub sql: String,
    /// When set, rows are fetched as arrays and nested by this plan
    pub nest: Option<QualifierPlan>,
    /// Primary-key column returned by INSERT
    pub primary_key: Option<String>,
}

impl StatementRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Request nested rows grouped by `plan`
    pub fn nest(mut self, plan: impl Into<QualifierPlan>) -> Self {
        self.nest = Some(plan.into());
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    pub fn kind(&self) -> StatementKind {
        StatementKind::classify(&self.sql)
    }
}

impl From<&str> for StatementRequest {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for StatementRequest {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(StatementKind::classify("SELECT 1"), StatementKind::Select);
        assert_eq!(
            StatementKind::classify("INSERT INTO t VALUES (1)"),
            StatementKind::Insert
        );
        assert_eq!(StatementKind::classify("UPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::classify("DELETE FROM t"), StatementKind::Delete);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(StatementKind::classify("insert into t"), StatementKind::Insert);
        assert_eq!(StatementKind::classify("UpDaTe t set a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::classify("delete from t"), StatementKind::Delete);
    }

    #[test]
    fn test_classify_leading_whitespace() {
        assert_eq!(
            StatementKind::classify("\n  insert into t"),
            StatementKind::Insert
        );
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(StatementKind::classify("CREATE TABLE t (id int)"), StatementKind::Other);
        assert_eq!(StatementKind::classify("inserted"), StatementKind::Other);
        assert_eq!(StatementKind::classify(""), StatementKind::Other);
        assert_eq!(
            StatementKind::classify("WITH x AS (SELECT 1) SELECT * FROM x"),
            StatementKind::Other
        );
    }

    #[test]
    fn test_request_builders() {
        let request = StatementRequest::new("INSERT INTO articles (title) VALUES (?)")
            .primary_key("id");
        assert_eq!(request.kind(), StatementKind::Insert);
        assert_eq!(request.primary_key.as_deref(), Some("id"));
        assert!(request.nest.is_none());

        let request = StatementRequest::from("SELECT * FROM articles").nest(["articles"]);
        assert_eq!(request.nest.map(|p| p.len()), Some(1));
    }
}
