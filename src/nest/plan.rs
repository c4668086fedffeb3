//! Qualifier plan: primary alias followed by joined aliases in join order

use serde::{Deserialize, Serialize};

/// Ordered qualifier names consumed positionally by the nester
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifierPlan {
    qualifiers: Vec<String>,
}

impl QualifierPlan {
    /// Plan for `primary` joined with `joins`, in join order
    pub fn new<I, S>(primary: impl Into<String>, joins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut qualifiers = vec![primary.into()];
        qualifiers.extend(joins.into_iter().map(Into::into));
        Self { qualifiers }
    }

    /// Qualifier assigned to the `index`th column run
    pub fn get(&self, index: usize) -> Option<&str> {
        self.qualifiers.get(index).map(String::as_str)
    }

    pub fn primary(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.qualifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.qualifiers.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for QualifierPlan {
    fn from(qualifiers: Vec<String>) -> Self {
        Self { qualifiers }
    }
}

impl From<Vec<&str>> for QualifierPlan {
    fn from(qualifiers: Vec<&str>) -> Self {
        Self {
            qualifiers: qualifiers.into_iter().map(String::from).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for QualifierPlan {
    fn from(qualifiers: [&str; N]) -> Self {
        Self {
            qualifiers: qualifiers.iter().map(|q| q.to_string()).collect(),
        }
    }
}
