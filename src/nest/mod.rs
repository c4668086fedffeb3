//! Row Nester
//!
//! Regroups the flat rows of a join into one object per qualifier, casting
//! every value through the Type Cast Registry on the way.

mod nester;
mod plan;

pub use nester::{nest, nest_with, NestedResult, NormalizedRow};
pub use plan::QualifierPlan;
