//! Parameter Binder
//!
//! Rewrites `?` placeholders into Postgres positional markers and keeps the
//! bind values alongside the text. Statements stay parameterized; the escaped
//! interpolation produced here only feeds the TRACE log.

mod literal;
mod prepare;

pub use literal::escape_literal;
pub use prepare::{interpolate, prepare, rewrite_placeholders, BoundStatement, PLACEHOLDER};
