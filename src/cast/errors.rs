//! Cast error types
//!
//! A [`CastError`] never leaves the registry: `cast` catches it, logs it and
//! hands back the original value.

use thiserror::Error;

/// A cast rule could not convert a raw value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// Text did not parse as the target type; the text itself is not kept
    #[error("cannot parse text of length {len} as {target}")]
    Unparseable { len: usize, target: &'static str },

    /// Raw value has a JSON shape the rule does not accept
    #[error("cannot cast {kind} value to {target}")]
    UnsupportedShape { kind: &'static str, target: &'static str },
}

/// Building a registry failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two rules claimed the same wire type code
    #[error("duplicate cast rule for wire type {0}")]
    DuplicateRule(u32),
}
