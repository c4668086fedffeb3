//! Wire type code → conversion lookup
//!
//! Postgres keeps 8-byte integers as decimal text so no precision is lost in
//! transit; the `int8` rule turns them back into JSON integers. NULL stays
//! NULL.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::{Number, Value};

use super::errors::{CastError, RegistryError};
use crate::client::ColumnDescriptor;
use crate::observability::{log_event, Event};

/// Postgres type OIDs this crate refers to by name
pub mod wire_type {
    pub const BOOL: u32 = 16;
    pub const INT8: u32 = 20;
    pub const INT2: u32 = 21;
    pub const INT4: u32 = 23;
    pub const TEXT: u32 = 25;
}

/// Fallible conversion of one raw value
pub type ConvertFn = fn(&Value) -> Result<Value, CastError>;

/// One conversion keyed by wire type code
#[derive(Debug, Clone, Copy)]
pub struct TypeCastRule {
    pub wire_type: u32,
    /// Postgres `typname`, used in diagnostics
    pub name: &'static str,
    pub convert: ConvertFn,
}

impl TypeCastRule {
    pub const fn new(wire_type: u32, name: &'static str, convert: ConvertFn) -> Self {
        Self {
            wire_type,
            name,
            convert,
        }
    }
}

/// Immutable lookup table of cast rules
///
/// At most one rule per wire type code. There is no mutation API: build a
/// registry with [`TypeCastRegistry::from_rules`] and share it by reference.
#[derive(Debug, Clone)]
pub struct TypeCastRegistry {
    rules: HashMap<u32, TypeCastRule>,
}

static GLOBAL: OnceLock<TypeCastRegistry> = OnceLock::new();

impl TypeCastRegistry {
    /// Build a registry, rejecting duplicate wire type codes
    pub fn from_rules(
        rules: impl IntoIterator<Item = TypeCastRule>,
    ) -> Result<Self, RegistryError> {
        let mut table = HashMap::new();
        for rule in rules {
            if table.insert(rule.wire_type, rule).is_some() {
                return Err(RegistryError::DuplicateRule(rule.wire_type));
            }
        }
        Ok(Self { rules: table })
    }

    /// Registry holding the built-in rules
    pub fn builtin() -> Self {
        let rule = TypeCastRule::new(wire_type::INT8, "int8", cast_int8);
        let mut rules = HashMap::with_capacity(1);
        rules.insert(rule.wire_type, rule);
        Self { rules }
    }

    /// Process-wide built-in registry, initialized on first use
    pub fn global() -> &'static TypeCastRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Rule registered for `wire_type`, if any
    pub fn rule(&self, wire_type: u32) -> Option<&TypeCastRule> {
        self.rules.get(&wire_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Best-effort cast of `value` according to `descriptor.wire_type`
    ///
    /// Unregistered codes pass through. A failed conversion is logged and the
    /// original value is returned; it is never surfaced to the caller.
    pub fn cast(&self, value: Value, descriptor: &ColumnDescriptor) -> Value {
        let Some(rule) = self.rule(descriptor.wire_type) else {
            return value;
        };

        match (rule.convert)(&value) {
            Ok(converted) => converted,
            Err(err) => {
                let wire_type = descriptor.wire_type.to_string();
                let reason = err.to_string();
                log_event(
                    Event::CastFailed,
                    &[
                        ("column", descriptor.name.as_str()),
                        ("reason", reason.as_str()),
                        ("rule", rule.name),
                        ("wire_type", wire_type.as_str()),
                    ],
                );
                value
            }
        }
    }
}

impl Default for TypeCastRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Cast through the process-wide registry
pub fn cast(value: Value, descriptor: &ColumnDescriptor) -> Value {
    TypeCastRegistry::global().cast(value, descriptor)
}

fn cast_int8(value: &Value) -> Result<Value, CastError> {
    const TARGET: &str = "int8";

    match value {
        // NULL is a valid int8 value, not a failed cast
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                Ok(Value::Number(Number::from(n)))
            } else if let Ok(n) = text.parse::<u64>() {
                Ok(Value::Number(Number::from(n)))
            } else {
                Err(CastError::Unparseable {
                    len: text.len(),
                    target: TARGET,
                })
            }
        }
        Value::Bool(_) => Err(CastError::UnsupportedShape {
            kind: "boolean",
            target: TARGET,
        }),
        Value::Array(_) => Err(CastError::UnsupportedShape {
            kind: "array",
            target: TARGET,
        }),
        Value::Object(_) => Err(CastError::UnsupportedShape {
            kind: "object",
            target: TARGET,
        }),
    }
}
