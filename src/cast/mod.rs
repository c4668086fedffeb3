//! Type Cast Registry
//!
//! Maps a wire type code to a conversion and applies it best-effort:
//! conversion failures are logged and swallowed, unknown codes pass through.
//!
//! ```ignore
//! use rowshape::cast::{cast, wire_type};
//! use rowshape::client::ColumnDescriptor;
//!
//! let id = ColumnDescriptor::new(15629, "id", wire_type::INT8);
//! assert_eq!(cast(serde_json::json!("42"), &id), serde_json::json!(42));
//! ```

mod errors;
mod registry;

pub use errors::{CastError, RegistryError};
pub use registry::{cast, wire_type, ConvertFn, TypeCastRegistry, TypeCastRule};
