//! Argument classification.
//!
//! ```text
//! Descriptors (Type | name | Behavior) → Resolve → Match → Parse → Extracted
//! ```
//!
//! Names are resolved through a [`TypeRegistry`], either one pinned with
//! [`Extraction::using`] or the process-wide registry.

mod classifier;
mod kind;
mod registry;
mod types;

pub use classifier::{extract, getargs, getargs_in, Extraction, TypeRef};
pub use kind::{truthy, Transform, ValueKind};
pub use registry::{
    add_type, clear_types, get_type, list_types, register_type, SharedRegistry, TypeRegistry,
};
pub(crate) use types::is_usable_name;
pub use types::{default_type, Behavior, Extracted, ParseFn, TestFn, Type};
