//! Classify loosely-ordered arguments into a named record.
//!
//! A function that accepts optional or reorderable arguments describes each slot
//! with a [`Type`] (a name, a test, a parse step, a default and a list flag) and
//! lets [`extract`] sort the raw values into an [`Extracted`] map:
//!
//! ```
//! use serde_json::json;
//! use targo::{extract, Behavior, ValueKind};
//!
//! let args = extract([
//!     Behavior::named("msg").kind(ValueKind::String),
//!     Behavior::named("rest").kind(ValueKind::Number).list(true),
//! ])
//! .from([json!(10), json!("hello"), json!(20)])
//! .unwrap();
//!
//! assert_eq!(args["msg"], "hello");
//! assert_eq!(args["rest"], json!([10, 20]));
//! ```

pub mod args;
pub mod config;
mod error;
mod logging;

pub use args::{
    add_type, clear_types, default_type, extract, get_type, getargs, getargs_in, list_types,
    register_type, truthy, Behavior, Extracted, Extraction, ParseFn, SharedRegistry, TestFn,
    Transform, Type, TypeRef, TypeRegistry, ValueKind,
};
pub use config::{ConfigError, RegistryConfig, TypeConfig};
pub use error::{ExtractError, Result};
pub use logging::init_tracing;
