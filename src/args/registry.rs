//! Type registry — named descriptors that extraction can refer to by string.
//!
//! Registration order is preserved. Duplicate names are allowed; lookups return the
//! most recently added match, so later registrations shadow earlier ones.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::args::types::{Behavior, Type};
use crate::error::Result;

/// A registry shared across threads.
///
/// `parking_lot` locks are not reentrant: extracting with `&shared.read()` keeps the
/// read guard alive while hooks run, so a hook that writes to the same registry
/// deadlocks. Extract against a snapshot (`shared.read().clone()`) in that case.
pub type SharedRegistry = Arc<RwLock<TypeRegistry>>;

static GLOBAL: LazyLock<RwLock<TypeRegistry>> = LazyLock::new(|| RwLock::new(TypeRegistry::new()));

/// Ordered collection of named descriptors.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<Type>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Wrap the registry for sharing across threads.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Append a descriptor as-is. No uniqueness check.
    pub fn add(&mut self, ty: Type) {
        tracing::debug!(name = %ty.name(), position = self.types.len(), "Registered type");
        self.types.push(ty);
    }

    /// Build a descriptor from `name` and `behavior`, then append it.
    pub fn register(&mut self, name: &str, behavior: Behavior) -> Result<Type> {
        let ty = Type::new(name, behavior)?;
        self.add(ty.clone());
        Ok(ty)
    }

    /// The last registered descriptor called `name`.
    pub fn get(&self, name: &str) -> Option<Type> {
        self.types.iter().rev().find(|t| t.name() == name).cloned()
    }

    /// A copy of the registered descriptors in insertion order.
    pub fn list(&self) -> Vec<Type> {
        self.types.clone()
    }

    pub fn clear(&mut self) {
        if !self.types.is_empty() {
            tracing::debug!(removed = self.types.len(), "Cleared type registry");
        }
        self.types.clear();
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// =============================================================================
// Process-wide registry
// =============================================================================
//
// Each call takes the lock for its own duration only. Callers that need several
// operations to happen atomically should use their own `TypeRegistry`.

/// Append a descriptor to the process-wide registry.
pub fn add_type(ty: Type) {
    GLOBAL.write().add(ty);
}

/// Build and append a descriptor to the process-wide registry.
pub fn register_type(name: &str, behavior: Behavior) -> Result<Type> {
    GLOBAL.write().register(name, behavior)
}

/// Look up a descriptor in the process-wide registry.
pub fn get_type(name: &str) -> Option<Type> {
    GLOBAL.read().get(name)
}

/// A copy of the process-wide registry's descriptors.
pub fn list_types() -> Vec<Type> {
    GLOBAL.read().list()
}

/// Empty the process-wide registry.
pub fn clear_types() {
    GLOBAL.write().clear();
}
