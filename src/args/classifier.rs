//! Argument classifier — raw args → named record.
//!
//! Descriptors are tried in the order given. Each one scans the arguments that are
//! still unclaimed from left to right: a plain descriptor takes the first argument its
//! test accepts, a list descriptor takes every accepted argument. Claimed arguments
//! leave the pool immediately, so earlier descriptors have priority. Anything left
//! over at the end is dropped.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::args::registry::{get_type, TypeRegistry};
use crate::args::types::{Behavior, Extracted, Type};
use crate::error::{ExtractError, Result};

/// A reference to a descriptor, as accepted by [`extract`] and [`getargs`].
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// A ready-made descriptor.
    Type(Type),
    /// A name resolved through the registry at extraction time.
    Name(String),
    /// A behavior record upgraded to a descriptor at extraction time.
    Spec(Behavior),
}

impl TypeRef {
    fn resolve(&self, registry: Option<&TypeRegistry>) -> Result<Type> {
        match self {
            TypeRef::Type(ty) => Ok(ty.clone()),
            TypeRef::Spec(behavior) => Type::from_behavior(behavior.clone()),
            TypeRef::Name(name) => {
                let found = match registry {
                    Some(registry) => registry.get(name),
                    None => get_type(name),
                };
                found.ok_or_else(|| ExtractError::TypeNotFound { name: name.clone() })
            }
        }
    }
}

impl From<Type> for TypeRef {
    fn from(ty: Type) -> Self {
        TypeRef::Type(ty)
    }
}

impl From<&Type> for TypeRef {
    fn from(ty: &Type) -> Self {
        TypeRef::Type(ty.clone())
    }
}

impl From<Behavior> for TypeRef {
    fn from(behavior: Behavior) -> Self {
        TypeRef::Spec(behavior)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Name(name)
    }
}

/// A captured list of descriptors, ready to be applied to argument lists.
///
/// Names are looked up in the pinned registry (see [`Extraction::using`]) or, when none
/// is pinned, in the process-wide registry. Lookups happen on every [`Extraction::from`]
/// call, not when the extraction is built.
#[derive(Debug, Clone, Default)]
pub struct Extraction<'r> {
    types: Vec<TypeRef>,
    registry: Option<&'r TypeRegistry>,
}

impl<'r> Extraction<'r> {
    /// Start with an empty descriptor list.
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            registry: None,
        }
    }

    /// Append a descriptor reference.
    pub fn with(mut self, type_ref: impl Into<TypeRef>) -> Self {
        self.types.push(type_ref.into());
        self
    }

    /// Resolve names through `registry` instead of the process-wide one.
    pub fn using<'a>(self, registry: &'a TypeRegistry) -> Extraction<'a> {
        Extraction {
            types: self.types,
            registry: Some(registry),
        }
    }

    /// Classify `args` into a named record.
    pub fn from<I>(&self, args: I) -> Result<Extracted>
    where
        I: IntoIterator<Item = Value>,
    {
        classify(&self.types, self.registry, args.into_iter().collect())
    }

    /// Classify `args` and deserialize the record into `T`.
    pub fn from_into<T, I>(&self, args: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = Value>,
    {
        let record = self.from(args)?;
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}

/// Capture descriptor references for later use with [`Extraction::from`].
pub fn extract<I, T>(types: I) -> Extraction<'static>
where
    I: IntoIterator<Item = T>,
    T: Into<TypeRef>,
{
    Extraction {
        types: types.into_iter().map(Into::into).collect(),
        registry: None,
    }
}

/// Single-call form of [`extract`]: classify `args` against `types`.
pub fn getargs<I, T, A>(types: I, args: A) -> Result<Extracted>
where
    I: IntoIterator<Item = T>,
    T: Into<TypeRef>,
    A: IntoIterator<Item = Value>,
{
    extract(types).from(args)
}

/// Like [`getargs`], resolving names through `registry`.
pub fn getargs_in<I, T, A>(registry: &TypeRegistry, types: I, args: A) -> Result<Extracted>
where
    I: IntoIterator<Item = T>,
    T: Into<TypeRef>,
    A: IntoIterator<Item = Value>,
{
    extract(types).using(registry).from(args)
}

fn classify(
    types: &[TypeRef],
    registry: Option<&TypeRegistry>,
    mut remaining: Vec<Value>,
) -> Result<Extracted> {
    let mut result = Extracted::new();
    let total = remaining.len();

    for type_ref in types {
        let ty = type_ref.resolve(registry)?;
        let name = ty.name().to_string();
        let list = ty.is_list();
        let mut index = 0;

        while index < remaining.len() {
            if !ty.test(&remaining[index], &mut result) {
                index += 1;
                continue;
            }

            let candidate = remaining.remove(index);
            let value = ty.parse(candidate, &mut result);
            tracing::trace!(type_name = %name, position = index, "Matched argument");

            if list {
                append(&mut result, &name, value);
            } else {
                result.entry(name.as_str()).or_insert(value);
                break;
            }
        }

        if !result.contains_key(&name) {
            tracing::trace!(type_name = %name, "No argument matched, using default");
            result.insert(name, ty.default_value());
        }
    }

    if !remaining.is_empty() {
        tracing::trace!(dropped = remaining.len(), "Dropped unmatched arguments");
    }
    tracing::debug!(
        types = types.len(),
        args = total,
        claimed = total - remaining.len(),
        "Extracted arguments"
    );

    Ok(result)
}

/// Add `value` to a list slot, creating the array on first use.
fn append(result: &mut Extracted, name: &str, value: Value) {
    match result.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        // A hook already stored a scalar here; keep it as the first element.
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            result.insert(name.to_string(), Value::Array(vec![value]));
        }
    }
}
