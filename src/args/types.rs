//! Type descriptors — what an argument looks like and where it goes.
//!
//! A [`Type`] names one slot of the extracted record and carries the behavior used to
//! fill it: a `test` predicate, a `parse` step, a default value and a list flag.
//! Every behavior field is optional; unset fields fall back to the base descriptor
//! (for types built with [`Type::extend`]) and finally to the library defaults.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::args::kind::{Transform, ValueKind};
use crate::error::{ExtractError, Result};

/// The record produced by an extraction, keyed by descriptor name.
pub type Extracted = serde_json::Map<String, Value>;

/// Predicate deciding whether a candidate belongs to a slot.
pub type TestFn = Arc<dyn Fn(&Value, &mut Extracted) -> bool + Send + Sync>;

/// Transform applied to a matched candidate before it is stored.
pub type ParseFn = Arc<dyn Fn(Value, &mut Extracted) -> Value + Send + Sync>;

static DEFAULT_TYPE: LazyLock<Type> = LazyLock::new(|| Type::unchecked("default"));

/// The pre-built descriptor named `"default"`, carrying only library defaults.
///
/// Handy as a base for [`Type::extend`].
pub fn default_type() -> Type {
    DEFAULT_TYPE.clone()
}

/// Whether `name` can label a slot: it must contain something besides whitespace.
pub(crate) fn is_usable_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// A set of behavior overrides, optionally carrying a name.
///
/// This is both the "raw configuration object" accepted by the extraction engine and
/// the overrides record of a descriptor.
#[derive(Clone, Default)]
pub struct Behavior {
    name: Option<String>,
    test: Option<TestFn>,
    parse: Option<ParseFn>,
    default_value: Option<Value>,
    list: Option<bool>,
}

impl Behavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// A behavior record that carries its own name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the predicate. It sees the in-progress record and may write to it.
    pub fn test<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &mut Extracted) -> bool + Send + Sync + 'static,
    {
        self.test = Some(Arc::new(f));
        self
    }

    /// Set the parse step. It sees the in-progress record and may write sibling fields.
    pub fn parse<F>(mut self, f: F) -> Self
    where
        F: Fn(Value, &mut Extracted) -> Value + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(f));
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn list(mut self, list: bool) -> Self {
        self.list = Some(list);
        self
    }

    /// Match only values of the given kind.
    pub fn kind(self, kind: ValueKind) -> Self {
        self.test(move |candidate, _| kind.matches(candidate))
    }

    /// Match only values equal to `expected`.
    pub fn equals(self, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        self.test(move |candidate, _| *candidate == expected)
    }

    /// Use a built-in parse step.
    pub fn transform(self, transform: Transform) -> Self {
        self.parse(move |value, _| transform.apply(value))
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("name", &self.name)
            .field("test", &self.test.as_ref().map(|_| "<fn>"))
            .field("parse", &self.parse.as_ref().map(|_| "<fn>"))
            .field("default_value", &self.default_value)
            .field("list", &self.list)
            .finish()
    }
}

/// A named argument descriptor.
///
/// `Type` is a shared handle: clones (including the copy held by a registry) observe the
/// same behavior record, and changes made through the `set_*` methods are seen by every
/// holder and by derived types that did not override the changed field.
#[derive(Clone)]
pub struct Type {
    inner: Arc<TypeInner>,
}

struct TypeInner {
    name: String,
    overrides: RwLock<Behavior>,
    base: Option<Type>,
}

impl Type {
    /// Build a descriptor from a name and behavior. The explicit name wins over any
    /// name carried by `behavior`.
    pub fn new(name: impl Into<String>, behavior: Behavior) -> Result<Self> {
        Self::build(Some(name.into()), behavior, None)
    }

    /// Build a descriptor from a record that carries its own name.
    pub fn from_behavior(behavior: Behavior) -> Result<Self> {
        Self::build(None, behavior, None)
    }

    /// A descriptor with library defaults only.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Behavior::new())
    }

    /// Derive a descriptor that behaves like `self` except where `overrides` says
    /// otherwise. Non-overridden fields are looked up on `self` at call time.
    pub fn extend(&self, name: impl Into<String>, overrides: Behavior) -> Result<Self> {
        Self::build(Some(name.into()), overrides, Some(self.clone()))
    }

    fn build(name: Option<String>, mut behavior: Behavior, base: Option<Type>) -> Result<Self> {
        // An explicit name is final; the carried name is only used when none is given.
        let name = name
            .or_else(|| behavior.name.clone())
            .filter(|n| is_usable_name(n))
            .ok_or_else(|| ExtractError::NoName {
                value: format!("{:?}", behavior),
            })?;
        behavior.name = Some(name.clone());

        Ok(Self {
            inner: Arc::new(TypeInner {
                name,
                overrides: RwLock::new(behavior),
                base,
            }),
        })
    }

    fn unchecked(name: &str) -> Self {
        Self {
            inner: Arc::new(TypeInner {
                name: name.to_string(),
                overrides: RwLock::new(Behavior::named(name)),
                base: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The descriptor this one was derived from.
    pub fn base(&self) -> Option<&Type> {
        self.inner.base.as_ref()
    }

    /// Run the predicate; `true` when no predicate is set anywhere in the chain.
    pub fn test(&self, candidate: &Value, result: &mut Extracted) -> bool {
        // Hooks run without the lock held so they may reconfigure descriptors.
        match self.test_fn() {
            Some(test) => test(candidate, result),
            None => true,
        }
    }

    /// Run the parse step; identity when none is set anywhere in the chain.
    pub fn parse(&self, value: Value, result: &mut Extracted) -> Value {
        match self.parse_fn() {
            Some(parse) => parse(value, result),
            None => value,
        }
    }

    pub fn default_value(&self) -> Value {
        let own = self.inner.overrides.read().default_value.clone();
        match (own, self.base()) {
            (Some(value), _) => value,
            (None, Some(base)) => base.default_value(),
            (None, None) => Value::Null,
        }
    }

    pub fn is_list(&self) -> bool {
        let own = self.inner.overrides.read().list;
        match (own, self.base()) {
            (Some(list), _) => list,
            (None, Some(base)) => base.is_list(),
            (None, None) => false,
        }
    }

    pub fn set_test<F>(&self, f: F)
    where
        F: Fn(&Value, &mut Extracted) -> bool + Send + Sync + 'static,
    {
        self.inner.overrides.write().test = Some(Arc::new(f));
    }

    pub fn set_parse<F>(&self, f: F)
    where
        F: Fn(Value, &mut Extracted) -> Value + Send + Sync + 'static,
    {
        self.inner.overrides.write().parse = Some(Arc::new(f));
    }

    pub fn set_default_value(&self, value: impl Into<Value>) {
        self.inner.overrides.write().default_value = Some(value.into());
    }

    pub fn set_list(&self, list: bool) {
        self.inner.overrides.write().list = Some(list);
    }

    /// Whether both handles point at the same descriptor.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn test_fn(&self) -> Option<TestFn> {
        let own = self.inner.overrides.read().test.clone();
        own.or_else(|| self.base().and_then(Type::test_fn))
    }

    fn parse_fn(&self) -> Option<ParseFn> {
        let own = self.inner.overrides.read().parse.clone();
        own.or_else(|| self.base().and_then(Type::parse_fn))
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("list", &self.is_list())
            .field("default_value", &self.default_value())
            .field("base", &self.base().map(Type::name))
            .finish()
    }
}
