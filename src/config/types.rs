use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::{Behavior, Transform, Type, TypeRegistry, ValueKind};
use crate::config::loader::ConfigError;
use crate::error::ExtractError;

/// Root of a type declaration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Declared types, registered in file order.
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

/// A closure-free type declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// Slot name (required, non-empty).
    #[serde(default)]
    pub name: String,
    /// Accept only values of this kind (default: any).
    #[serde(default)]
    pub kind: ValueKind,
    /// Accept only values equal to this literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    /// Collect every match instead of the first.
    #[serde(default)]
    pub list: bool,
    /// Value stored when nothing matches (default: null).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Parse step applied to matched values (default: identity).
    #[serde(default)]
    pub transform: Transform,
}

impl TypeConfig {
    /// Build the behavior record this declaration describes.
    pub fn to_behavior(&self) -> Behavior {
        let mut behavior = Behavior::named(self.name.as_str())
            .list(self.list)
            .transform(self.transform);

        if self.kind != ValueKind::Any || self.equals.is_some() {
            let kind = self.kind;
            let equals = self.equals.clone();
            behavior = behavior.test(move |candidate, _| {
                kind.matches(candidate) && equals.as_ref().is_none_or(|e| e == candidate)
            });
        }

        if let Some(default) = &self.default {
            behavior = behavior.default_value(default.clone());
        }

        behavior
    }

    pub fn to_type(&self) -> Result<Type, ExtractError> {
        Type::from_behavior(self.to_behavior())
    }
}

impl TypeRegistry {
    /// Build a registry holding every type declared in `config`.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let mut registry = TypeRegistry::new();
        registry.load_config(config)?;
        Ok(registry)
    }

    /// Validate `config` and append its types. Returns how many were added.
    ///
    /// Nothing is added when validation fails.
    pub fn load_config(&mut self, config: &RegistryConfig) -> Result<usize, ConfigError> {
        config.validate()?;

        let types = config
            .types
            .iter()
            .map(TypeConfig::to_type)
            .collect::<Result<Vec<_>, _>>()?;
        let count = types.len();
        for ty in types {
            self.add(ty);
        }
        Ok(count)
    }
}
