//! The extension point for output syntaxes.
//!
//! An [`Emitter`] accumulates the constants of one generated type and the
//! emitters of its nested types, then renders them in one pass. An
//! [`EmitterProvider`] creates the top-level emitter for each resource root.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, EmitError};

/// One constant of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceConstant {
    pub identifier: String,
    /// Canonical resource path, `/`-separated.
    pub path: String,
}

/// Accumulates the declaration of one generated type.
pub trait Emitter {
    /// Extension of the written file, without the dot.
    fn file_extension(&self) -> &str;

    /// Output module directory, e.g. `java` or `kotlin`.
    fn module_name(&self) -> &str;

    fn state(&self) -> &EmitterState;

    /// Record a constant. Constants render in insertion order.
    fn add_resource(&mut self, identifier: String, path: String);

    /// Register a nested type one level deeper and return its emitter.
    fn add_nested(&mut self, type_name: &str) -> &mut dyn Emitter;

    /// Render this type and all nested types. Reads accumulated state only.
    fn build(&self) -> Result<String, EmitError>;

    /// Whether `identifier` is already used by a constant or nested type of
    /// this type.
    fn contains(&self, identifier: &str) -> bool {
        self.state().contains(identifier)
    }
}

/// Creates top-level emitters for one output syntax.
pub trait EmitterProvider {
    /// Name the provider is selected by in configuration.
    fn id(&self) -> &str;

    fn module_name(&self) -> &str;

    fn provide(&self, type_name: &str, config: &GeneratorConfig) -> Box<dyn Emitter>;
}

/// Constants and identifiers of one type, shared by emitter implementations.
#[derive(Debug, Clone, Default)]
pub struct EmitterState {
    type_name: String,
    depth: usize,
    /// Names of the enclosing types, outermost first.
    enclosing: Vec<String>,
    constants: Vec<ResourceConstant>,
    identifiers: HashSet<String>,
}

impl EmitterState {
    /// State of a top-level type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// State of a type nested directly inside this one. The name is recorded
    /// as a member of this type.
    pub fn nested(&mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.identifiers.insert(type_name.clone());

        let mut enclosing = self.enclosing.clone();
        enclosing.push(self.type_name.clone());
        Self {
            type_name,
            depth: self.depth + 1,
            enclosing,
            ..Self::default()
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Nesting level, `0` for the top-level type.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    /// Tab indentation for this type's declaration line.
    pub fn indent(&self) -> String {
        "\t".repeat(self.depth)
    }

    pub fn constants(&self) -> &[ResourceConstant] {
        &self.constants
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Whether `name` is free for a type nested directly inside this one. A
    /// nested type may not reuse a member name or the name of any enclosing type.
    pub fn is_nested_name_free(&self, name: &str) -> bool {
        !self.contains(name) && self.type_name != name && !self.enclosing.iter().any(|n| n == name)
    }

    pub fn push(&mut self, identifier: String, path: String) {
        self.identifiers.insert(identifier.clone());
        self.constants.push(ResourceConstant { identifier, path });
    }
}

/// Emitter providers by id, in registration order.
#[derive(Default)]
pub struct EmitterRegistry {
    providers: IndexMap<String, Box<dyn EmitterProvider>>,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any provider with the same id.
    pub fn register(&mut self, provider: Box<dyn EmitterProvider>) {
        self.providers.insert(provider.id().to_string(), provider);
    }

    pub fn get(&self, id: &str) -> Result<&dyn EmitterProvider, ConfigError> {
        self.providers
            .get(id)
            .map(|p| p.as_ref())
            .ok_or_else(|| ConfigError::UnknownEmitter(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}
