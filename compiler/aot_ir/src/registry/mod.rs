//! Registry of component definitions.
//!
//! The [`Registry`] trait is the read-only view a compilation run has of the
//! container. [`DefinitionRegistry`] is the in-memory implementation used by
//! the driver and tests.

use rustc_hash::FxHashMap;

use crate::Definition;

/// Read-only source of component definitions.
pub trait Registry {
    /// Visit every top-level definition in discovery order.
    fn for_each_definition<'r>(&'r self, visitor: &mut dyn FnMut(&'r Definition));

    /// Look up a definition by component name.
    fn resolve_reference(&self, name: &str) -> Option<&Definition>;
}

/// Insertion-ordered definitions with a name index.
#[derive(Clone, Debug, Default)]
pub struct DefinitionRegistry {
    /// Definitions in registration order.
    definitions: Vec<Definition>,

    /// Name -> position in `definitions`.
    by_name: FxHashMap<String, usize>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Registering an existing name replaces the
    /// previous definition in place, keeping its position.
    pub fn register(&mut self, definition: Definition) {
        if let Some(&pos) = self.by_name.get(&definition.name) {
            self.definitions[pos] = definition;
            return;
        }
        self.by_name
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }
}

impl Registry for DefinitionRegistry {
    fn for_each_definition<'r>(&'r self, visitor: &mut dyn FnMut(&'r Definition)) {
        for definition in &self.definitions {
            visitor(definition);
        }
    }

    fn resolve_reference(&self, name: &str) -> Option<&Definition> {
        self.by_name
            .get(name)
            .and_then(|&pos| self.definitions.get(pos))
    }
}

impl FromIterator<Definition> for DefinitionRegistry {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}
