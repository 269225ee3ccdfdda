//! Configuration of one compilation run.

use rustc_hash::FxHashSet;

/// Namespace of the generated entry point unless configured otherwise.
pub const DEFAULT_ROOT_NAMESPACE: &str = "com.example";

/// Name shared by the entry point and every satellite unit.
pub const DEFAULT_UNIT_NAME: &str = "ContextBootstrapInitializer";

/// Configuration for the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespace the root unit is generated in. Accessibility of every
    /// referenced type is judged from here.
    pub root_namespace: String,

    /// Simple name of the root unit, reused by satellites.
    pub unit_name: String,

    /// Qualified names of component types left out of generated code.
    pub excluded_types: FxHashSet<String>,

    /// Register infrastructure components before application ones. The
    /// relative order within each group is kept.
    pub infrastructure_first: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_owned(),
            unit_name: DEFAULT_UNIT_NAME.to_owned(),
            excluded_types: FxHashSet::default(),
            infrastructure_first: true,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_root_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_unit_name(mut self, name: impl Into<String>) -> Self {
        self.unit_name = name.into();
        self
    }

    #[must_use]
    pub fn with_excluded_type(mut self, qualified_name: impl Into<String>) -> Self {
        self.excluded_types.insert(qualified_name.into());
        self
    }

    #[must_use]
    pub fn with_infrastructure_first(mut self, enabled: bool) -> Self {
        self.infrastructure_first = enabled;
        self
    }

    #[inline]
    pub fn is_excluded(&self, qualified_name: &str) -> bool {
        self.excluded_types.contains(qualified_name)
    }
}
