//! The compilation pipeline: collect → order → describe → emit → finalize.
//!
//! One run reads a registry snapshot and the type pool, and produces every
//! generated unit plus the reflection facts in a single pass. The unit
//! registry and the fact collector live only for the duration of the run.

use aot_codegen::{BootstrapEmitter, EventListenerRequest, ReflectionFacts, UnitRegistry};
use aot_diagnostic::{Diagnostic, ErrorCode};
use aot_ir::{Definition, Pool, Registry, Role};
use aot_resolve::DescriptorBuilder;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::CompileError;
use crate::output::CompileOutput;

/// Compiles a registry into bootstrap code.
pub struct BootstrapCompiler<'a> {
    pool: &'a Pool,
    config: GeneratorConfig,
}

impl<'a> BootstrapCompiler<'a> {
    pub fn new(pool: &'a Pool, config: GeneratorConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline over `registry`.
    ///
    /// Components without a matching executable are reported as warnings
    /// and left to reflective registration. Ambiguity, incompatible factory
    /// objects and reference cycles abort the run.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %self.config.root_namespace))]
    pub fn compile<R: Registry + ?Sized>(
        &self,
        registry: &R,
        listeners: &[EventListenerRequest],
    ) -> Result<CompileOutput, CompileError> {
        let definitions = self.collect(registry);
        debug!(definitions = definitions.len(), "collected definitions");

        let mut facts = ReflectionFacts::new();
        let mut unresolved = Vec::new();
        let mut warnings = Vec::new();
        let mut descriptors = Vec::with_capacity(definitions.len());
        let mut builder = DescriptorBuilder::new(self.pool, registry);
        for def in definitions {
            if let Some(descriptor) = builder.build(def)? {
                descriptors.push(descriptor);
                continue;
            }
            warn!(component = %def.name, "no executable matches, falling back to reflection");
            warnings.push(unresolved_warning(def));
            if let Some(ty) = def.bean_class.or(def.target_type) {
                facts.record_instantiation(self.pool, ty);
            }
            unresolved.push(def.name.clone());
        }

        let mut units = UnitRegistry::new(&self.config.root_namespace, &self.config.unit_name);
        let mut emitter = BootstrapEmitter::new(self.pool, &mut units, &mut facts);
        emitter.emit(&descriptors);
        emitter.emit_event_listeners(listeners);

        let units = units.finalize(self.pool);
        debug!(
            units = units.len(),
            facts = facts.len(),
            unresolved = unresolved.len(),
            "compilation finished"
        );
        Ok(CompileOutput {
            units,
            facts: facts.into_records(),
            unresolved,
            warnings,
        })
    }

    /// Top-level definitions minus excluded types, infrastructure first
    /// when configured.
    fn collect<'r, R: Registry + ?Sized>(&self, registry: &'r R) -> Vec<&'r Definition> {
        let mut definitions = Vec::new();
        registry.for_each_definition(&mut |def| {
            let excluded = def
                .declared_type()
                .and_then(|ty| self.pool.qualified_name(ty))
                .is_some_and(|name| self.config.is_excluded(&name));
            if excluded {
                debug!(component = %def.name, "excluded");
            } else {
                definitions.push(def);
            }
        });
        if self.config.infrastructure_first {
            definitions.sort_by_key(|def| def.role != Role::Infrastructure);
        }
        definitions
    }
}

fn unresolved_warning(def: &Definition) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W2001)
        .with_message(format!(
            "no executable matches the arguments of component `{}`",
            def.name
        ))
        .with_component(&def.name)
        .with_suggestion("the component is registered reflectively at runtime")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
