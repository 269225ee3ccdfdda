//! Result of a successful compilation run.

use aot_codegen::{FactRecord, GeneratedUnit};
use aot_diagnostic::Diagnostic;

/// Generated units plus everything the runtime needs to service the
/// components generated code does not cover.
#[derive(Clone, Debug)]
pub struct CompileOutput {
    /// Root unit first, then satellites in creation order.
    pub units: Vec<GeneratedUnit>,
    /// Reflection facts, merged per type, in first-seen order.
    pub facts: Vec<FactRecord>,
    /// Components left to reflective registration.
    pub unresolved: Vec<String>,
    /// Non-fatal diagnostics, one per unresolved component.
    pub warnings: Vec<Diagnostic>,
}

impl CompileOutput {
    /// The entry-point unit.
    pub fn root(&self) -> Option<&GeneratedUnit> {
        self.units.first()
    }

    /// Unit generated for `namespace`.
    pub fn unit(&self, namespace: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.key.namespace == namespace)
    }

    pub fn satellites(&self) -> &[GeneratedUnit] {
        self.units.get(1..).unwrap_or_default()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
