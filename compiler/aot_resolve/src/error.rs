//! Fatal resolution errors.

use aot_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

/// Conditions that abort the whole compilation run.
///
/// Types and signatures are pre-rendered so the error outlives the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("multiple executables of {ty} match the arguments of component `{component}`")]
    AmbiguousExecutable {
        component: String,
        ty: String,
        candidates: Vec<String>,
    },

    #[error("incompatible target type {expected} for factory bean {factory_type} of component `{component}` (produces {produced})")]
    IncompatibleTargetType {
        component: String,
        expected: String,
        factory_type: String,
        produced: String,
    },

    #[error("cyclic reference between components: {}", .cycle.join(" -> "))]
    CyclicReference { cycle: Vec<String> },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::AmbiguousExecutable { .. } => ErrorCode::E2001,
            ResolveError::IncompatibleTargetType { .. } => ErrorCode::E2002,
            ResolveError::CyclicReference { .. } => ErrorCode::E2003,
        }
    }

    /// Name of the component the error was raised for.
    pub fn component(&self) -> Option<&str> {
        match self {
            ResolveError::AmbiguousExecutable { component, .. }
            | ResolveError::IncompatibleTargetType { component, .. } => Some(component),
            ResolveError::CyclicReference { cycle } => cycle.first().map(String::as_str),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let Some(component) = self.component() {
            diag = diag.with_component(component);
        }
        match self {
            ResolveError::AmbiguousExecutable { candidates, .. } => {
                for candidate in candidates {
                    diag = diag.with_note(format!("candidate: {candidate}"));
                }
                diag.with_suggestion("declare explicit parameter types on the definition")
            }
            ResolveError::IncompatibleTargetType {
                expected, produced, ..
            } => diag.with_note(format!("expected {expected}, factory produces {produced}")),
            ResolveError::CyclicReference { cycle } => {
                diag.with_note(format!("cycle: {}", cycle.join(" -> ")))
            }
        }
    }
}
