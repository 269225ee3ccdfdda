//! Errors that abort a compilation run.

use aot_diagnostic::Diagnostic;
use aot_resolve::ResolveError;
use thiserror::Error;

/// A fatal condition. No generated output is produced alongside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl CompileError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Resolve(err) => err.to_diagnostic(),
        }
    }
}
