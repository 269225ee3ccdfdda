//! Diagnostic system for the AOT bootstrap compiler.
//!
//! Every fatal condition carries a stable [`ErrorCode`] so it can be searched
//! for, plus the component it concerns and notes naming the competing
//! candidates or the members of a reference cycle.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
