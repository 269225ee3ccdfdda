//! Bootstrap code generation for the AOT bootstrap compiler.
//!
//! Turns resolved [`InstanceDescriptor`](aot_resolve::InstanceDescriptor)s
//! into Java source:
//!
//! - **Code blocks**: [`CodeBlock`] is source text with symbolic type
//!   references, rendered once import decisions are known
//! - **Formatting**: [`ValueFormatter`] renders literals, references and
//!   instantiation expressions
//! - **Units**: [`UnitRegistry`] owns the root initializer and the satellite
//!   units created for namespaces the root cannot reach
//! - **Emission**: [`BootstrapEmitter`] writes registration statements and
//!   event-listener metadata, routing each to the unit that may host it
//! - **Reflection facts**: [`ReflectionFacts`] records members the generated
//!   code relies on reflectively

mod code;
mod emitter;
mod formatter;
mod reflect;
mod unit;

pub use code::{CodeBlock, Segment, TypeNames};
pub use emitter::{BootstrapEmitter, EventListenerRequest};
pub use formatter::ValueFormatter;
pub use reflect::{FactRecord, Member, ReflectionFacts, ReflectionFlags};
pub use unit::{CompilationUnit, GeneratedUnit, MethodDecl, UnitKey, UnitRegistry};
