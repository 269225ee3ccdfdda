//! Executable resolution and instance descriptors.
//!
//! Given a declarative [`Definition`](aot_ir::Definition) and the registry it
//! came from, the [`ExecutableResolver`] picks the one constructor or factory
//! method to invoke, and the [`DescriptorBuilder`] turns that choice into an
//! [`InstanceDescriptor`] the code generator can transcribe.
//!
//! Resolution failures come in two kinds:
//! - *unresolved* (`Ok(None)`): no candidate matches, the component falls
//!   back to reflective registration
//! - *fatal* ([`ResolveError`]): ambiguity, an incompatible factory object or
//!   a reference cycle, which abort the run

mod convert;
mod descriptor;
mod error;
mod resolver;
mod stack;

pub use convert::convert_string;
pub use descriptor::{
    ArgumentSlot, ArgumentValue, DescriptorBuilder, InjectionPoint, InstanceDescriptor,
    PropertyDescriptor, PropertyHandle,
};
pub use error::ResolveError;
pub use resolver::{ArgType, ExecutableResolver, Tier};
