//! Intermediate representation for the AOT bootstrap compiler.
//!
//! This crate holds the inputs of one compilation run:
//!
//! - **Type universe**: [`Pool`] owns every declared, array, parameterized and
//!   variable type, addressed by [`Idx`], plus constructors and methods
//!   addressed by [`ExecId`]
//! - **Definitions**: [`Definition`] is the declarative recipe for one
//!   component; [`Value`] and [`Argument`] are what it passes to executables
//! - **Registry**: [`Registry`] is the read-only view of the container;
//!   [`DefinitionRegistry`] is its in-memory implementation
//!
//! Nothing here is mutated once a run starts. The resolver and the code
//! generator only read from the pool and the registry.

mod definition;
mod executable;
mod idx;
mod pool;
mod registry;
mod value;

pub mod testing;

pub use definition::{Definition, PropertyValue, Role};
pub use executable::{
    ExecId, Executable, ExecutableDef, ExecutableKind, FieldDef, Visibility,
};
pub use idx::Idx;
pub use pool::{qualify, DeclaredType, Pool, TypeData, TypeKind};
pub use registry::{DefinitionRegistry, Registry};
pub use value::{Argument, Value};
