//! Declarative component definitions.
//!
//! A [`Definition`] is the read-only input describing how the container
//! builds one component. Definitions are produced by the external registry
//! and never mutated during a run.

use crate::{Argument, ExecId, Idx, Value};

/// Role hint of a component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Application,
    Infrastructure,
    Synthetic,
}

/// A property to set on the created instance.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyValue {
    pub name: String,
    pub value: Value,
}

/// How to build one component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Definition {
    /// Component name, empty for inner definitions.
    pub name: String,

    /// Class to instantiate, or declaring class of a static factory method.
    pub bean_class: Option<Idx>,

    /// Expected type of the component, possibly parameterized.
    pub target_type: Option<Idx>,

    /// Component hosting an instance factory method.
    pub factory_bean: Option<String>,

    pub factory_method: Option<String>,

    /// Executable already known to the registry; skips resolution.
    pub executable: Option<ExecId>,

    /// Explicit parameter types of the executable to use.
    pub parameter_types: Option<Vec<Idx>>,

    pub arguments: Vec<Argument>,

    pub properties: Vec<PropertyValue>,

    pub role: Role,

    pub primary: bool,

    /// Type whose source declared this component (configuration class).
    pub declaring_type: Option<Idx>,
}

impl Definition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bean_class(mut self, ty: Idx) -> Self {
        self.bean_class = Some(ty);
        self
    }

    #[must_use]
    pub fn with_target_type(mut self, ty: Idx) -> Self {
        self.target_type = Some(ty);
        self
    }

    #[must_use]
    pub fn with_factory_bean(mut self, name: impl Into<String>) -> Self {
        self.factory_bean = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_factory_method(mut self, name: impl Into<String>) -> Self {
        self.factory_method = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_executable(mut self, exec: ExecId) -> Self {
        self.executable = Some(exec);
        self
    }

    #[must_use]
    pub fn with_parameter_types(mut self, types: &[Idx]) -> Self {
        self.parameter_types = Some(types.to_vec());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push(PropertyValue {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    #[must_use]
    pub fn with_declaring_type(mut self, ty: Idx) -> Self {
        self.declaring_type = Some(ty);
        self
    }

    /// The type the component is declared as: the target type, else the
    /// bean class.
    pub fn declared_type(&self) -> Option<Idx> {
        self.target_type.or(self.bean_class)
    }
}
