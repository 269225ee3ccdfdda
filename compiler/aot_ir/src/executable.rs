//! Constructors, methods and fields of declared types.

use crate::Idx;

/// Handle to an executable stored in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ExecId(u32);

impl ExecId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared accessibility of a type or member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Accessible from every namespace.
    #[default]
    Public,
    /// Accessible from the declaring namespace (and subclasses, which
    /// generated code never is).
    Protected,
    /// Accessible from the declaring namespace only.
    Package,
    /// Accessible from the declaring type only.
    Private,
}

impl Visibility {
    /// Whether code living in `from` may reference something with this
    /// visibility that was declared in `declared_in`.
    #[inline]
    pub fn allows(self, declared_in: &str, from: &str) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::Protected | Visibility::Package => declared_in == from,
            Visibility::Private => false,
        }
    }
}

/// What an executable is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExecutableKind {
    Constructor,
    Method {
        name: String,
        is_static: bool,
        return_type: Idx,
    },
}

/// A constructor or method, with exact parameter types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Executable {
    /// The type declaring this executable.
    pub owner: Idx,
    pub kind: ExecutableKind,
    pub params: Vec<Idx>,
    pub visibility: Visibility,
    /// Last parameter is variadic (its declared type is an array).
    pub varargs: bool,
}

impl Executable {
    #[inline]
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, ExecutableKind::Constructor)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.kind, ExecutableKind::Method { is_static: true, .. })
    }

    /// Method name, `None` for constructors.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ExecutableKind::Method { name, .. } => Some(name),
            ExecutableKind::Constructor => None,
        }
    }

    /// Type of the value this executable produces.
    ///
    /// Constructors produce their owner.
    #[inline]
    pub fn return_type(&self) -> Idx {
        match &self.kind {
            ExecutableKind::Method { return_type, .. } => *return_type,
            ExecutableKind::Constructor => self.owner,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether `count` arguments can be passed positionally.
    pub fn accepts_arity(&self, count: usize) -> bool {
        if self.varargs {
            count + 1 >= self.params.len()
        } else {
            count == self.params.len()
        }
    }
}

/// Definition used to add an executable to a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExecutableDef {
    pub(crate) kind: ExecutableKind,
    pub(crate) params: Vec<Idx>,
    pub(crate) visibility: Visibility,
    pub(crate) varargs: bool,
}

impl ExecutableDef {
    pub fn constructor(params: &[Idx]) -> Self {
        Self {
            kind: ExecutableKind::Constructor,
            params: params.to_vec(),
            visibility: Visibility::Public,
            varargs: false,
        }
    }

    /// An instance method.
    pub fn method(name: impl Into<String>, return_type: Idx, params: &[Idx]) -> Self {
        Self {
            kind: ExecutableKind::Method {
                name: name.into(),
                is_static: false,
                return_type,
            },
            params: params.to_vec(),
            visibility: Visibility::Public,
            varargs: false,
        }
    }

    pub fn static_method(name: impl Into<String>, return_type: Idx, params: &[Idx]) -> Self {
        Self {
            kind: ExecutableKind::Method {
                name: name.into(),
                is_static: true,
                return_type,
            },
            params: params.to_vec(),
            visibility: Visibility::Public,
            varargs: false,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the last parameter as variadic.
    #[must_use]
    pub fn varargs(mut self) -> Self {
        self.varargs = !self.params.is_empty();
        self
    }
}

/// A field of a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: String,
    pub ty: Idx,
    pub visibility: Visibility,
    pub is_static: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
            is_static: false,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}
