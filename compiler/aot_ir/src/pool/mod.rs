//! Type pool.
//!
//! The pool owns every type and executable known to one compilation run.
//! Types are referenced by [`Idx`], executables by [`ExecId`].
//!
//! # Design
//!
//! - Well-known types are pre-interned at fixed indices (see [`Idx`])
//! - Arrays and parameterized types are interned, so equality is `Idx` equality
//! - Declared types are never deduplicated; the registry hands out one `Idx`
//!   per declaration and lookups by qualified name go through `by_name`

mod assign;
mod format;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{ExecId, Executable, ExecutableDef, FieldDef, Idx, Visibility};

/// The kind of a declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A declared class, interface or enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredType {
    /// Dotted namespace (`com.example`), empty for the default namespace.
    pub namespace: String,

    /// Simple name, without enclosing types.
    pub name: String,

    pub kind: TypeKind,

    pub visibility: Visibility,

    /// Enclosing type for nested declarations.
    pub enclosing: Option<Idx>,

    /// Direct superclass. `None` means `java.lang.Object`.
    pub superclass: Option<Idx>,

    /// Directly implemented (or extended, for interfaces) interfaces.
    pub interfaces: Vec<Idx>,

    /// For factory-object types: the type of the object they produce.
    pub produces: Option<Idx>,

    /// Enum constants, in declaration order.
    pub constants: Vec<String>,

    pub constructors: Vec<ExecId>,

    pub methods: Vec<ExecId>,

    pub fields: Vec<FieldDef>,
}

impl DeclaredType {
    fn new(namespace: &str, name: &str, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            kind,
            visibility: Visibility::Public,
            enclosing: None,
            superclass: None,
            interfaces: Vec::new(),
            produces: None,
            constants: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, TypeKind::Class)
    }

    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, TypeKind::Interface)
    }

    pub fn enumeration(namespace: &str, name: &str, constants: &[&str]) -> Self {
        let mut ty = Self::new(namespace, name, TypeKind::Enum);
        ty.superclass = Some(Idx::ENUM);
        ty.constants = constants.iter().map(|c| (*c).to_owned()).collect();
        ty
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Nest this type inside `outer`. The namespace must match the outer one.
    #[must_use]
    pub fn enclosed_in(mut self, outer: Idx) -> Self {
        self.enclosing = Some(outer);
        self
    }

    #[must_use]
    pub fn extends(mut self, superclass: Idx) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: Idx) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Mark this type as a factory object producing `produced`.
    #[must_use]
    pub fn producing(mut self, produced: Idx) -> Self {
        self.produces = Some(produced);
        self
    }
}

/// Data stored for each pool entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    /// Unused slot between the well-known and dynamic ranges.
    Reserved,
    Primitive,
    Declared(DeclaredType),
    /// Array of the component type.
    Array(Idx),
    /// A generic type applied to arguments (`List<String>`).
    Parameterized { raw: Idx, args: Vec<Idx> },
    /// A type variable with an optional upper bound.
    Variable { name: String, bound: Option<Idx> },
}

/// Owner of all types and executables for one compilation run.
#[derive(Clone, Debug)]
pub struct Pool {
    types: Vec<TypeData>,
    executables: Vec<Executable>,
    arrays: FxHashMap<Idx, Idx>,
    parameterized: FxHashMap<(Idx, Vec<Idx>), Idx>,
    by_name: FxHashMap<String, Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

const JAVA_LANG: &str = "java.lang";
const JAVA_UTIL: &str = "java.util";

impl Pool {
    /// Create a pool with every well-known type pre-interned.
    pub fn new() -> Self {
        let mut pool = Self {
            types: Vec::with_capacity(Idx::FIRST_DYNAMIC as usize * 2),
            executables: Vec::new(),
            arrays: FxHashMap::default(),
            parameterized: FxHashMap::default(),
            by_name: FxHashMap::default(),
        };

        for _ in 0..=Idx::VOID.raw() {
            pool.types.push(TypeData::Primitive);
        }

        let boxes = [
            ("Boolean", None),
            ("Byte", Some(Idx::NUMBER)),
            ("Short", Some(Idx::NUMBER)),
            ("Integer", Some(Idx::NUMBER)),
            ("Long", Some(Idx::NUMBER)),
            ("Float", Some(Idx::NUMBER)),
            ("Double", Some(Idx::NUMBER)),
            ("Character", None),
        ];
        for (name, superclass) in boxes {
            let mut ty = DeclaredType::class(JAVA_LANG, name);
            ty.superclass = superclass;
            pool.push_declared(ty);
        }

        pool.push_declared(DeclaredType::class(JAVA_LANG, "Object"));
        pool.push_declared(DeclaredType::class(JAVA_LANG, "String"));
        pool.push_declared(DeclaredType::class(JAVA_LANG, "Number"));
        pool.push_declared(DeclaredType::class(JAVA_LANG, "Class"));
        pool.push_declared(DeclaredType::class(JAVA_LANG, "Enum"));
        pool.push_declared(DeclaredType::interface(JAVA_UTIL, "Collection"));
        pool.push_declared(DeclaredType::interface(JAVA_UTIL, "List").implements(Idx::COLLECTION));
        pool.push_declared(DeclaredType::interface(JAVA_UTIL, "Set").implements(Idx::COLLECTION));
        pool.push_declared(DeclaredType::class(JAVA_UTIL, "Collections"));
        pool.push_declared(DeclaredType::class(JAVA_UTIL, "ArrayList").implements(Idx::LIST));

        pool.push_declared(DeclaredType::class(
            "org.springframework.context.support",
            "GenericApplicationContext",
        ));
        pool.push_declared(DeclaredType::interface(
            "org.springframework.context",
            "ApplicationContextInitializer",
        ));
        pool.push_declared(DeclaredType::class(
            "org.springframework.aot.beans.factory",
            "BeanDefinitionRegistrar",
        ));
        pool.push_declared(DeclaredType::class(
            "org.springframework.core",
            "ResolvableType",
        ));
        pool.push_declared(DeclaredType::class(
            "org.springframework.aot.context.event",
            "EventListenerMetadata",
        ));
        pool.push_declared(DeclaredType::class(
            "org.springframework.aot.context.event",
            "EventListenerRegistrar",
        ));

        debug_assert_eq!(pool.types.len(), Idx::WELL_KNOWN_COUNT as usize);

        while pool.types.len() < Idx::FIRST_DYNAMIC as usize {
            pool.types.push(TypeData::Reserved);
        }

        pool
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, data: TypeData) -> Idx {
        let idx = Idx::from_raw(self.types.len() as u32);
        self.types.push(data);
        idx
    }

    fn push_declared(&mut self, ty: DeclaredType) -> Idx {
        let idx = self.push(TypeData::Declared(ty));
        if let Some(qualified) = self.qualified_name(idx) {
            self.by_name.insert(qualified, idx);
        }
        idx
    }

    // === Construction ===

    /// Declare a new class, interface or enum.
    pub fn declare(&mut self, ty: DeclaredType) -> Idx {
        self.push_declared(ty)
    }

    /// Intern an array type.
    pub fn array(&mut self, component: Idx) -> Idx {
        if let Some(&idx) = self.arrays.get(&component) {
            return idx;
        }
        let idx = self.push(TypeData::Array(component));
        self.arrays.insert(component, idx);
        idx
    }

    /// Intern a parameterized type `raw<args..>`.
    pub fn parameterized(&mut self, raw: Idx, args: &[Idx]) -> Idx {
        let key = (raw, args.to_vec());
        if let Some(&idx) = self.parameterized.get(&key) {
            return idx;
        }
        let idx = self.push(TypeData::Parameterized {
            raw,
            args: args.to_vec(),
        });
        self.parameterized.insert(key, idx);
        idx
    }

    /// Create a type variable. Variables are never interned.
    pub fn type_var(&mut self, name: &str, bound: Option<Idx>) -> Idx {
        self.push(TypeData::Variable {
            name: name.to_owned(),
            bound,
        })
    }

    /// Add a constructor or method to a declared type.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_executable(&mut self, owner: Idx, def: ExecutableDef) -> ExecId {
        let id = ExecId::from_raw(self.executables.len() as u32);
        let is_constructor = matches!(def.kind, crate::ExecutableKind::Constructor);
        self.executables.push(Executable {
            owner,
            kind: def.kind,
            params: def.params,
            visibility: def.visibility,
            varargs: def.varargs,
        });
        if let Some(TypeData::Declared(ty)) = self.types.get_mut(owner.index()) {
            if is_constructor {
                ty.constructors.push(id);
            } else {
                ty.methods.push(id);
            }
        }
        id
    }

    /// Add a field to a declared type.
    pub fn add_field(&mut self, owner: Idx, field: FieldDef) {
        if let Some(TypeData::Declared(ty)) = self.types.get_mut(owner.index()) {
            ty.fields.push(field);
        }
    }

    // === Lookup ===

    /// Data stored for `idx`. Out-of-range indices read as reserved.
    #[inline]
    pub fn data(&self, idx: Idx) -> &TypeData {
        self.types.get(idx.index()).unwrap_or(&TypeData::Reserved)
    }

    #[inline]
    pub fn declared(&self, idx: Idx) -> Option<&DeclaredType> {
        match self.data(idx) {
            TypeData::Declared(ty) => Some(ty),
            _ => None,
        }
    }

    /// Look up a declared type by qualified name (`com.example.Outer.Inner`).
    pub fn lookup(&self, qualified: &str) -> Option<Idx> {
        self.by_name.get(qualified).copied()
    }

    #[inline]
    pub fn executable(&self, id: ExecId) -> Option<&Executable> {
        self.executables.get(id.index())
    }

    /// Declared constructors of `ty` (of its raw class when parameterized).
    pub fn constructors(&self, ty: Idx) -> &[ExecId] {
        self.declared(self.raw_class(ty))
            .map_or(&[], |d| d.constructors.as_slice())
    }

    /// Methods of `ty` and all its supertypes, nearest declarations first.
    pub fn methods(&self, ty: Idx) -> Vec<ExecId> {
        self.hierarchy(ty)
            .into_iter()
            .filter_map(|t| self.declared(t))
            .flat_map(|d| d.methods.iter().copied())
            .collect()
    }

    /// Field `name` of `ty` or its nearest supertype declaring it.
    pub fn field(&self, ty: Idx, name: &str) -> Option<(Idx, &FieldDef)> {
        self.hierarchy(ty).into_iter().find_map(|t| {
            self.declared(t)
                .and_then(|d| d.fields.iter().find(|f| f.name == name))
                .map(|f| (t, f))
        })
    }

    // === Structure ===

    /// The generic class behind a parameterized type, or the type itself.
    #[inline]
    pub fn raw_class(&self, ty: Idx) -> Idx {
        match self.data(ty) {
            TypeData::Parameterized { raw, .. } => *raw,
            _ => ty,
        }
    }

    #[inline]
    pub fn array_component(&self, ty: Idx) -> Option<Idx> {
        match self.data(ty) {
            TypeData::Array(component) => Some(*component),
            _ => None,
        }
    }

    /// Direct supertypes of a declared type, possibly parameterized.
    pub fn direct_supertypes(&self, ty: Idx) -> SmallVec<[Idx; 4]> {
        let mut out = SmallVec::new();
        if let Some(d) = self.declared(self.raw_class(ty)) {
            out.extend(d.superclass);
            out.extend(d.interfaces.iter().copied());
        }
        out
    }

    /// `ty`'s raw class and every raw supertype, breadth first, without
    /// duplicates. `Object` is only listed when declared explicitly.
    pub fn hierarchy(&self, ty: Idx) -> Vec<Idx> {
        let start = self.raw_class(ty);
        let mut seen = FxHashSet::default();
        let mut out = vec![start];
        seen.insert(start);
        let mut i = 0;
        while let Some(&current) = out.get(i) {
            for sup in self.direct_supertypes(current) {
                let raw = self.raw_class(sup);
                if seen.insert(raw) {
                    out.push(raw);
                }
            }
            i += 1;
        }
        out
    }

    /// Whether `ty` has `ancestor` (compared as raw classes) in its hierarchy.
    pub fn is_subclass_of(&self, ty: Idx, ancestor: Idx) -> bool {
        let ancestor = self.raw_class(ancestor);
        ancestor == Idx::OBJECT || self.hierarchy(ty).contains(&ancestor)
    }

    /// For factory-object types, the type of the object they produce.
    pub fn produced_type(&self, ty: Idx) -> Option<Idx> {
        self.hierarchy(ty)
            .into_iter()
            .find_map(|t| self.declared(t).and_then(|d| d.produces))
    }

    /// Element type of an array or collection type.
    ///
    /// Raw collections have `Object` elements.
    pub fn element_type(&self, ty: Idx) -> Option<Idx> {
        match self.data(ty) {
            TypeData::Array(component) => Some(*component),
            TypeData::Parameterized { raw, args } if self.is_subclass_of(*raw, Idx::COLLECTION) => {
                Some(args.first().copied().unwrap_or(Idx::OBJECT))
            }
            TypeData::Declared(_) if ty != Idx::OBJECT && self.is_subclass_of(ty, Idx::COLLECTION) => {
                Some(Idx::OBJECT)
            }
            _ => None,
        }
    }

    // === Names ===

    /// Namespace of a declared type (of the raw class or array component).
    pub fn namespace(&self, ty: Idx) -> Option<&str> {
        match self.data(ty) {
            TypeData::Declared(d) => Some(&d.namespace),
            TypeData::Array(component) => self.namespace(*component),
            TypeData::Parameterized { raw, .. } => self.namespace(*raw),
            _ => None,
        }
    }

    /// Simple name of a declared type.
    pub fn simple_name(&self, ty: Idx) -> Option<&str> {
        self.declared(self.raw_class(ty)).map(|d| d.name.as_str())
    }

    /// The outermost enclosing type, or `ty` itself for top-level types.
    pub fn top_level(&self, ty: Idx) -> Idx {
        let mut current = self.raw_class(ty);
        while let Some(outer) = self.declared(current).and_then(|d| d.enclosing) {
            current = outer;
        }
        current
    }

    /// Enclosing chain from the outermost type down to `ty` itself.
    pub fn enclosing_chain(&self, ty: Idx) -> SmallVec<[Idx; 4]> {
        let mut chain = SmallVec::new();
        let mut current = Some(self.raw_class(ty));
        while let Some(t) = current {
            chain.push(t);
            current = self.declared(t).and_then(|d| d.enclosing);
        }
        chain.reverse();
        chain
    }

    /// Name relative to the namespace, with enclosing types (`Outer.Inner`).
    pub fn nested_name(&self, ty: Idx) -> Option<String> {
        let mut out = String::new();
        for t in self.enclosing_chain(ty) {
            let d = self.declared(t)?;
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&d.name);
        }
        Some(out)
    }

    /// Fully-qualified source name (`com.example.Outer.Inner`).
    pub fn qualified_name(&self, ty: Idx) -> Option<String> {
        let nested = self.nested_name(ty)?;
        let namespace = self.namespace(ty)?;
        Some(qualify(namespace, &nested))
    }

    // === Accessibility ===

    /// Whether code in `namespace` may reference `ty`.
    ///
    /// Every enclosing level must be accessible; arrays and parameterized
    /// types require all their parts to be.
    pub fn is_accessible_from(&self, ty: Idx, namespace: &str) -> bool {
        match self.data(ty) {
            TypeData::Declared(_) => self.enclosing_chain(ty).into_iter().all(|t| {
                self.declared(t)
                    .map_or(true, |d| d.visibility.allows(&d.namespace, namespace))
            }),
            TypeData::Array(component) => self.is_accessible_from(*component, namespace),
            TypeData::Parameterized { raw, args } => {
                self.is_accessible_from(*raw, namespace)
                    && args.iter().all(|a| self.is_accessible_from(*a, namespace))
            }
            TypeData::Variable { .. } | TypeData::Primitive | TypeData::Reserved => true,
        }
    }

    /// The outermost type on `ty`'s enclosing chain that `namespace` may not
    /// reference.
    pub fn inaccessible_boundary(&self, ty: Idx, namespace: &str) -> Option<Idx> {
        self.enclosing_chain(ty).into_iter().find(|&t| {
            self.declared(t)
                .is_some_and(|d| !d.visibility.allows(&d.namespace, namespace))
        })
    }

    /// Whether code in `namespace` may invoke `exec` directly.
    pub fn is_executable_accessible_from(&self, exec: ExecId, namespace: &str) -> bool {
        let Some(e) = self.executable(exec) else {
            return false;
        };
        let owner_ns = self.namespace(e.owner).unwrap_or_default();
        self.is_accessible_from(e.owner, namespace)
            && e.visibility.allows(owner_ns, namespace)
            && e.params.iter().all(|&p| self.is_accessible_from(p, namespace))
    }
}

/// Join a namespace and a relative name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{namespace}.{name}")
    }
}
