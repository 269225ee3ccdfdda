//! Compilation units and the unit registry.
//!
//! A run produces one root unit, the entry-point initializer, and lazily
//! created satellite units, one per namespace whose members the root cannot
//! reference. Units collect statements and static methods while the
//! emitter runs and are rendered to Java source exactly once, when the
//! registry is finalized.

mod render;

use aot_ir::{qualify, Idx, Pool};
use rustc_hash::FxHashMap;

use crate::code::CodeBlock;
use crate::formatter::CONTEXT;

/// Identity of a generated unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitKey {
    pub namespace: String,
    pub name: String,
}

impl UnitKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// A `public static` method of a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    /// `None` for `void`.
    pub return_type: Option<CodeBlock>,
    pub params: CodeBlock,
    /// Complete statements, possibly spanning several lines.
    pub body: Vec<CodeBlock>,
}

/// An in-progress generated unit.
#[derive(Clone, Debug)]
pub struct CompilationUnit {
    key: UnitKey,
    is_root: bool,
    /// Body of `initialize`, root only.
    statements: Vec<CodeBlock>,
    methods: Vec<MethodDecl>,
}

impl CompilationUnit {
    pub fn new(key: UnitKey, is_root: bool) -> Self {
        Self {
            key,
            is_root,
            statements: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn key(&self) -> &UnitKey {
        &self.key
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn statements(&self) -> &[CodeBlock] {
        &self.statements
    }

    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.methods.is_empty()
    }

    /// Append a statement to the main registration sequence.
    pub fn add_statement(&mut self, statement: CodeBlock) {
        self.statements.push(statement);
    }

    /// Add a method named after `base`, suffixed `_2`, `_3`... when the
    /// name is taken. Returns the name actually used.
    pub fn add_method(
        &mut self,
        base: &str,
        return_type: Option<CodeBlock>,
        params: CodeBlock,
        body: Vec<CodeBlock>,
    ) -> String {
        let name = self.unique_method_name(base);
        self.methods.push(MethodDecl {
            name: name.clone(),
            return_type,
            params,
            body,
        });
        name
    }

    /// Add a `void` method taking the application context.
    pub fn add_registration_method(&mut self, base: &str, body: Vec<CodeBlock>) -> String {
        self.add_method(base, None, context_param(), body)
    }

    fn unique_method_name(&self, base: &str) -> String {
        if self.method(base).is_none() {
            return base.to_owned();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| self.method(candidate).is_none())
            .unwrap_or_else(|| base.to_owned())
    }

    /// Every code block of the unit.
    fn blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.statements.iter().chain(self.methods.iter().flat_map(|m| {
            m.return_type
                .iter()
                .chain(std::iter::once(&m.params))
                .chain(m.body.iter())
        }))
    }

    /// Java source of the unit.
    pub fn render(&self, pool: &Pool) -> String {
        render::render_unit(self, pool)
    }
}

/// `GenericApplicationContext context`.
pub fn context_param() -> CodeBlock {
    let mut code = CodeBlock::of_type(Idx::APPLICATION_CONTEXT);
    code.push_str(" ").push_str(CONTEXT);
    code
}

/// Final output of one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub key: UnitKey,
    pub source: String,
}

/// Root unit plus lazily created satellites, keyed by namespace.
#[derive(Clone, Debug)]
pub struct UnitRegistry {
    root: CompilationUnit,
    satellites: Vec<CompilationUnit>,
    by_namespace: FxHashMap<String, usize>,
}

impl UnitRegistry {
    /// Registry whose root unit is `name` in `namespace`. Satellites share
    /// the unit name.
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            root: CompilationUnit::new(UnitKey::new(namespace, name), true),
            satellites: Vec::new(),
            by_namespace: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &CompilationUnit {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut CompilationUnit {
        &mut self.root
    }

    pub fn root_key(&self) -> &UnitKey {
        &self.root.key
    }

    /// Unit hosting code for `namespace`, created on first use.
    pub fn unit_mut(&mut self, namespace: &str) -> &mut CompilationUnit {
        if namespace == self.root.key.namespace {
            return &mut self.root;
        }
        let index = match self.by_namespace.get(namespace) {
            Some(&index) => index,
            None => {
                let key = UnitKey::new(namespace, self.root.key.name.clone());
                tracing::debug!(unit = %key.qualified_name(), "creating satellite unit");
                self.satellites.push(CompilationUnit::new(key, false));
                self.by_namespace
                    .insert(namespace.to_owned(), self.satellites.len() - 1);
                self.satellites.len() - 1
            }
        };
        &mut self.satellites[index]
    }

    pub fn get(&self, namespace: &str) -> Option<&CompilationUnit> {
        if namespace == self.root.key.namespace {
            return Some(&self.root);
        }
        self.by_namespace
            .get(namespace)
            .map(|&index| &self.satellites[index])
    }

    /// Root first, then satellites in creation order.
    pub fn units(&self) -> impl Iterator<Item = &CompilationUnit> {
        std::iter::once(&self.root).chain(self.satellites.iter())
    }

    pub fn satellite_count(&self) -> usize {
        self.satellites.len()
    }

    /// Render every unit. Consumes the registry: units are finalized once.
    pub fn finalize(self, pool: &Pool) -> Vec<GeneratedUnit> {
        std::iter::once(self.root)
            .chain(self.satellites)
            .map(|unit| GeneratedUnit {
                source: unit.render(pool),
                key: unit.key,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
