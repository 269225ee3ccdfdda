//! Code blocks and per-unit type naming.
//!
//! Generated code is assembled as [`CodeBlock`]s: text interleaved with
//! references to pool types and to other generated units. How a type is
//! spelled depends on the unit the block lands in, so references stay
//! symbolic until [`TypeNames`] resolves them when the unit is rendered.

use aot_ir::{qualify, Idx, Pool, TypeData};
use rustc_hash::FxHashSet;

const JAVA_LANG: &str = "java.lang";

/// One piece of a code block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Text(String),
    /// A pool type, spelled per unit.
    Type(Idx),
    /// Another generated unit, referenced by namespace and name.
    Unit { namespace: String, name: String },
}

/// Text with symbolic type references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CodeBlock {
    segments: Vec<Segment>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block holding only `text`.
    pub fn of(text: &str) -> Self {
        let mut block = Self::new();
        block.push_str(text);
        block
    }

    /// A block holding one type reference.
    pub fn of_type(ty: Idx) -> Self {
        let mut block = Self::new();
        block.push_type(ty);
        block
    }

    pub fn push_str(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_owned()));
        }
        self
    }

    pub fn push_type(&mut self, ty: Idx) -> &mut Self {
        self.segments.push(Segment::Type(ty));
        self
    }

    pub fn push_unit(&mut self, namespace: &str, name: &str) -> &mut Self {
        self.segments.push(Segment::Unit {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        });
        self
    }

    pub fn push_code(&mut self, other: &CodeBlock) -> &mut Self {
        for segment in &other.segments {
            match segment {
                Segment::Text(text) => {
                    self.push_str(text);
                }
                other => self.segments.push(other.clone()),
            }
        }
        self
    }

    /// Concatenate `blocks` with `separator` between them.
    pub fn join(blocks: impl IntoIterator<Item = CodeBlock>, separator: &str) -> Self {
        let mut joined = Self::new();
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                joined.push_str(separator);
            }
            joined.push_code(&block);
        }
        joined
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Pool types referenced by the block, in order of appearance.
    pub fn type_refs(&self) -> impl Iterator<Item = Idx> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Type(ty) => Some(*ty),
            _ => None,
        })
    }

    /// Render the block with the spelling decided by `names`.
    pub fn to_source(&self, names: &TypeNames<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Type(ty) => out.push_str(&names.name(*ty)),
                Segment::Unit { namespace, name } => {
                    out.push_str(&names.unit_name(namespace, name));
                }
            }
        }
        out
    }
}

/// How types are spelled inside one unit, and which imports that needs.
///
/// Top-level types are claimed by simple name in order of first
/// reference. A type whose simple name is already claimed, or equals the
/// unit's own name, stays fully qualified. `java.lang` and same-namespace
/// types are referenced by simple name without an import.
pub struct TypeNames<'p> {
    pool: &'p Pool,
    namespace: String,
    /// Top-level types spelled by their simple name.
    simple: FxHashSet<Idx>,
    /// Fully-qualified imports, sorted.
    imports: Vec<String>,
}

impl<'p> TypeNames<'p> {
    pub fn resolve(
        pool: &'p Pool,
        namespace: &str,
        unit_name: &str,
        refs: impl IntoIterator<Item = Idx>,
    ) -> Self {
        let mut top_levels = Vec::new();
        for ty in refs {
            collect_top_levels(pool, ty, &mut top_levels);
        }

        let mut claimed: FxHashSet<&str> = FxHashSet::default();
        claimed.insert(unit_name);
        let mut simple = FxHashSet::default();
        let mut imports = Vec::new();
        for ty in top_levels {
            let Some(declared) = pool.declared(ty) else {
                continue;
            };
            if !claimed.insert(declared.name.as_str()) {
                continue;
            }
            simple.insert(ty);
            if declared.namespace != namespace && declared.namespace != JAVA_LANG {
                imports.push(qualify(&declared.namespace, &declared.name));
            }
        }
        imports.sort_unstable();
        imports.dedup();

        Self {
            pool,
            namespace: namespace.to_owned(),
            simple,
            imports,
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Source spelling of `ty`.
    pub fn name(&self, ty: Idx) -> String {
        match self.pool.data(ty) {
            TypeData::Primitive => ty.primitive_name().unwrap_or("void").to_owned(),
            TypeData::Declared(_) => {
                let name = if self.simple.contains(&self.pool.top_level(ty)) {
                    self.pool.nested_name(ty)
                } else {
                    self.pool.qualified_name(ty)
                };
                name.unwrap_or_default()
            }
            TypeData::Array(component) => format!("{}[]", self.name(*component)),
            TypeData::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(|&a| self.name(a)).collect();
                format!("{}<{}>", self.name(*raw), args.join(", "))
            }
            TypeData::Variable { name, .. } => name.clone(),
            TypeData::Reserved => self.pool.format_type(ty),
        }
    }

    /// Spelling of a generated unit: simple within its own namespace,
    /// qualified everywhere else.
    pub fn unit_name(&self, namespace: &str, name: &str) -> String {
        if namespace == self.namespace {
            name.to_owned()
        } else {
            qualify(namespace, name)
        }
    }
}

fn collect_top_levels(pool: &Pool, ty: Idx, out: &mut Vec<Idx>) {
    match pool.data(ty) {
        TypeData::Declared(_) => {
            let top = pool.top_level(ty);
            if !out.contains(&top) {
                out.push(top);
            }
        }
        TypeData::Array(component) => collect_top_levels(pool, *component, out),
        TypeData::Parameterized { raw, args } => {
            collect_top_levels(pool, *raw, out);
            for &arg in args {
                collect_top_levels(pool, arg, out);
            }
        }
        TypeData::Variable { .. } | TypeData::Primitive | TypeData::Reserved => {}
    }
}

#[cfg(test)]
mod tests;
