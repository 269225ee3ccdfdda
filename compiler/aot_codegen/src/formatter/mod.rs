//! Value Formatter.
//!
//! Renders argument values, type literals and inline instantiations as
//! [`CodeBlock`] fragments. Types stay symbolic so the unit the fragment
//! lands in decides on imports.

use aot_ir::{ExecId, ExecutableKind, Idx, Pool, TypeData, Value};
use aot_resolve::{ArgumentSlot, ArgumentValue, InstanceDescriptor};

use crate::code::CodeBlock;

/// Name of the context variable in generated registration code.
pub const CONTEXT: &str = "context";

/// Formats values and types for one run.
#[derive(Copy, Clone)]
pub struct ValueFormatter<'a> {
    pool: &'a Pool,
}

impl<'a> ValueFormatter<'a> {
    pub fn new(pool: &'a Pool) -> Self {
        Self { pool }
    }

    /// Literal expression for `value`.
    pub fn format(&self, value: &Value) -> CodeBlock {
        match value {
            Value::Null => CodeBlock::of("null"),
            Value::Bool(b) => CodeBlock::of(&b.to_string()),
            Value::Byte(n) => CodeBlock::of(&n.to_string()),
            Value::Short(n) => CodeBlock::of(&n.to_string()),
            Value::Int(n) => CodeBlock::of(&n.to_string()),
            Value::Long(n) => CodeBlock::of(&n.to_string()),
            Value::Float(n) => CodeBlock::of(&float_literal(n.to_string())),
            Value::Double(n) => CodeBlock::of(&float_literal(n.to_string())),
            Value::Char(c) => CodeBlock::of(&format!("'{}'", escape_char(*c))),
            Value::String(s) => CodeBlock::of(&string_literal(s)),
            Value::Array { ty, elements } => self.array(*ty, elements),
            Value::List(elements) => self.collection(Idx::LIST, "emptyList", elements),
            Value::Set(elements) => self.collection(Idx::SET, "emptySet", elements),
            Value::Enum { ty, constant } => {
                let mut code = CodeBlock::of_type(self.erasure(*ty));
                code.push_str(".").push_str(constant);
                code
            }
            Value::Class(ty) => self.class_literal(*ty),
            Value::Reference(name) => {
                CodeBlock::of(&format!("{CONTEXT}.getBean({})", string_literal(name)))
            }
            // Inner definitions only reach here when no descriptor describes
            // them; look the component up by type instead.
            Value::Definition(def) => match def.declared_type() {
                Some(ty) => {
                    let mut code = CodeBlock::of(&format!("{CONTEXT}.getBean("));
                    code.push_code(&self.class_literal(ty)).push_str(")");
                    code
                }
                None => CodeBlock::of("null"),
            },
        }
    }

    /// Expression passed at one resolved parameter position.
    pub fn format_argument(&self, slot: &ArgumentSlot) -> CodeBlock {
        match &slot.value {
            ArgumentValue::Literal(value) => self.format(value),
            ArgumentValue::Reference(name) => {
                let mut code = CodeBlock::of(&format!("{CONTEXT}.getBean({}, ", string_literal(name)));
                code.push_code(&self.class_literal(slot.ty)).push_str(")");
                code
            }
            ArgumentValue::Nested(inner) => self.format_nested(inner),
        }
    }

    /// Inline instantiation of an inner component. Injection points are
    /// looked up from the context by type.
    pub fn format_nested(&self, descriptor: &InstanceDescriptor) -> CodeBlock {
        let args = self.arguments(descriptor, |index| {
            let ty = descriptor
                .injection_points
                .iter()
                .find(|p| p.index == index)
                .map_or(Idx::OBJECT, |p| p.ty);
            let mut code = CodeBlock::of(&format!("{CONTEXT}.getBean("));
            code.push_code(&self.class_literal(ty)).push_str(")");
            code
        });
        self.instantiation(descriptor.executable, &args)
    }

    /// Argument list of `descriptor` in parameter order; `injected` renders
    /// the positions left to the container.
    pub fn arguments(
        &self,
        descriptor: &InstanceDescriptor,
        injected: impl Fn(usize) -> CodeBlock,
    ) -> CodeBlock {
        let args = (0..descriptor.arity()).map(|index| {
            descriptor
                .arguments
                .iter()
                .find(|slot| slot.index == index)
                .map_or_else(|| injected(index), |slot| self.format_argument(slot))
        });
        CodeBlock::join(args, ", ")
    }

    /// Call creating an instance through `exec`: `new T(..)`, `T.m(..)` or
    /// `context.getBean(T.class).m(..)`.
    pub fn instantiation(&self, exec: ExecId, args: &CodeBlock) -> CodeBlock {
        let mut code = CodeBlock::new();
        let Some(executable) = self.pool.executable(exec) else {
            return code;
        };
        let owner = self.pool.raw_class(executable.owner);
        match &executable.kind {
            ExecutableKind::Constructor => {
                code.push_str("new ").push_type(owner);
            }
            ExecutableKind::Method {
                name,
                is_static: true,
                ..
            } => {
                code.push_type(owner).push_str(".").push_str(name);
            }
            ExecutableKind::Method { name, .. } => {
                code.push_str(&format!("{CONTEXT}.getBean("))
                    .push_code(&self.class_literal(owner))
                    .push_str(").")
                    .push_str(name);
            }
        }
        code.push_str("(").push_code(args).push_str(")");
        code
    }

    /// `T.class` for the erasure of `ty`.
    pub fn class_literal(&self, ty: Idx) -> CodeBlock {
        let mut code = CodeBlock::of_type(self.erasure(ty));
        code.push_str(".class");
        code
    }

    /// Class literals of the parameter types of `exec`, comma separated.
    pub fn format_parameter_types(&self, exec: ExecId) -> CodeBlock {
        let params = self
            .pool
            .executable(exec)
            .map(|e| e.params.as_slice())
            .unwrap_or_default();
        CodeBlock::join(params.iter().map(|&p| self.class_literal(p)), ", ")
    }

    /// Type a component is registered as: a class literal, or a
    /// `ResolvableType` when the type carries generics.
    pub fn format_bean_type(&self, ty: Idx) -> CodeBlock {
        match self.pool.data(ty) {
            TypeData::Parameterized { raw, args } => {
                let nested = args
                    .iter()
                    .any(|&a| matches!(self.pool.data(a), TypeData::Parameterized { .. }));
                let mut code = CodeBlock::of_type(Idx::RESOLVABLE_TYPE);
                code.push_str(".forClassWithGenerics(")
                    .push_code(&self.class_literal(*raw));
                for &arg in args {
                    code.push_str(", ");
                    if nested {
                        code.push_code(&self.resolvable_type(arg));
                    } else {
                        code.push_code(&self.class_literal(arg));
                    }
                }
                code.push_str(")");
                code
            }
            _ => self.class_literal(ty),
        }
    }

    fn resolvable_type(&self, ty: Idx) -> CodeBlock {
        if let TypeData::Parameterized { .. } = self.pool.data(ty) {
            return self.format_bean_type(ty);
        }
        let mut code = CodeBlock::of_type(Idx::RESOLVABLE_TYPE);
        code.push_str(".forClass(")
            .push_code(&self.class_literal(ty))
            .push_str(")");
        code
    }

    /// The type as it exists at run time: raw classes for parameterized
    /// types, the bound (or `Object`) for type variables.
    pub fn erasure(&self, ty: Idx) -> Idx {
        match self.pool.data(ty) {
            TypeData::Parameterized { raw, .. } => *raw,
            TypeData::Variable { bound, .. } => bound.map_or(Idx::OBJECT, |b| self.erasure(b)),
            _ => ty,
        }
    }

    fn array(&self, ty: Idx, elements: &[Value]) -> CodeBlock {
        let mut code = CodeBlock::of("new ");
        match self.pool.array_component(ty) {
            Some(component) => {
                code.push_type(self.erasure(component)).push_str("[]");
            }
            None => {
                code.push_type(self.erasure(ty));
            }
        }
        if elements.is_empty() {
            code.push_str(" {}");
            return code;
        }
        code.push_str(" { ")
            .push_code(&CodeBlock::join(elements.iter().map(|e| self.format(e)), ", "))
            .push_str(" }");
        code
    }

    fn collection(&self, ty: Idx, empty: &str, elements: &[Value]) -> CodeBlock {
        if elements.is_empty() {
            let mut code = CodeBlock::of_type(Idx::COLLECTIONS);
            code.push_str(".").push_str(empty).push_str("()");
            return code;
        }
        let mut code = CodeBlock::of_type(ty);
        code.push_str(".of(")
            .push_code(&CodeBlock::join(elements.iter().map(|e| self.format(e)), ", "))
            .push_str(")");
        code
    }
}

/// Java string literal with escapes.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            _ => out.push_str(&escape_char_in_string(c)),
        }
    }
    out.push('"');
    out
}

fn escape_char_in_string(c: char) -> String {
    match c {
        '\\' => "\\\\".to_owned(),
        '\n' => "\\n".to_owned(),
        '\r' => "\\r".to_owned(),
        '\t' => "\\t".to_owned(),
        c if c.is_control() => format!("\\u{:04x}", u32::from(c)),
        c => c.to_string(),
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".to_owned(),
        c => escape_char_in_string(c),
    }
}

/// Whole numbers keep a fractional part so they stay floating-point.
fn float_literal(text: String) -> String {
    if text.chars().all(|c| c.is_ascii_digit() || c == '-') {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
