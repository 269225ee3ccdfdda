//! Human-readable rendering of types and executables, for diagnostics.

use std::fmt::Write;

use super::{Pool, TypeData};
use crate::{ExecId, ExecutableKind, Idx};

impl Pool {
    /// Fully-qualified rendering: `com.example.Holder<java.lang.Integer>`.
    pub fn format_type(&self, ty: Idx) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: Idx) {
        if let Some(name) = ty.primitive_name() {
            out.push_str(name);
            return;
        }
        match self.data(ty) {
            TypeData::Declared(_) => {
                out.push_str(&self.qualified_name(ty).unwrap_or_default());
            }
            TypeData::Array(component) => {
                self.write_type(out, *component);
                out.push_str("[]");
            }
            TypeData::Parameterized { raw, args } => {
                self.write_type(out, *raw);
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, *arg);
                }
                out.push('>');
            }
            TypeData::Variable { name, .. } => out.push_str(name),
            TypeData::Primitive | TypeData::Reserved => {
                let _ = write!(out, "{ty:?}");
            }
        }
    }

    /// Executable signature: `com.example.Sample(java.lang.Integer)` for
    /// constructors, `com.example.Config.stringBean(java.lang.String...)` for
    /// methods.
    pub fn signature(&self, exec: ExecId) -> String {
        let Some(e) = self.executable(exec) else {
            return format!("{exec:?}");
        };
        let mut out = self.format_type(e.owner);
        if let ExecutableKind::Method { name, .. } = &e.kind {
            out.push('.');
            out.push_str(name);
        }
        out.push('(');
        let last = e.params.len().saturating_sub(1);
        for (i, &param) in e.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match self.array_component(param) {
                Some(component) if e.varargs && i == last => {
                    self.write_type(&mut out, component);
                    out.push_str("...");
                }
                _ => self.write_type(&mut out, param),
            }
        }
        out.push(')');
        out
    }
}
