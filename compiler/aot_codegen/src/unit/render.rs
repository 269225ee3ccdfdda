//! Java text rendering of compilation units.

use aot_ir::{Idx, Pool};

use super::CompilationUnit;
use crate::code::{CodeBlock, TypeNames};
use crate::formatter::CONTEXT;

const INDENT: &str = "  ";

/// Line-oriented output buffer with indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            indent: 0,
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write one line at the current indentation. Empty lines carry no
    /// trailing whitespace.
    pub fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    /// Write a multi-line fragment, each line at the current indentation.
    pub fn write_lines(&mut self, text: &str) {
        for line in text.lines() {
            self.writeln(line);
        }
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    pub fn finish(self) -> String {
        self.output
    }
}

pub(super) fn render_unit(unit: &CompilationUnit, pool: &Pool) -> String {
    let header = class_header(unit);
    let refs = std::iter::once(&header)
        .chain(unit.blocks())
        .flat_map(|block| block.type_refs())
        .collect::<Vec<Idx>>();
    let names = TypeNames::resolve(pool, &unit.key.namespace, &unit.key.name, refs);

    let mut w = SourceWriter::new();
    if !unit.key.namespace.is_empty() {
        w.writeln(&format!("package {};", unit.key.namespace));
        w.newline();
    }
    if !names.imports().is_empty() {
        for import in names.imports() {
            w.writeln(&format!("import {import};"));
        }
        w.newline();
    }

    w.writeln(&format!("{} {{", header.to_source(&names)));
    w.indent();
    let mut first = true;
    if unit.is_root {
        w.writeln("@Override");
        w.writeln(&format!(
            "public void initialize({} {CONTEXT}) {{",
            names.name(Idx::APPLICATION_CONTEXT)
        ));
        w.indent();
        for statement in &unit.statements {
            w.write_lines(&statement.to_source(&names));
        }
        w.dedent();
        w.writeln("}");
        first = false;
    }
    for method in &unit.methods {
        if !first {
            w.newline();
        }
        first = false;
        let return_type = method
            .return_type
            .as_ref()
            .map_or_else(|| "void".to_owned(), |t| t.to_source(&names));
        w.writeln(&format!(
            "public static {return_type} {}({}) {{",
            method.name,
            method.params.to_source(&names)
        ));
        w.indent();
        for statement in &method.body {
            w.write_lines(&statement.to_source(&names));
        }
        w.dedent();
        w.writeln("}");
    }
    w.dedent();
    w.writeln("}");
    w.finish()
}

/// `public class X implements ApplicationContextInitializer<GenericApplicationContext>`
/// for the root, `public final class X` for satellites.
fn class_header(unit: &CompilationUnit) -> CodeBlock {
    if unit.is_root {
        let mut code = CodeBlock::of("public class ");
        code.push_str(&unit.key.name)
            .push_str(" implements ")
            .push_type(Idx::CONTEXT_INITIALIZER)
            .push_str("<")
            .push_type(Idx::APPLICATION_CONTEXT)
            .push_str(">");
        code
    } else {
        CodeBlock::of(&format!("public final class {}", unit.key.name))
    }
}
