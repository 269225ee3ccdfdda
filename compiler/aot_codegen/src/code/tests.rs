use aot_ir::testing::{Samples, HIDDEN, ROOT, SAMPLES};
use aot_ir::DeclaredType;
use pretty_assertions::assert_eq;

use super::*;

const UNIT: &str = "ContextBootstrapInitializer";

fn render(pool: &Pool, namespace: &str, block: &CodeBlock) -> (String, Vec<String>) {
    let names = TypeNames::resolve(pool, namespace, UNIT, block.type_refs());
    (block.to_source(&names), names.imports().to_vec())
}

#[test]
fn adjacent_text_is_merged() {
    let mut block = CodeBlock::of("a");
    block.push_str("b").push_type(Idx::STRING).push_str("c").push_str("");
    assert_eq!(
        block.segments(),
        &[
            Segment::Text("ab".into()),
            Segment::Type(Idx::STRING),
            Segment::Text("c".into()),
        ]
    );
}

#[test]
fn join_inserts_separators() {
    let block = CodeBlock::join(
        [CodeBlock::of("a"), CodeBlock::of_type(Idx::STRING), CodeBlock::of("b")],
        ", ",
    );
    let pool = Pool::new();
    assert_eq!(render(&pool, ROOT, &block).0, "a, String, b");
    assert!(CodeBlock::join([], ", ").is_empty());
}

#[test]
fn java_lang_and_same_namespace_need_no_import() {
    let samples = Samples::new();
    let mut block = CodeBlock::of_type(Idx::BOXED_INT);
    block.push_str(" ").push_type(samples.client);

    let (source, imports) = render(&samples.pool, SAMPLES, &block);
    assert_eq!(source, "Integer Client");
    assert!(imports.is_empty());
}

#[test]
fn other_namespaces_are_imported_and_sorted() {
    let samples = Samples::new();
    let mut block = CodeBlock::of_type(samples.client);
    block
        .push_str(" ")
        .push_type(Idx::LIST)
        .push_str(" ")
        .push_type(samples.chrono_unit);

    let (source, imports) = render(&samples.pool, ROOT, &block);
    assert_eq!(source, "Client List ChronoUnit");
    assert_eq!(
        imports,
        vec![
            "com.example.samples.Client".to_owned(),
            "java.time.temporal.ChronoUnit".to_owned(),
            "java.util.List".to_owned(),
        ]
    );
}

#[test]
fn conflicting_simple_names_stay_qualified() {
    let mut samples = Samples::new();
    let other_client = samples
        .pool
        .declare(DeclaredType::class("com.example.other", "Client"));
    let own_name = samples.pool.declare(DeclaredType::class(HIDDEN, UNIT));
    let mut block = CodeBlock::of_type(samples.client);
    block
        .push_str(" ")
        .push_type(other_client)
        .push_str(" ")
        .push_type(own_name);

    let (source, imports) = render(&samples.pool, ROOT, &block);
    assert_eq!(
        source,
        "Client com.example.other.Client com.example.samples.visibility.ContextBootstrapInitializer"
    );
    assert_eq!(imports, vec!["com.example.samples.Client".to_owned()]);
}

#[test]
fn nested_types_import_their_top_level_type() {
    let samples = Samples::new();
    let block = CodeBlock::of_type(samples.protected_inner);

    let (source, imports) = render(&samples.pool, ROOT, &block);
    assert_eq!(source, "Outer.ProtectedInner");
    assert_eq!(imports, vec!["com.example.samples.visibility.Outer".to_owned()]);
}

#[test]
fn composite_types_render_every_part() {
    let mut samples = Samples::new();
    let strings = samples.pool.array(Idx::STRING);
    let ints = samples.pool.array(Idx::INT);
    let list_of_holders = samples.pool.parameterized(Idx::LIST, &[samples.holder_of_string]);
    let t = samples.pool.type_var("T", None);
    let block = CodeBlock::join(
        [strings, ints, list_of_holders, t]
            .into_iter()
            .map(CodeBlock::of_type),
        " ",
    );

    let (source, imports) = render(&samples.pool, ROOT, &block);
    assert_eq!(source, "String[] int[] List<Holder<String>> T");
    assert_eq!(
        imports,
        vec![
            "com.example.samples.Holder".to_owned(),
            "java.util.List".to_owned()
        ]
    );
}

#[test]
fn units_are_simple_only_in_their_own_namespace() {
    let pool = Pool::new();
    let mut block = CodeBlock::new();
    block
        .push_unit(ROOT, UNIT)
        .push_str(" ")
        .push_unit(HIDDEN, UNIT);

    let (source, imports) = render(&pool, ROOT, &block);
    assert_eq!(
        source,
        "ContextBootstrapInitializer com.example.samples.visibility.ContextBootstrapInitializer"
    );
    assert!(imports.is_empty());
}
