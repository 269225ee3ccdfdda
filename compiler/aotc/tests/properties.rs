//! Property-based tests for unit placement and determinism.
//!
//! Random sequences of sample components are compiled and checked for:
//! 1. Idempotence: two runs over the same registry produce identical units
//! 2. Root placement: accessible components are registered in the root
//! 3. Delegation: every inaccessible component gets one satellite method
//!    and one delegating call

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use aot_ir::testing::Samples;
use aot_ir::{Definition, DefinitionRegistry, Value};
use aotc::{BootstrapCompiler, CompileOutput, GeneratorConfig};
use proptest::prelude::*;

const TEMPLATES: usize = 6;

/// Component built from template `kind`, and whether the root can reach it.
fn component(samples: &Samples, kind: usize, name: String) -> (Definition, bool) {
    match kind {
        0 => (Definition::new(name).with_bean_class(samples.simple_config), true),
        1 => (Definition::new(name).with_bean_class(samples.client), true),
        2 => (
            Definition::new(name)
                .with_bean_class(samples.number_holder)
                .with_argument(Value::Int(7)),
            true,
        ),
        3 => (
            Definition::new(name)
                .with_bean_class(samples.timeout)
                .with_argument(Value::from("30"))
                .with_argument(Value::from("DAYS")),
            true,
        ),
        4 => (
            Definition::new(name)
                .with_bean_class(samples.protected_config)
                .with_factory_method("anotherStringBean"),
            false,
        ),
        _ => (Definition::new(name).with_bean_class(samples.protected_inner), false),
    }
}

fn build(samples: &Samples, kinds: &[usize]) -> (DefinitionRegistry, Vec<(String, bool)>) {
    let mut expected = Vec::new();
    let registry = kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let name = format!("component{i}");
            let (def, accessible) = component(samples, kind, name.clone());
            expected.push((name, accessible));
            def
        })
        .collect();
    (registry, expected)
}

fn compile(samples: &Samples, registry: &DefinitionRegistry) -> CompileOutput {
    BootstrapCompiler::new(&samples.pool, GeneratorConfig::default())
        .compile(registry, &[])
        .unwrap()
}

proptest! {
    #[test]
    fn compilation_is_idempotent(kinds in prop::collection::vec(0..TEMPLATES, 0..12)) {
        let samples = Samples::new();
        let (registry, _) = build(&samples, &kinds);

        let first = compile(&samples, &registry);
        let second = compile(&samples, &registry);
        prop_assert_eq!(first.units, second.units);
        prop_assert_eq!(first.facts, second.facts);
    }

    #[test]
    fn accessible_components_stay_in_the_root(kinds in prop::collection::vec(0..TEMPLATES, 1..12)) {
        let samples = Samples::new();
        let (registry, expected) = build(&samples, &kinds);
        let output = compile(&samples, &registry);

        let root = &output.root().unwrap().source;
        for (name, accessible) in &expected {
            let literal = format!("BeanDefinitionRegistrar.of(\"{name}\",");
            let in_satellite = output.satellites().iter().any(|u| u.source.contains(&literal));
            prop_assert_eq!(root.contains(&literal), *accessible);
            prop_assert_eq!(in_satellite, !*accessible);
        }
    }

    #[test]
    fn inaccessible_components_are_delegated_once(kinds in prop::collection::vec(0..TEMPLATES, 1..12)) {
        let samples = Samples::new();
        let (registry, expected) = build(&samples, &kinds);
        let output = compile(&samples, &registry);

        let hidden = expected.iter().filter(|(_, accessible)| !accessible).count();
        let root = &output.root().unwrap().source;
        let delegations = root
            .matches("com.example.samples.visibility.ContextBootstrapInitializer.register")
            .count();
        prop_assert_eq!(delegations, hidden);

        let methods: usize = output
            .satellites()
            .iter()
            .map(|u| u.source.matches("public static void register").count())
            .sum();
        prop_assert_eq!(methods, hidden);
        prop_assert_eq!(output.satellites().len(), usize::from(hidden > 0));
    }
}
