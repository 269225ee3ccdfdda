//! End-to-end compilation of the reference scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use aot_diagnostic::ErrorCode;
use aot_ir::testing::{Samples, HIDDEN};
use aot_ir::{Definition, DefinitionRegistry, Value};
use aot_resolve::ResolveError;
use aotc::{
    BootstrapCompiler, CompileError, CompileOutput, EventListenerRequest, GeneratorConfig,
    ReflectionFlags,
};
use pretty_assertions::assert_eq;

fn compile(samples: &Samples, definitions: Vec<Definition>) -> Result<CompileOutput, CompileError> {
    compile_with_listeners(samples, definitions, &[])
}

fn compile_with_listeners(
    samples: &Samples,
    definitions: Vec<Definition>,
    listeners: &[EventListenerRequest],
) -> Result<CompileOutput, CompileError> {
    aotc::init_tracing();
    let registry: DefinitionRegistry = definitions.into_iter().collect();
    BootstrapCompiler::new(&samples.pool, GeneratorConfig::default()).compile(&registry, listeners)
}

#[test]
fn integer_literal_selects_the_integer_constructor() {
    let samples = Samples::new();
    let output = compile(
        &samples,
        vec![Definition::new("holder")
            .with_bean_class(samples.number_holder)
            .with_argument(Value::Int(42))],
    )
    .unwrap();

    assert_eq!(
        output.root().unwrap().source,
        "package com.example;

import com.example.samples.NumberHolder;
import org.springframework.aot.beans.factory.BeanDefinitionRegistrar;
import org.springframework.context.ApplicationContextInitializer;
import org.springframework.context.support.GenericApplicationContext;

public class ContextBootstrapInitializer implements ApplicationContextInitializer<GenericApplicationContext> {
  @Override
  public void initialize(GenericApplicationContext context) {
    BeanDefinitionRegistrar.of(\"holder\", NumberHolder.class).withConstructor(Integer.class)
        .instanceSupplier(() -> new NumberHolder(42)).register(context);
  }
}
"
    );
    assert!(output.satellites().is_empty());
}

#[test]
fn incompatible_argument_leaves_the_component_unresolved() {
    let samples = Samples::new();
    let output = compile(
        &samples,
        vec![Definition::new("holder")
            .with_bean_class(samples.number_holder)
            .with_argument(Value::Enum {
                ty: samples.locale,
                constant: "ENGLISH".into(),
            })],
    )
    .unwrap();

    assert_eq!(output.unresolved, vec!["holder".to_owned()]);
    assert_eq!(output.warnings[0].code, ErrorCode::W2001);
    assert!(!output.root().unwrap().source.contains("NumberHolder"));
    assert_eq!(output.facts.len(), 1);
    assert_eq!(output.facts[0].flags, ReflectionFlags::INSTANTIATE);
}

#[test]
fn factory_object_with_wrong_generic_is_fatal() {
    let samples = Samples::new();
    let err = compile(
        &samples,
        vec![Definition::new("holder")
            .with_bean_class(samples.string_holder_factory)
            .with_target_type(samples.holder_of_integer)],
    )
    .unwrap_err();

    let CompileError::Resolve(ResolveError::IncompatibleTargetType {
        expected, produced, ..
    }) = &err
    else {
        panic!("expected incompatible target type, got {err:?}");
    };
    assert_eq!(expected, "com.example.samples.Holder<java.lang.Integer>");
    assert_eq!(produced, "com.example.samples.Holder<java.lang.String>");
    assert_eq!(err.to_diagnostic().code, ErrorCode::E2002);
}

#[test]
fn inaccessible_factory_method_is_registered_through_a_satellite() {
    let samples = Samples::new();
    let output = compile(
        &samples,
        vec![Definition::new("anotherStringBean")
            .with_bean_class(samples.protected_config)
            .with_factory_method("anotherStringBean")],
    )
    .unwrap();

    let root = &output.root().unwrap().source;
    assert_eq!(
        root.matches("registerProtectedConfiguration_anotherStringBean(context);")
            .count(),
        1
    );
    assert!(root.contains(
        "    com.example.samples.visibility.ContextBootstrapInitializer\
         .registerProtectedConfiguration_anotherStringBean(context);\n"
    ));
    assert!(!root.contains("BeanDefinitionRegistrar.of("));

    let satellite = &output.unit(HIDDEN).unwrap().source;
    assert!(satellite.contains("public final class ContextBootstrapInitializer {"));
    assert!(satellite.contains(
        "  public static void registerProtectedConfiguration_anotherStringBean(GenericApplicationContext context) {\n    \
         BeanDefinitionRegistrar.of(\"anotherStringBean\", String.class)\
         .withFactoryMethod(ProtectedConfiguration.class, \"anotherStringBean\")\n        \
         .instanceSupplier(() -> ProtectedConfiguration.anotherStringBean()).register(context);\n  }\n"
    ));
}

#[test]
fn two_compatible_candidates_are_ambiguous() {
    let samples = Samples::new();
    let err = compile(
        &samples,
        vec![Definition::new("overloaded")
            .with_bean_class(samples.overloaded)
            .with_argument(Value::Int(1))],
    )
    .unwrap_err();

    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2001);
    assert_eq!(diagnostic.component.as_deref(), Some("overloaded"));
    assert_eq!(diagnostic.notes.len(), 2);
    assert!(diagnostic.notes.iter().any(|n| n.contains("(java.lang.Object)")));
    assert!(diagnostic.notes.iter().any(|n| n.contains("(java.lang.Number)")));
}

#[test]
fn reference_cycle_is_fatal() {
    let samples = Samples::new();
    let err = compile(
        &samples,
        vec![
            Definition::new("a")
                .with_bean_class(samples.number_holder)
                .with_argument(Value::Reference("b".into())),
            Definition::new("b")
                .with_bean_class(samples.number_holder)
                .with_argument(Value::Reference("a".into())),
        ],
    )
    .unwrap_err();
    assert_eq!(err.to_diagnostic().code, ErrorCode::E2003);
}

#[test]
fn listeners_across_namespaces_share_one_registrar() {
    let samples = Samples::new();
    let listeners = [
        EventListenerRequest::new("single", samples.listener, samples.on_startup),
        EventListenerRequest::new(
            "protectedEventListener",
            samples.hidden_listener,
            samples.on_hidden_event,
        ),
    ];
    let output = compile_with_listeners(
        &samples,
        vec![Definition::new("single").with_bean_class(samples.listener)],
        &listeners,
    )
    .unwrap();

    let root = &output.root().unwrap().source;
    assert_eq!(root.matches("context.registerBean(").count(), 1);
    assert!(root.contains("ContextBootstrapInitializer.getAllEventListenersMetadata()));"));
    assert!(root.contains("import org.springframework.aot.context.event.EventListenerMetadata;"));
    assert!(root.contains("import java.util.ArrayList;"));

    let satellite = &output.unit(HIDDEN).unwrap().source;
    assert!(satellite.contains("public static List<EventListenerMetadata> getEventListenersMetadata() {"));

    let listener_facts: Vec<_> = output
        .facts
        .iter()
        .filter(|r| r.flags.contains(ReflectionFlags::INVOKE_DECLARED_METHODS))
        .map(|r| r.ty)
        .collect();
    assert_eq!(listener_facts, vec![samples.listener, samples.hidden_listener]);
}
