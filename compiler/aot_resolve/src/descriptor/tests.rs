use aot_ir::testing::{Samples, SAMPLES};
use aot_ir::{DeclaredType, DefinitionRegistry, ExecutableDef, Visibility};
use pretty_assertions::assert_eq;

use super::*;

fn build(samples: &Samples, def: &Definition) -> Option<InstanceDescriptor> {
    let registry = DefinitionRegistry::new();
    DescriptorBuilder::new(&samples.pool, &registry)
        .build(def)
        .unwrap()
}

fn assert_positions_cover_params(samples: &Samples, descriptor: &InstanceDescriptor) {
    let params = samples
        .pool
        .executable(descriptor.executable)
        .map_or(0, |e| e.params.len());
    assert_eq!(descriptor.arity(), params);
    let mut indices: Vec<usize> = descriptor
        .arguments
        .iter()
        .map(|a| a.index)
        .chain(descriptor.injection_points.iter().map(|p| p.index))
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..params).collect::<Vec<_>>());
}

#[test]
fn parameters_without_values_become_injection_points() {
    let samples = Samples::new();
    let def = Definition::new("client").with_bean_class(samples.client);

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(descriptor.executable, samples.client_ctor);
    assert!(descriptor.arguments.is_empty());
    assert_eq!(
        descriptor.injection_points,
        vec![InjectionPoint {
            index: 0,
            ty: samples.data_source
        }]
    );
    assert_positions_cover_params(&samples, &descriptor);
}

#[test]
fn literal_arguments_fill_their_positions() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Int(42));

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(
        descriptor.arguments,
        vec![ArgumentSlot {
            index: 0,
            ty: Idx::BOXED_INT,
            value: ArgumentValue::Literal(Value::Int(42)),
        }]
    );
    assert!(descriptor.injection_points.is_empty());
}

#[test]
fn unresolved_definition_has_no_descriptor() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Enum {
            ty: samples.locale,
            constant: "ENGLISH".into(),
        });

    assert_eq!(build(&samples, &def), None);
}

#[test]
fn private_executable_has_no_descriptor() {
    let mut samples = Samples::new();
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Secret"));
    let ctor = samples.pool.add_executable(
        ty,
        ExecutableDef::constructor(&[]).with_visibility(Visibility::Private),
    );
    let def = Definition::new("secret")
        .with_bean_class(ty)
        .with_executable(ctor);

    assert_eq!(build(&samples, &def), None);
}

#[test]
fn fatal_resolution_errors_propagate() {
    let samples = Samples::new();
    let registry = DefinitionRegistry::new();
    let def = Definition::new("overloaded")
        .with_bean_class(samples.overloaded)
        .with_argument(Value::Int(1));

    let result = DescriptorBuilder::new(&samples.pool, &registry).build(&def);
    assert!(matches!(result, Err(ResolveError::AmbiguousExecutable { .. })));
}

#[test]
fn variadic_values_fold_into_one_array() {
    let mut samples = Samples::new();
    let strings = samples.pool.array(Idx::STRING);
    let def = Definition::new("joiner")
        .with_bean_class(samples.joiner)
        .with_argument(Value::from("a"))
        .with_argument(Value::from("test"));

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(descriptor.executable, samples.joiner_varargs);
    assert_eq!(
        descriptor.arguments,
        vec![ArgumentSlot {
            index: 0,
            ty: strings,
            value: ArgumentValue::Literal(Value::Array {
                ty: strings,
                elements: vec![Value::from("a"), Value::from("test")],
            }),
        }]
    );
    assert_positions_cover_params(&samples, &descriptor);
}

#[test]
fn single_value_for_array_parameter_is_wrapped() {
    let mut samples = Samples::new();
    let strings = samples.pool.array(Idx::STRING);
    let def = Definition::new("tags")
        .with_bean_class(samples.tags)
        .with_argument(Value::from("a"));

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(
        descriptor.arguments[0].value,
        ArgumentValue::Literal(Value::Array {
            ty: strings,
            elements: vec![Value::from("a")],
        })
    );
}

#[test]
fn list_literal_for_set_parameter_becomes_a_set() {
    let mut samples = Samples::new();
    let set_of_string = samples.pool.parameterized(Idx::SET, &[Idx::STRING]);
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Roles"));
    samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[set_of_string]));
    let def = Definition::new("roles")
        .with_bean_class(ty)
        .with_argument(Value::List(vec![Value::from("admin")]));

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(
        descriptor.arguments[0].value,
        ArgumentValue::Literal(Value::Set(vec![Value::from("admin")]))
    );
}

#[test]
fn string_values_are_converted_for_typed_parameters() {
    let samples = Samples::new();
    let def = Definition::new("timeout")
        .with_bean_class(samples.timeout)
        .with_argument(Value::from("30"))
        .with_argument(Value::from("DAYS"));

    let descriptor = build(&samples, &def).unwrap();
    let values: Vec<_> = descriptor.arguments.iter().map(|a| a.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            ArgumentValue::Literal(Value::Long(30)),
            ArgumentValue::Literal(Value::Enum {
                ty: samples.chrono_unit,
                constant: "DAYS".into(),
            }),
        ]
    );
}

#[test]
fn references_and_inner_components() {
    let samples = Samples::new();
    let registry: DefinitionRegistry = [Definition::new("dataSource").with_bean_class(samples.data_source)]
        .into_iter()
        .collect();
    let by_reference = Definition::new("client")
        .with_bean_class(samples.client)
        .with_argument(Value::Reference("dataSource".into()));
    let mut builder = DescriptorBuilder::new(&samples.pool, &registry);

    let descriptor = builder.build(&by_reference).unwrap().unwrap();
    assert_eq!(
        descriptor.arguments[0].value,
        ArgumentValue::Reference("dataSource".into())
    );

    let inner = Definition::new("")
        .with_bean_class(samples.simple_config)
        .with_factory_method("integerBean");
    let nested = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::from(inner));
    let descriptor = builder.build(&nested).unwrap().unwrap();
    match &descriptor.arguments[0].value {
        ArgumentValue::Nested(inner) => {
            assert_eq!(inner.executable, samples.integer_bean);
            assert_eq!(inner.bean_type, Idx::BOXED_INT);
        }
        other => panic!("expected nested descriptor, got {other:?}"),
    }
}

#[test]
fn inner_component_inside_collection_is_not_described() {
    let mut samples = Samples::new();
    let list_of_int = samples.pool.parameterized(Idx::LIST, &[Idx::BOXED_INT]);
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Numbers"));
    samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[list_of_int]));
    let inner = Definition::new("")
        .with_bean_class(samples.simple_config)
        .with_factory_method("integerBean");
    let def = Definition::new("numbers")
        .with_bean_class(ty)
        .with_argument(Value::List(vec![Value::from(inner)]));

    assert_eq!(build(&samples, &def), None);
}

#[test]
fn properties_resolve_setters_then_fields() {
    let samples = Samples::new();
    let def = Definition::new("sample")
        .with_bean_class(samples.property_sample)
        .with_property("name", "test")
        .with_property("counter", 42)
        .with_property("unknown", true);

    let descriptor = build(&samples, &def).unwrap();
    let handles: Vec<_> = descriptor.properties.iter().map(|p| p.handle.clone()).collect();
    assert_eq!(
        handles,
        vec![
            Some(PropertyHandle::Setter(samples.set_name)),
            Some(PropertyHandle::Field {
                owner: samples.property_sample,
                name: "counter".into()
            }),
            None,
        ]
    );
}

#[test]
fn declaring_scope_defaults_to_executable_owner() {
    let samples = Samples::new();
    let def = Definition::new("inner").with_bean_class(samples.protected_inner);

    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(descriptor.declaring_type, samples.protected_inner);
    assert_eq!(
        descriptor.scope_path.as_slice(),
        &[samples.outer, samples.protected_inner]
    );

    let def = def.with_declaring_type(samples.outer);
    let descriptor = build(&samples, &def).unwrap();
    assert_eq!(descriptor.declaring_type, samples.outer);
    assert_eq!(descriptor.scope_path.as_slice(), &[samples.outer]);
}

#[test]
fn factory_method_bean_type_falls_back_to_return_type() {
    let samples = Samples::new();
    let registry: DefinitionRegistry = [Definition::new("simpleConfiguration")
        .with_bean_class(samples.simple_config)]
    .into_iter()
    .collect();
    let def = Definition::new("stringBean")
        .with_factory_bean("simpleConfiguration")
        .with_factory_method("stringBean")
        .with_role(Role::Infrastructure)
        .with_primary(true);

    let descriptor = DescriptorBuilder::new(&samples.pool, &registry)
        .build(&def)
        .unwrap()
        .unwrap();
    assert_eq!(descriptor.bean_type, Idx::STRING);
    assert_eq!(descriptor.declaring_type, samples.simple_config);
    assert_eq!(descriptor.role, Role::Infrastructure);
    assert!(descriptor.primary);
}

#[test]
fn setter_names() {
    assert_eq!(setter_name("name"), "setName");
    assert_eq!(setter_name("url"), "setUrl");
    assert_eq!(setter_name(""), "set");
}
