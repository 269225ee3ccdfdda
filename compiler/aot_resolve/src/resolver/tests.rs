use aot_ir::testing::{Samples, SAMPLES};
use aot_ir::{DeclaredType, DefinitionRegistry, ExecutableDef};
use pretty_assertions::assert_eq;

use super::*;

fn resolve(samples: &Samples, def: &Definition) -> Result<Option<ExecId>, ResolveError> {
    let registry = DefinitionRegistry::new();
    ExecutableResolver::new(&samples.pool, &registry).resolve(def)
}

fn resolve_in(
    samples: &Samples,
    registry: &DefinitionRegistry,
    def: &Definition,
) -> Result<Option<ExecId>, ResolveError> {
    ExecutableResolver::new(&samples.pool, registry).resolve(def)
}

#[test]
fn explicit_executable_is_returned_without_search() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_executable(samples.number_holder_string)
        .with_argument(Value::Int(42));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_string)));
}

#[test]
fn integer_literal_selects_integer_constructor() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Int(42));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_integer)));
}

#[test]
fn incompatible_value_is_unresolved() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Enum {
            ty: samples.locale,
            constant: "ENGLISH".into(),
        });

    assert_eq!(resolve(&samples, &def), Ok(None));
}

#[test]
fn factory_object_producing_wrong_generic_is_fatal() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.string_holder_factory)
        .with_target_type(samples.holder_of_integer);

    let err = resolve(&samples, &def).unwrap_err();
    assert_eq!(
        err,
        ResolveError::IncompatibleTargetType {
            component: "holder".into(),
            expected: "com.example.samples.Holder<java.lang.Integer>".into(),
            factory_type: "com.example.samples.StringHolderFactory".into(),
            produced: "com.example.samples.Holder<java.lang.String>".into(),
        }
    );
}

#[test]
fn factory_object_producing_expected_type_resolves_its_constructor() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.string_holder_factory)
        .with_target_type(samples.holder_of_string);

    let exec = resolve(&samples, &def).unwrap().unwrap();
    assert_eq!(samples.pool.executable(exec).map(|e| e.owner), Some(samples.string_holder_factory));
}

/// `NumberHolderFactory<T extends Number>` producing `NumberHolder<T>`.
fn bounded_holder_factory(samples: &mut Samples) -> (Idx, Idx, ExecId) {
    let pool = &mut samples.pool;
    let holder = pool.declare(DeclaredType::class(SAMPLES, "GenericNumberHolder"));
    let t = pool.type_var("T", Some(Idx::NUMBER));
    let produced = pool.parameterized(holder, &[t]);
    let factory = pool.declare(
        DeclaredType::class(SAMPLES, "NumberHolderFactoryBean").producing(produced),
    );
    let ctor = pool.add_executable(factory, ExecutableDef::constructor(&[]));
    (holder, factory, ctor)
}

#[test]
fn factory_object_with_bounded_variable_accepts_type_within_bound() {
    let mut samples = Samples::new();
    let (holder, factory, ctor) = bounded_holder_factory(&mut samples);
    let target = samples.pool.parameterized(holder, &[Idx::BOXED_INT]);

    let def = Definition::new("numberHolder")
        .with_bean_class(factory)
        .with_target_type(target);
    assert_eq!(resolve(&samples, &def), Ok(Some(ctor)));
}

#[test]
fn factory_object_with_bounded_variable_rejects_type_outside_bound() {
    let mut samples = Samples::new();
    let (holder, factory, _) = bounded_holder_factory(&mut samples);
    let target = samples.pool.parameterized(holder, &[Idx::STRING]);

    let def = Definition::new("numberHolder")
        .with_bean_class(factory)
        .with_target_type(target);
    assert_eq!(
        resolve(&samples, &def),
        Err(ResolveError::IncompatibleTargetType {
            component: "numberHolder".into(),
            expected: "com.example.samples.GenericNumberHolder<java.lang.String>".into(),
            factory_type: "com.example.samples.NumberHolderFactoryBean".into(),
            produced: "com.example.samples.GenericNumberHolder<T>".into(),
        })
    );
}

#[test]
fn two_compatible_candidates_are_ambiguous() {
    let samples = Samples::new();
    let def = Definition::new("overloaded")
        .with_bean_class(samples.overloaded)
        .with_argument(Value::Int(1));

    match resolve(&samples, &def) {
        Err(ResolveError::AmbiguousExecutable {
            component,
            ty,
            candidates,
        }) => {
            assert_eq!(component, "overloaded");
            assert_eq!(ty, "com.example.samples.Overloaded");
            assert_eq!(
                candidates,
                vec![
                    "com.example.samples.Overloaded(java.lang.Object)".to_string(),
                    "com.example.samples.Overloaded(java.lang.Number)".to_string(),
                ]
            );
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn single_candidate_skips_value_inspection() {
    let samples = Samples::new();
    // The string is not a DataSource; the only constructor is still chosen.
    let def = Definition::new("client")
        .with_bean_class(samples.client)
        .with_argument(Value::from("not a data source"));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.client_ctor)));
}

#[test]
fn single_constructor_without_arguments_is_injected() {
    let samples = Samples::new();
    let def = Definition::new("client").with_bean_class(samples.client);

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.client_ctor)));
}

#[test]
fn explicit_parameter_types_select_the_matching_constructor() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_parameter_types(&[Idx::STRING])
        .with_argument(Value::from("text"));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_string)));
}

#[test]
fn static_factory_method_on_bean_class() {
    let samples = Samples::new();
    let def = Definition::new("anotherStringBean")
        .with_bean_class(samples.protected_config)
        .with_factory_method("anotherStringBean");

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.another_string_bean)));
}

#[test]
fn instance_factory_method_requires_factory_bean() {
    let samples = Samples::new();
    let registry: DefinitionRegistry = [Definition::new("simpleConfiguration")
        .with_bean_class(samples.simple_config)]
    .into_iter()
    .collect();

    let via_bean = Definition::new("stringBean")
        .with_factory_bean("simpleConfiguration")
        .with_factory_method("stringBean");
    assert_eq!(resolve_in(&samples, &registry, &via_bean), Ok(Some(samples.string_bean)));

    let as_static = Definition::new("stringBean")
        .with_bean_class(samples.simple_config)
        .with_factory_method("stringBean");
    assert_eq!(resolve_in(&samples, &registry, &as_static), Ok(None));
}

#[test]
fn inherited_static_with_same_name_is_ignored() {
    let mut samples = Samples::new();
    let base = samples.pool.declare(DeclaredType::interface(SAMPLES, "Factories"));
    samples.pool.add_executable(
        base,
        ExecutableDef::static_method("of", Idx::BOXED_INT, &[Idx::STRING]),
    );
    let dummy = samples
        .pool
        .declare(DeclaredType::class(SAMPLES, "DummySampleFactory").implements(base));
    let own = samples.pool.add_executable(
        dummy,
        ExecutableDef::static_method("of", Idx::BOXED_INT, &[Idx::BOXED_INT]),
    );

    let def = Definition::new("sample")
        .with_bean_class(dummy)
        .with_factory_method("of")
        .with_argument(Value::Int(42));

    assert_eq!(resolve(&samples, &def), Ok(Some(own)));
}

#[test]
fn private_constructors_are_never_candidates() {
    let mut samples = Samples::new();
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Guarded"));
    samples.pool.add_executable(
        ty,
        ExecutableDef::constructor(&[Idx::STRING]).with_visibility(Visibility::Private),
    );
    let public = samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[Idx::OBJECT]));

    let def = Definition::new("guarded")
        .with_bean_class(ty)
        .with_argument(Value::from("x"));
    assert_eq!(resolve(&samples, &def), Ok(Some(public)));
}

#[test]
fn named_reference_uses_the_referenced_type() {
    let samples = Samples::new();
    let registry: DefinitionRegistry = [Definition::new("answer")
        .with_bean_class(samples.simple_config)
        .with_factory_method("integerBean")]
    .into_iter()
    .collect();

    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Reference("answer".into()));

    assert_eq!(
        resolve_in(&samples, &registry, &def),
        Ok(Some(samples.number_holder_integer))
    );
}

#[test]
fn missing_reference_is_unknown_and_matches_anything() {
    let mut samples = Samples::new();
    let strings = samples.pool.array(Idx::STRING);
    let def = Definition::new("tags")
        .with_bean_class(samples.tags)
        .with_parameter_types(&[strings])
        .with_argument(Value::Reference("missing".into()));

    assert!(resolve(&samples, &def).unwrap().is_some());

    // With two candidates an unknown value matches both.
    let holder = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Reference("missing".into()));
    assert!(matches!(
        resolve(&samples, &holder),
        Err(ResolveError::AmbiguousExecutable { .. })
    ));
}

#[test]
fn nested_definition_uses_its_resolved_type() {
    let samples = Samples::new();
    // Declared as a String, but the factory method actually returns Integer.
    let inner = Definition::new("")
        .with_target_type(Idx::STRING)
        .with_bean_class(samples.simple_config)
        .with_factory_method("integerBean");
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::from(inner));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_integer)));
}

#[test]
fn nested_factory_object_is_unwrapped() {
    let mut samples = Samples::new();
    let int_factory = samples.pool.declare(
        DeclaredType::class(SAMPLES, "IntegerFactory").producing(Idx::BOXED_INT),
    );
    samples
        .pool
        .add_executable(int_factory, ExecutableDef::constructor(&[]));

    let inner = Definition::new("").with_bean_class(int_factory);
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::from(inner));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_integer)));
}

#[test]
fn unresolvable_nested_definition_leaves_parent_unresolved() {
    let samples = Samples::new();
    let inner = Definition::new("")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Enum {
            ty: samples.locale,
            constant: "ENGLISH".into(),
        });
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::from(inner));

    assert_eq!(resolve(&samples, &def), Ok(None));
}

#[test]
fn self_reference_is_a_cycle() {
    let samples = Samples::new();
    let a = Definition::new("a")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Reference("a".into()));
    let registry: DefinitionRegistry = [a.clone()].into_iter().collect();

    assert_eq!(
        resolve_in(&samples, &registry, &a),
        Err(ResolveError::CyclicReference {
            cycle: vec!["a".into(), "a".into()]
        })
    );
}

#[test]
fn transitive_reference_cycle_is_reported_with_members() {
    let samples = Samples::new();
    let a = Definition::new("a")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Reference("b".into()));
    let b = Definition::new("b")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Reference("a".into()));
    let registry: DefinitionRegistry = [a.clone(), b].into_iter().collect();

    assert_eq!(
        resolve_in(&samples, &registry, &a),
        Err(ResolveError::CyclicReference {
            cycle: vec!["a".into(), "b".into(), "a".into()]
        })
    );
}

#[test]
fn fixed_arity_wins_over_varargs() {
    let samples = Samples::new();
    let one = Definition::new("joiner")
        .with_bean_class(samples.joiner)
        .with_argument(Value::from("a"));
    assert_eq!(resolve(&samples, &one), Ok(Some(samples.joiner_single)));

    let two = Definition::new("joiner")
        .with_bean_class(samples.joiner)
        .with_argument(Value::from("a"))
        .with_argument(Value::from("b"));
    assert_eq!(resolve(&samples, &two), Ok(Some(samples.joiner_varargs)));
}

#[test]
fn element_tier_accepts_list_literal_for_array_parameter() {
    let mut samples = Samples::new();
    let strings = samples.pool.array(Idx::STRING);
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Labels"));
    let array_ctor = samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[strings]));
    samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[Idx::BOXED_INT]));

    let def = Definition::new("labels")
        .with_bean_class(ty)
        .with_argument(Value::List(vec![Value::from("a"), Value::from("b")]));
    assert_eq!(resolve(&samples, &def), Ok(Some(array_ctor)));

    let single = Definition::new("labels")
        .with_bean_class(ty)
        .with_argument(Value::from("a"));
    assert_eq!(resolve(&samples, &single), Ok(Some(array_ctor)));
}

#[test]
fn conversion_tier_accepts_enum_constant_names() {
    let mut samples = Samples::new();
    let ty = samples.pool.declare(DeclaredType::class(SAMPLES, "Unit"));
    let enum_ctor = samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[samples.chrono_unit]));
    samples
        .pool
        .add_executable(ty, ExecutableDef::constructor(&[Idx::CLASS]));

    let def = Definition::new("unit")
        .with_bean_class(ty)
        .with_argument(Value::from("DAYS"));
    assert_eq!(resolve(&samples, &def), Ok(Some(enum_ctor)));
}

#[test]
fn type_hint_overrides_inferred_type() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Argument::typed(Value::Null, Idx::STRING));

    assert_eq!(resolve(&samples, &def), Ok(Some(samples.number_holder_string)));
}

#[test]
fn null_without_hint_is_ambiguous_between_references() {
    let samples = Samples::new();
    let def = Definition::new("holder")
        .with_bean_class(samples.number_holder)
        .with_argument(Value::Null);

    assert!(matches!(
        resolve(&samples, &def),
        Err(ResolveError::AmbiguousExecutable { .. })
    ));
}
