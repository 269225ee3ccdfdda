//! Visibility-Aware Code Emitter.
//!
//! Transcribes instance descriptors into registration statements and
//! decides which unit hosts each one. A statement that only references
//! types and members accessible from the root namespace goes into the
//! root's `initialize` sequence. Otherwise the statement is written into a
//! satellite method of the unit owning the inaccessible namespace, and the
//! root gets one delegating call.
//!
//! # Scope chain
//!
//! Every inaccessible type or member the statement references contributes
//! its namespace, in order of discovery (declaring type first). The last
//! namespace hosts the statement; each earlier one gets a method that
//! delegates to the next, and the root calls the first.
//!
//! Statements keep the order of the descriptors within every unit.

mod listeners;

use aot_ir::{ExecutableKind, Idx, Pool, Role, TypeData, Value};
use aot_resolve::{ArgumentValue, InstanceDescriptor, PropertyHandle};
use tracing::debug;

use crate::code::CodeBlock;
use crate::formatter::{string_literal, ValueFormatter, CONTEXT};
use crate::reflect::{Member, ReflectionFacts, ReflectionFlags};
use crate::unit::UnitRegistry;

pub use listeners::EventListenerRequest;

/// Writes registration code for one run into a unit registry, recording
/// reflection facts along the way.
pub struct BootstrapEmitter<'a> {
    pool: &'a Pool,
    formatter: ValueFormatter<'a>,
    units: &'a mut UnitRegistry,
    facts: &'a mut ReflectionFacts,
    root_namespace: String,
}

impl<'a> BootstrapEmitter<'a> {
    pub fn new(pool: &'a Pool, units: &'a mut UnitRegistry, facts: &'a mut ReflectionFacts) -> Self {
        let root_namespace = units.root_key().namespace.clone();
        Self {
            pool,
            formatter: ValueFormatter::new(pool),
            units,
            facts,
            root_namespace,
        }
    }

    /// Emit every descriptor, in order.
    #[tracing::instrument(level = "debug", skip_all, fields(components = descriptors.len()))]
    pub fn emit(&mut self, descriptors: &[InstanceDescriptor]) {
        for descriptor in descriptors {
            self.emit_component(descriptor);
        }
    }

    /// Emit the registration of one component.
    pub fn emit_component(&mut self, descriptor: &InstanceDescriptor) {
        let statement = self.registration(descriptor);
        let chain = self.scope_chain(descriptor);
        self.record_facts(descriptor);

        let Some((host, path)) = chain.split_last() else {
            debug!(component = %descriptor.name, "registered in root unit");
            self.units.root_mut().add_statement(statement);
            return;
        };

        let base = self.satellite_method_name(descriptor);
        let mut callee = host.clone();
        let mut method = self
            .units
            .unit_mut(host)
            .add_registration_method(&base, vec![statement]);
        debug!(component = %descriptor.name, unit = %host, %method, "registered in satellite unit");

        for namespace in path.iter().rev() {
            let call = self.delegation(&callee, &method);
            method = self
                .units
                .unit_mut(namespace)
                .add_registration_method(&base, vec![call]);
            callee = namespace.clone();
        }
        let call = self.delegation(&callee, &method);
        self.units.root_mut().add_statement(call);
    }

    /// `BeanDefinitionRegistrar.of(..)..register(context);` for `descriptor`.
    pub fn registration(&self, descriptor: &InstanceDescriptor) -> CodeBlock {
        let f = self.formatter;
        let mut code = CodeBlock::of_type(Idx::BEAN_REGISTRAR);
        code.push_str(".of(")
            .push_str(&string_literal(&descriptor.name))
            .push_str(", ")
            .push_code(&f.format_bean_type(descriptor.bean_type))
            .push_str(")");

        if let Some(executable) = self.pool.executable(descriptor.executable) {
            let params = f.format_parameter_types(descriptor.executable);
            match &executable.kind {
                ExecutableKind::Constructor => {
                    if !params.is_empty() {
                        code.push_str(".withConstructor(")
                            .push_code(&params)
                            .push_str(")");
                    }
                }
                ExecutableKind::Method { name, .. } => {
                    code.push_str(".withFactoryMethod(")
                        .push_code(&f.class_literal(executable.owner))
                        .push_str(", ")
                        .push_str(&string_literal(name));
                    if !params.is_empty() {
                        code.push_str(", ").push_code(&params);
                    }
                    code.push_str(")");
                }
            }
        }

        code.push_str("\n    .instanceSupplier(")
            .push_code(&self.instance_supplier(descriptor))
            .push_str(")");
        if let Some(customizer) = customizer(descriptor) {
            code.push_str(".customize(").push_str(&customizer).push_str(")");
        }
        code.push_str(&format!(".register({CONTEXT});"));
        code
    }

    /// `() -> ..`, or a supplier reading injection points from the
    /// container-provided attributes.
    fn instance_supplier(&self, descriptor: &InstanceDescriptor) -> CodeBlock {
        let f = self.formatter;
        let args = f.arguments(descriptor, |index| {
            CodeBlock::of(&format!("attributes.get({index})"))
        });
        let call = f.instantiation(descriptor.executable, &args);
        if descriptor.injection_points.is_empty() {
            let mut code = CodeBlock::of("() -> ");
            code.push_code(&call);
            return code;
        }
        let mut code = CodeBlock::of(&format!(
            "(instanceContext) -> instanceContext.create({CONTEXT}, (attributes) -> "
        ));
        code.push_code(&call).push_str(")");
        code
    }

    /// Namespaces of the unit chain hosting `descriptor`, empty when the
    /// root can reference everything.
    pub fn scope_chain(&self, descriptor: &InstanceDescriptor) -> Vec<String> {
        let mut chain = Vec::new();
        self.require_type(descriptor.declaring_type, &mut chain);
        self.require_descriptor(descriptor, &mut chain);
        chain
    }

    fn require_descriptor(&self, descriptor: &InstanceDescriptor, chain: &mut Vec<String>) {
        if let Some(executable) = self.pool.executable(descriptor.executable) {
            self.require_type(executable.owner, chain);
            let owner_ns = self.pool.namespace(executable.owner).unwrap_or_default();
            if !executable.visibility.allows(owner_ns, &self.root_namespace) {
                push_unique(chain, owner_ns);
            }
            for &param in &executable.params {
                self.require_type(param, chain);
            }
        }
        self.require_type(descriptor.bean_type, chain);
        for slot in &descriptor.arguments {
            match &slot.value {
                ArgumentValue::Literal(value) => self.require_value(value, chain),
                ArgumentValue::Nested(inner) => self.require_descriptor(inner, chain),
                ArgumentValue::Reference(_) => {}
            }
        }
    }

    fn require_type(&self, ty: Idx, chain: &mut Vec<String>) {
        match self.pool.data(ty) {
            TypeData::Declared(_) => {
                if let Some(boundary) = self.pool.inaccessible_boundary(ty, &self.root_namespace) {
                    push_unique(chain, self.pool.namespace(boundary).unwrap_or_default());
                }
            }
            TypeData::Array(component) => self.require_type(*component, chain),
            TypeData::Parameterized { raw, args } => {
                self.require_type(*raw, chain);
                for &arg in args {
                    self.require_type(arg, chain);
                }
            }
            TypeData::Variable { bound, .. } => {
                if let Some(bound) = bound {
                    self.require_type(*bound, chain);
                }
            }
            TypeData::Primitive | TypeData::Reserved => {}
        }
    }

    fn require_value(&self, value: &Value, chain: &mut Vec<String>) {
        match value {
            Value::Enum { ty, .. } | Value::Class(ty) => self.require_type(*ty, chain),
            Value::Array { ty, elements } => {
                self.require_type(*ty, chain);
                for element in elements {
                    self.require_value(element, chain);
                }
            }
            Value::List(elements) | Value::Set(elements) => {
                for element in elements {
                    self.require_value(element, chain);
                }
            }
            _ => {}
        }
    }

    /// `registerOuter_Inner` for constructors, `registerType_method` for
    /// factory methods.
    pub fn satellite_method_name(&self, descriptor: &InstanceDescriptor) -> String {
        let Some(executable) = self.pool.executable(descriptor.executable) else {
            return "register".to_owned();
        };
        match &executable.kind {
            ExecutableKind::Constructor => {
                let nested = self.pool.nested_name(executable.owner).unwrap_or_default();
                format!("register{}", nested.replace('.', "_"))
            }
            ExecutableKind::Method { name, .. } => {
                let owner = self.pool.simple_name(executable.owner).unwrap_or_default();
                format!("register{owner}_{name}")
            }
        }
    }

    /// `Unit.method(context);`
    fn delegation(&self, namespace: &str, method: &str) -> CodeBlock {
        let mut code = CodeBlock::new();
        code.push_unit(namespace, &self.units.root_key().name)
            .push_str(".")
            .push_str(method)
            .push_str(&format!("({CONTEXT});"));
        code
    }

    /// Members the generated statement relies on without invoking them.
    fn record_facts(&mut self, descriptor: &InstanceDescriptor) {
        if let Some(executable) = self.pool.executable(descriptor.executable) {
            if !executable.is_constructor() && !executable.is_static() {
                self.facts.record(
                    self.pool.raw_class(executable.owner),
                    [Member::Method(descriptor.executable)],
                    ReflectionFlags::QUERY_DECLARED_METHODS,
                );
            }
        }
        for property in &descriptor.properties {
            match &property.handle {
                Some(PropertyHandle::Setter(id)) => {
                    let owner = self
                        .pool
                        .executable(*id)
                        .map_or(descriptor.bean_type, |e| e.owner);
                    self.facts.record(
                        self.pool.raw_class(owner),
                        [Member::Method(*id)],
                        ReflectionFlags::INVOKE_DECLARED_METHODS,
                    );
                }
                Some(PropertyHandle::Field { owner, name }) => {
                    self.facts.record(
                        self.pool.raw_class(*owner),
                        [Member::Field(name.clone())],
                        ReflectionFlags::DECLARED_FIELDS,
                    );
                }
                None => debug!(property = %property.name, "no member for property"),
            }
        }
        for slot in &descriptor.arguments {
            if let ArgumentValue::Nested(inner) = &slot.value {
                self.record_facts(inner);
            }
        }
    }
}

/// `(bd) -> ..` applying role and primary flag, if either is set.
fn customizer(descriptor: &InstanceDescriptor) -> Option<String> {
    let mut calls = Vec::new();
    match descriptor.role {
        Role::Application => {}
        Role::Infrastructure => calls.push("bd.setRole(2)"),
        Role::Synthetic => calls.push("bd.setSynthetic(true)"),
    }
    if descriptor.primary {
        calls.push("bd.setPrimary(true)");
    }
    match calls.as_slice() {
        [] => None,
        [single] => Some(format!("(bd) -> {single}")),
        many => Some(format!("(bd) -> {{ {}; }}", many.join("; "))),
    }
}

fn push_unique(chain: &mut Vec<String>, namespace: &str) {
    if !chain.iter().any(|n| n == namespace) {
        chain.push(namespace.to_owned());
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
