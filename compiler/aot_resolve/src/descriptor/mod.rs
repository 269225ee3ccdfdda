//! Instance descriptors.
//!
//! An [`InstanceDescriptor`] is the complete recipe for building one
//! component: the resolved executable, what to pass at every parameter
//! position, the properties to set afterwards, and where the component was
//! declared. Descriptors are built once per definition and only read by the
//! code generator.
//!
//! Every parameter position is covered exactly once, either by an
//! [`ArgumentSlot`] (a value from the definition) or by an
//! [`InjectionPoint`] (resolved by the container at run time).

use aot_ir::{Argument, Definition, ExecId, Idx, Pool, Registry, Role, Value, Visibility};
use smallvec::SmallVec;
use tracing::debug;

use crate::convert::convert_string;
use crate::resolver::{ExecutableResolver, Tier};
use crate::stack::ensure_sufficient_stack;
use crate::ResolveError;

/// What is passed at one parameter position.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    /// A literal, already adapted to the parameter type.
    Literal(Value),
    /// Another component, looked up by name.
    Reference(String),
    /// An inner component instantiated in place.
    Nested(Box<InstanceDescriptor>),
}

/// A parameter position satisfied by a value of the definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentSlot {
    pub index: usize,
    /// Declared parameter type.
    pub ty: Idx,
    pub value: ArgumentValue,
}

/// A parameter position the container resolves at run time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InjectionPoint {
    pub index: usize,
    pub ty: Idx,
}

/// The member a property is written through.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyHandle {
    Setter(ExecId),
    Field { owner: Idx, name: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    /// `None` when neither a setter nor a field was found.
    pub handle: Option<PropertyHandle>,
    pub value: Value,
}

/// Resolved, complete recipe for one component.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceDescriptor {
    /// Component name, empty for inner components.
    pub name: String,

    /// Type the component is registered as, possibly parameterized.
    pub bean_type: Idx,

    /// Constructor or factory method creating the instance.
    pub executable: ExecId,

    /// Positions covered by definition values, in index order.
    pub arguments: Vec<ArgumentSlot>,

    /// Positions left to the container, in index order.
    pub injection_points: Vec<InjectionPoint>,

    pub properties: Vec<PropertyDescriptor>,

    /// Type whose source declared the component.
    pub declaring_type: Idx,

    /// Enclosing chain of the declaring type, outermost first.
    pub scope_path: SmallVec<[Idx; 4]>,

    pub role: Role,

    pub primary: bool,
}

impl InstanceDescriptor {
    /// Number of parameter positions the descriptor covers.
    pub fn arity(&self) -> usize {
        self.arguments.len() + self.injection_points.len()
    }
}

/// Builds descriptors through one resolver, shared across a run.
pub struct DescriptorBuilder<'a, R: Registry + ?Sized> {
    resolver: ExecutableResolver<'a, R>,
}

impl<'a, R: Registry + ?Sized> DescriptorBuilder<'a, R> {
    pub fn new(pool: &'a Pool, registry: &'a R) -> Self {
        Self {
            resolver: ExecutableResolver::new(pool, registry),
        }
    }

    #[inline]
    fn pool(&self) -> &'a Pool {
        self.resolver.pool()
    }

    /// Build the descriptor of `def`.
    ///
    /// `Ok(None)` when no executable matches, when the executable is
    /// private, or when a nested component cannot be described: the
    /// component then has to be registered reflectively.
    #[tracing::instrument(level = "debug", skip_all, fields(component = %def.name))]
    pub fn build(&mut self, def: &Definition) -> Result<Option<InstanceDescriptor>, ResolveError> {
        let Some(exec) = self.resolver.resolve(def)? else {
            return Ok(None);
        };
        let pool = self.pool();
        let Some(executable) = pool.executable(exec) else {
            return Ok(None);
        };
        if executable.visibility == Visibility::Private {
            debug!("private executable");
            return Ok(None);
        }
        if def
            .arguments
            .iter()
            .any(|a| a.value.elements().is_some_and(|els| els.iter().any(Value::contains_definition)))
        {
            debug!("inner component inside a collection");
            return Ok(None);
        }

        let Some(arguments) = self.fold_varargs(exec, &def.arguments)? else {
            debug!("inner component passed as a variadic element");
            return Ok(None);
        };

        let mut slots = Vec::with_capacity(arguments.len());
        let mut injection_points = Vec::new();
        for (index, &ty) in executable.params.iter().enumerate() {
            let Some(arg) = arguments.get(index) else {
                injection_points.push(InjectionPoint { index, ty });
                continue;
            };
            let value = match &arg.value {
                Value::Reference(name) => ArgumentValue::Reference(name.clone()),
                Value::Definition(inner) => {
                    match ensure_sufficient_stack(|| self.build(inner))? {
                        Some(nested) => ArgumentValue::Nested(Box::new(nested)),
                        None => {
                            debug!(index, "inner component cannot be described");
                            return Ok(None);
                        }
                    }
                }
                _ => ArgumentValue::Literal(self.adapt(arg, ty)),
            };
            slots.push(ArgumentSlot { index, ty, value });
        }

        let bean_type = def.target_type.unwrap_or_else(|| {
            if def.factory_method.is_some() {
                executable.return_type()
            } else {
                def.bean_class.unwrap_or(executable.owner)
            }
        });
        let declaring_type = def.declaring_type.unwrap_or(executable.owner);
        let properties = def
            .properties
            .iter()
            .map(|p| PropertyDescriptor {
                name: p.name.clone(),
                handle: self.property_handle(bean_type, &p.name),
                value: p.value.clone(),
            })
            .collect();

        Ok(Some(InstanceDescriptor {
            name: def.name.clone(),
            bean_type,
            executable: exec,
            arguments: slots,
            injection_points,
            properties,
            declaring_type,
            scope_path: pool.enclosing_chain(declaring_type),
            role: def.role,
            primary: def.primary,
        }))
    }

    /// Fold trailing variadic values into one array argument.
    ///
    /// `None` when an inner component would end up inside the array.
    fn fold_varargs(
        &mut self,
        exec: ExecId,
        args: &[Argument],
    ) -> Result<Option<Vec<Argument>>, ResolveError> {
        let pool = self.pool();
        let Some(executable) = pool.executable(exec) else {
            return Ok(Some(args.to_vec()));
        };
        let Some(&array) = executable.params.last() else {
            return Ok(Some(args.to_vec()));
        };
        let fixed = executable.params.len() - 1;
        if !executable.varargs || args.len() < fixed {
            return Ok(Some(args.to_vec()));
        }
        let rest = &args[fixed..];
        if let [single] = rest {
            let types = self.resolver.argument_types(std::slice::from_ref(single))?;
            if types
                .first()
                .is_some_and(|t| self.resolver.accepts(array, t, Tier::Exact))
            {
                return Ok(Some(args.to_vec()));
            }
        }
        if rest.iter().any(|a| a.value.contains_definition()) {
            return Ok(None);
        }
        let component = pool.array_component(array).unwrap_or(Idx::OBJECT);
        let elements = rest.iter().map(|a| self.adapt(a, component)).collect();
        let mut folded = args[..fixed].to_vec();
        folded.push(Argument::from(Value::Array {
            ty: array,
            elements,
        }));
        Ok(Some(folded))
    }

    /// Adapt a literal to the parameter it matched: wrap single elements,
    /// re-shape collection literals and apply string conversions.
    fn adapt(&self, arg: &Argument, param: Idx) -> Value {
        let pool = self.pool();
        let value = &arg.value;
        let ty = arg.type_hint.or_else(|| value.literal_type());
        if ty.map_or(true, |t| pool.is_assignable(param, t)) {
            return value.clone();
        }
        if let Some(element) = pool.element_type(param) {
            if ty.is_some_and(|t| pool.is_assignable(element, t)) {
                return container(pool, param, vec![value.clone()]);
            }
            if let Some(elements) = value.elements() {
                return container(pool, param, elements.to_vec());
            }
        }
        if let Value::String(text) = value {
            if let Some(converted) = convert_string(pool, text, param) {
                return converted;
            }
        }
        value.clone()
    }

    /// Setter `setName(..)` with one parameter, else a field named `name`.
    fn property_handle(&self, bean_type: Idx, name: &str) -> Option<PropertyHandle> {
        let pool = self.pool();
        let setter = setter_name(name);
        let found = pool.methods(bean_type).into_iter().find(|id| {
            pool.executable(*id).is_some_and(|e| {
                !e.is_static() && e.params.len() == 1 && e.name() == Some(setter.as_str())
            })
        });
        if let Some(id) = found {
            return Some(PropertyHandle::Setter(id));
        }
        pool.field(bean_type, name)
            .map(|(owner, field)| PropertyHandle::Field {
                owner,
                name: field.name.clone(),
            })
    }
}

/// Array, set or list literal for a container parameter.
fn container(pool: &Pool, param: Idx, elements: Vec<Value>) -> Value {
    if pool.array_component(param).is_some() {
        Value::Array {
            ty: param,
            elements,
        }
    } else if pool.is_subclass_of(param, Idx::SET) {
        Value::Set(elements)
    } else {
        Value::List(elements)
    }
}

fn setter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_owned(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
