//! Executable resolution.
//!
//! Deduces the constructor or factory method that builds a component from
//! its declarative definition, which may name only a factory method, carry a
//! partial list of argument values, or say nothing about construction at
//! all.
//!
//! # Algorithm
//!
//! 1. An explicit executable on the definition is returned as is.
//! 2. A factory object whose produced type does not satisfy the expected
//!    target type is rejected.
//! 3. Candidates are collected: same-named factory methods (statics owned
//!    by the factory type itself, or instance methods when a factory bean is
//!    named) or the non-private constructors of the bean class.
//! 4. A single candidate with no explicit parameter types is returned
//!    without looking at argument values.
//! 5. Otherwise argument types are computed once (literals, named
//!    references through the registry, nested definitions recursively) and
//!    candidates are matched in three tiers: exact, element, conversion.
//!    The first tier with a match decides; several matches are ambiguous
//!    unless exactly one of them has a fixed arity.

use aot_ir::{Argument, Definition, ExecId, Executable, Idx, Pool, Registry, Value, Visibility};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::convert::convert_string;
use crate::stack::ensure_sufficient_stack;
use crate::ResolveError;

/// Candidate executables for one resolution.
type Candidates = SmallVec<[ExecId; 4]>;

/// Matching strictness, from strictest to most lenient.
///
/// Each tier accepts everything the previous one does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Every value is assignable to its parameter.
    Exact,
    /// Containers also accept a single element, or a literal whose
    /// elements are all assignable to the element type.
    Element,
    /// Strings also convert to classes, numbers and enum constants.
    Conversion,
}

impl Tier {
    const ALL: [Tier; 3] = [Tier::Exact, Tier::Element, Tier::Conversion];
}

/// Statically knowable type of one argument.
#[derive(Clone, Debug)]
pub struct ArgType<'v> {
    /// `None` when unknown: a missing reference or an unresolvable nested
    /// definition. Unknown matches every parameter.
    pub ty: Option<Idx>,
    /// Element types of an array or collection literal.
    pub elements: Option<Vec<Option<Idx>>>,
    /// Text of a string literal, for the conversion tier.
    pub text: Option<&'v str>,
    pub is_null: bool,
}

/// Resolves definitions to executables against one pool and registry.
///
/// Reuse one resolver for a whole run: resolved types of named references
/// are cached.
pub struct ExecutableResolver<'a, R: Registry + ?Sized> {
    pool: &'a Pool,
    registry: &'a R,
    /// Names of the components currently being resolved, outermost first.
    stack: Vec<String>,
    /// Resolved type of each named reference seen so far.
    reference_types: FxHashMap<String, Option<Idx>>,
}

impl<'a, R: Registry + ?Sized> ExecutableResolver<'a, R> {
    pub fn new(pool: &'a Pool, registry: &'a R) -> Self {
        Self {
            pool,
            registry,
            stack: Vec::new(),
            reference_types: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    #[inline]
    pub fn registry(&self) -> &'a R {
        self.registry
    }

    /// Resolve the executable that instantiates `def`.
    ///
    /// `Ok(None)` means no candidate matches; the component cannot be
    /// generated and falls back to reflection.
    #[tracing::instrument(level = "debug", skip_all, fields(component = %def.name))]
    pub fn resolve(&mut self, def: &Definition) -> Result<Option<ExecId>, ResolveError> {
        let pushed = self.enter(&def.name)?;
        let result = self.resolve_inner(def);
        if pushed {
            self.stack.pop();
        }
        result
    }

    fn resolve_inner(&mut self, def: &Definition) -> Result<Option<ExecId>, ResolveError> {
        if let Some(exec) = def.executable {
            trace!("explicit executable");
            return Ok(Some(exec));
        }

        self.check_factory_object(def)?;

        let mut candidates = self.candidates(def)?;
        if let Some(types) = &def.parameter_types {
            candidates.retain(|id| {
                self.executable(*id)
                    .is_some_and(|e| self.same_params(&e.params, types))
            });
        } else if candidates.len() == 1 {
            trace!("single candidate");
            return Ok(candidates.first().copied());
        }
        if candidates.is_empty() {
            debug!("no candidate");
            return Ok(None);
        }

        let args = self.argument_types(&def.arguments)?;
        for tier in Tier::ALL {
            let matches: Candidates = candidates
                .iter()
                .copied()
                .filter(|id| {
                    self.executable(*id)
                        .is_some_and(|e| self.matches(e, &args, tier))
                })
                .collect();
            if !matches.is_empty() {
                trace!(?tier, matches = matches.len(), "tier matched");
                return self.select(def, &matches).map(Some);
            }
        }
        debug!(candidates = candidates.len(), "no candidate matches the arguments");
        Ok(None)
    }

    /// Push `name` on the resolution stack, failing if it is already there.
    fn enter(&mut self, name: &str) -> Result<bool, ResolveError> {
        if name.is_empty() {
            return Ok(false);
        }
        self.check_cycle(name)?;
        self.stack.push(name.to_owned());
        Ok(true)
    }

    fn check_cycle(&self, name: &str) -> Result<(), ResolveError> {
        match self.stack.iter().position(|n| n == name) {
            Some(start) => {
                let mut cycle: Vec<String> = self.stack[start..].to_vec();
                cycle.push(name.to_owned());
                Err(ResolveError::CyclicReference { cycle })
            }
            None => Ok(()),
        }
    }

    #[inline]
    fn executable(&self, id: ExecId) -> Option<&'a Executable> {
        self.pool.executable(id)
    }

    fn same_params(&self, params: &[Idx], types: &[Idx]) -> bool {
        params.len() == types.len()
            && params
                .iter()
                .zip(types)
                .all(|(&p, &t)| self.pool.raw_class(p) == self.pool.raw_class(t))
    }

    /// A factory object must produce something assignable to the expected
    /// target type.
    fn check_factory_object(&self, def: &Definition) -> Result<(), ResolveError> {
        let (Some(bean_class), Some(target)) = (def.bean_class, def.target_type) else {
            return Ok(());
        };
        let Some(produced) = self.pool.produced_type(bean_class) else {
            return Ok(());
        };
        if self.pool.raw_class(target) == self.pool.raw_class(bean_class)
            || self.pool.is_assignable(target, produced)
        {
            return Ok(());
        }
        Err(ResolveError::IncompatibleTargetType {
            component: def.name.clone(),
            expected: self.pool.format_type(target),
            factory_type: self.pool.format_type(bean_class),
            produced: self.pool.format_type(produced),
        })
    }

    // === Candidates ===

    fn candidates(&mut self, def: &Definition) -> Result<Candidates, ResolveError> {
        let count = def.arguments.len();
        let mut out: Candidates = match &def.factory_method {
            Some(name) => self.factory_methods(def, name)?,
            None => {
                let Some(owner) = def.bean_class.or(def.target_type) else {
                    return Ok(Candidates::new());
                };
                self.pool
                    .constructors(owner)
                    .iter()
                    .copied()
                    .filter(|id| {
                        self.executable(*id)
                            .is_some_and(|e| e.visibility != Visibility::Private)
                    })
                    .collect()
            }
        };
        if count > 0 {
            out.retain(|id| {
                self.executable(*id)
                    .is_some_and(|e| e.accepts_arity(count))
            });
        }
        Ok(out)
    }

    /// Methods named `name` on the factory type and its supertypes.
    ///
    /// Statics must be declared by the factory type itself; a same-named
    /// static inherited from an unrelated supertype is not a candidate.
    fn factory_methods(&mut self, def: &Definition, name: &str) -> Result<Candidates, ResolveError> {
        let (factory_type, instance) = match &def.factory_bean {
            Some(bean) => (self.reference_type(bean)?, true),
            None => (def.bean_class.or(def.target_type), false),
        };
        let Some(factory_type) = factory_type else {
            return Ok(Candidates::new());
        };
        let owner = self.pool.raw_class(factory_type);
        Ok(self
            .pool
            .methods(factory_type)
            .into_iter()
            .filter(|id| {
                self.executable(*id).is_some_and(|e| {
                    e.name() == Some(name)
                        && e.visibility != Visibility::Private
                        && if instance {
                            !e.is_static()
                        } else {
                            e.is_static() && e.owner == owner
                        }
                })
            })
            .collect())
    }

    // === Argument types ===

    /// Compute the type of every argument once.
    pub fn argument_types<'v>(
        &mut self,
        args: &'v [Argument],
    ) -> Result<Vec<ArgType<'v>>, ResolveError> {
        args.iter().map(|arg| self.argument_type(arg)).collect()
    }

    fn argument_type<'v>(&mut self, arg: &'v Argument) -> Result<ArgType<'v>, ResolveError> {
        let ty = match arg.type_hint {
            Some(hint) => Some(hint),
            None => self.value_type(&arg.value)?,
        };
        let elements = match arg.value.elements() {
            Some(elements) => Some(
                elements
                    .iter()
                    .map(|e| self.value_type(e))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let text = match &arg.value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        Ok(ArgType {
            ty,
            elements,
            text,
            is_null: arg.value.is_null(),
        })
    }

    /// Statically knowable type of a value.
    pub fn value_type(&mut self, value: &Value) -> Result<Option<Idx>, ResolveError> {
        match value {
            Value::Reference(name) => self.reference_type(name),
            Value::Definition(inner) => ensure_sufficient_stack(|| self.definition_type(inner)),
            other => Ok(other.literal_type()),
        }
    }

    /// Resolved type of a named component. Missing components are unknown.
    pub fn reference_type(&mut self, name: &str) -> Result<Option<Idx>, ResolveError> {
        self.check_cycle(name)?;
        if let Some(ty) = self.reference_types.get(name) {
            return Ok(*ty);
        }
        let Some(def) = self.registry.resolve_reference(name) else {
            trace!(reference = name, "unknown reference");
            return Ok(None);
        };
        let ty = ensure_sufficient_stack(|| self.definition_type(def))?;
        self.reference_types.insert(name.to_owned(), ty);
        Ok(ty)
    }

    /// Type produced by a definition, using its resolved executable.
    ///
    /// Methods produce their return type, constructors their owner; factory
    /// objects are unwrapped to the type they produce. Unresolvable
    /// definitions fall back to their declared type.
    pub fn definition_type(&mut self, def: &Definition) -> Result<Option<Idx>, ResolveError> {
        let produced = match self.resolve(def)? {
            Some(exec) => self.executable(exec).map(Executable::return_type),
            None => def.declared_type(),
        };
        Ok(produced.map(|ty| self.pool.produced_type(ty).unwrap_or(ty)))
    }

    // === Matching ===

    /// Whether `exec` accepts `args` positionally at `tier`.
    pub fn matches(&self, exec: &Executable, args: &[ArgType<'_>], tier: Tier) -> bool {
        if !exec.accepts_arity(args.len()) {
            return false;
        }
        let fixed = if exec.varargs {
            exec.params.len() - 1
        } else {
            exec.params.len()
        };
        let (head, rest) = args.split_at(fixed.min(args.len()));
        if !exec
            .params
            .iter()
            .zip(head)
            .all(|(&param, arg)| self.accepts(param, arg, tier))
        {
            return false;
        }
        if !exec.varargs {
            return true;
        }
        let Some(&array) = exec.params.last() else {
            return true;
        };
        if let [single] = rest {
            if self.accepts(array, single, tier) {
                return true;
            }
        }
        let component = self.pool.array_component(array).unwrap_or(Idx::OBJECT);
        rest.iter().all(|arg| self.accepts(component, arg, tier))
    }

    /// Whether a parameter declared as `param` accepts `arg` at `tier`.
    pub fn accepts(&self, param: Idx, arg: &ArgType<'_>, tier: Tier) -> bool {
        let exact = match arg.ty {
            Some(ty) => self.pool.is_assignable(param, ty),
            None => !(arg.is_null && param.is_primitive()),
        };
        if exact {
            return true;
        }
        if tier >= Tier::Element {
            if let Some(element) = self.pool.element_type(param) {
                if arg.ty.is_some_and(|ty| self.pool.is_assignable(element, ty)) {
                    return true;
                }
                if let Some(elements) = &arg.elements {
                    if elements
                        .iter()
                        .all(|e| e.map_or(true, |ty| self.pool.is_assignable(element, ty)))
                    {
                        return true;
                    }
                }
            }
        }
        if tier == Tier::Conversion {
            if let Some(text) = arg.text {
                return convert_string(self.pool, text, param).is_some();
            }
        }
        false
    }

    /// Pick the single match, preferring a fixed-arity executable over
    /// variadic ones.
    fn select(&self, def: &Definition, matches: &[ExecId]) -> Result<ExecId, ResolveError> {
        if let [only] = matches {
            return Ok(*only);
        }
        let fixed: Candidates = matches
            .iter()
            .copied()
            .filter(|id| self.executable(*id).is_some_and(|e| !e.varargs))
            .collect();
        if let [only] = fixed.as_slice() {
            debug!("preferring the fixed-arity match");
            return Ok(*only);
        }
        let ty = matches
            .first()
            .and_then(|id| self.executable(*id))
            .map_or(Idx::OBJECT, |e| e.owner);
        Err(ResolveError::AmbiguousExecutable {
            component: def.name.clone(),
            ty: self.pool.format_type(ty),
            candidates: matches.iter().map(|id| self.pool.signature(*id)).collect(),
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
