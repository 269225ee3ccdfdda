//! Argument and property values carried by definitions.

use crate::{Definition, Idx};

/// A value supplied to a constructor, factory method or property.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// Array literal. `ty` is the array type itself (`String[]`).
    Array { ty: Idx, elements: Vec<Value> },
    /// Ordered collection.
    List(Vec<Value>),
    /// Unordered collection of unique elements, kept in insertion order.
    Set(Vec<Value>),
    /// Enum or static constant of `ty`.
    Enum { ty: Idx, constant: String },
    /// Type literal (`Integer.class`).
    Class(Idx),
    /// Reference to another component by name.
    Reference(String),
    /// Inner definition instantiated in place.
    Definition(Box<Definition>),
}

impl Value {
    /// The type of the value as far as it is knowable without consulting
    /// the registry.
    ///
    /// `None` for null, references and nested definitions.
    pub fn literal_type(&self) -> Option<Idx> {
        match self {
            Value::Bool(_) => Some(Idx::BOXED_BOOL),
            Value::Byte(_) => Some(Idx::BOXED_BYTE),
            Value::Short(_) => Some(Idx::BOXED_SHORT),
            Value::Int(_) => Some(Idx::BOXED_INT),
            Value::Long(_) => Some(Idx::BOXED_LONG),
            Value::Float(_) => Some(Idx::BOXED_FLOAT),
            Value::Double(_) => Some(Idx::BOXED_DOUBLE),
            Value::Char(_) => Some(Idx::BOXED_CHAR),
            Value::String(_) => Some(Idx::STRING),
            Value::Array { ty, .. } => Some(*ty),
            Value::List(_) => Some(Idx::LIST),
            Value::Set(_) => Some(Idx::SET),
            Value::Enum { ty, .. } => Some(*ty),
            Value::Class(_) => Some(Idx::CLASS),
            Value::Null | Value::Reference(_) | Value::Definition(_) => None,
        }
    }

    /// Elements of an array or collection literal.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array { elements, .. } | Value::List(elements) | Value::Set(elements) => {
                Some(elements)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Nested definitions anywhere inside this value.
    pub fn contains_definition(&self) -> bool {
        match self {
            Value::Definition(_) => true,
            _ => self
                .elements()
                .is_some_and(|els| els.iter().any(Value::contains_definition)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Definition> for Value {
    fn from(value: Definition) -> Self {
        Value::Definition(Box::new(value))
    }
}

/// A positional argument: a value plus an optional explicit type.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub value: Value,

    /// Declared type of the argument, overriding the inferred one.
    pub type_hint: Option<Idx>,
}

impl Argument {
    pub fn typed(value: Value, ty: Idx) -> Self {
        Self {
            value,
            type_hint: Some(ty),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self {
            value,
            type_hint: None,
        }
    }
}
