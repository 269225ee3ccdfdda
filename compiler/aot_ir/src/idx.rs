//! Type index handle.
//!
//! Every type known to a compilation run lives in the [`Pool`](crate::Pool)
//! and is referenced by a 32-bit `Idx`.
//!
//! # Layout
//!
//! - Primitive types have fixed indices (0-8)
//! - Their boxed counterparts follow (9-16)
//! - Well-known library and framework types occupy 17-32
//! - Indices 33-63 are reserved; declared types start at [`Idx::FIRST_DYNAMIC`]
//!
//! Equality is index comparison: arrays and parameterized types are interned,
//! so two structurally identical types always share one `Idx`.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (0-8) ===

    /// `boolean`
    pub const BOOL: Self = Self(0);
    /// `byte`
    pub const BYTE: Self = Self(1);
    /// `short`
    pub const SHORT: Self = Self(2);
    /// `int`
    pub const INT: Self = Self(3);
    /// `long`
    pub const LONG: Self = Self(4);
    /// `float`
    pub const FLOAT: Self = Self(5);
    /// `double`
    pub const DOUBLE: Self = Self(6);
    /// `char`
    pub const CHAR: Self = Self(7);
    /// `void`
    pub const VOID: Self = Self(8);

    // === Boxed Primitives (9-16) ===

    /// `java.lang.Boolean`
    pub const BOXED_BOOL: Self = Self(9);
    /// `java.lang.Byte`
    pub const BOXED_BYTE: Self = Self(10);
    /// `java.lang.Short`
    pub const BOXED_SHORT: Self = Self(11);
    /// `java.lang.Integer`
    pub const BOXED_INT: Self = Self(12);
    /// `java.lang.Long`
    pub const BOXED_LONG: Self = Self(13);
    /// `java.lang.Float`
    pub const BOXED_FLOAT: Self = Self(14);
    /// `java.lang.Double`
    pub const BOXED_DOUBLE: Self = Self(15);
    /// `java.lang.Character`
    pub const BOXED_CHAR: Self = Self(16);

    // === Well-known Library Types (17-26) ===

    /// `java.lang.Object`
    pub const OBJECT: Self = Self(17);
    /// `java.lang.String`
    pub const STRING: Self = Self(18);
    /// `java.lang.Number`
    pub const NUMBER: Self = Self(19);
    /// `java.lang.Class`
    pub const CLASS: Self = Self(20);
    /// `java.lang.Enum`
    pub const ENUM: Self = Self(21);
    /// `java.util.Collection`
    pub const COLLECTION: Self = Self(22);
    /// `java.util.List`
    pub const LIST: Self = Self(23);
    /// `java.util.Set`
    pub const SET: Self = Self(24);
    /// `java.util.Collections`
    pub const COLLECTIONS: Self = Self(25);
    /// `java.util.ArrayList`
    pub const ARRAY_LIST: Self = Self(26);

    // === Framework Types Referenced By Generated Code (27-32) ===

    /// `org.springframework.context.support.GenericApplicationContext`
    pub const APPLICATION_CONTEXT: Self = Self(27);
    /// `org.springframework.context.ApplicationContextInitializer`
    pub const CONTEXT_INITIALIZER: Self = Self(28);
    /// `org.springframework.aot.beans.factory.BeanDefinitionRegistrar`
    pub const BEAN_REGISTRAR: Self = Self(29);
    /// `org.springframework.core.ResolvableType`
    pub const RESOLVABLE_TYPE: Self = Self(30);
    /// `org.springframework.aot.context.event.EventListenerMetadata`
    pub const LISTENER_METADATA: Self = Self(31);
    /// `org.springframework.aot.context.event.EventListenerRegistrar`
    pub const LISTENER_REGISTRAR: Self = Self(32);

    /// Number of pre-interned types.
    pub const WELL_KNOWN_COUNT: u32 = 33;

    /// First index for declared, array and parameterized types.
    pub const FIRST_DYNAMIC: u32 = 64;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into pool storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the nine primitive types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 <= Self::VOID.0
    }

    /// Check if this is a boxed primitive.
    #[inline]
    pub const fn is_boxed(self) -> bool {
        self.0 >= Self::BOXED_BOOL.0 && self.0 <= Self::BOXED_CHAR.0
    }

    /// Check if this type was pre-interned at pool creation.
    #[inline]
    pub const fn is_well_known(self) -> bool {
        self.0 < Self::WELL_KNOWN_COUNT
    }

    /// The boxed counterpart of a primitive (`int` -> `Integer`).
    ///
    /// `void` and non-primitives have none.
    #[inline]
    pub const fn boxed(self) -> Option<Self> {
        if self.0 < Self::VOID.0 {
            Some(Self(self.0 + 9))
        } else {
            None
        }
    }

    /// The primitive counterpart of a boxed type (`Integer` -> `int`).
    #[inline]
    pub const fn unboxed(self) -> Option<Self> {
        if self.is_boxed() {
            Some(Self(self.0 - 9))
        } else {
            None
        }
    }

    /// Java keyword for primitive types.
    #[inline]
    pub const fn primitive_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("boolean"),
            1 => Some("byte"),
            2 => Some("short"),
            3 => Some("int"),
            4 => Some("long"),
            5 => Some("float"),
            6 => Some("double"),
            7 => Some("char"),
            8 => Some("void"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "Idx::{name}"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

// Idx must stay 4 bytes
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
