//! Reflection facts.
//!
//! Generated code cannot service every member directly: listener methods
//! are invoked by the runtime, properties are applied reflectively and
//! components without a descriptor fall back to reflective instantiation.
//! Each such type is recorded here with the members and access flags the
//! runtime needs, for an external serializer to write out.
//!
//! Records are keyed by type identity, kept in first-seen order and merged
//! by union. A record is never overwritten.

use std::collections::BTreeSet;

use aot_ir::{ExecId, Idx, Pool};
use bitflags::bitflags;
use rustc_hash::FxHashMap;

bitflags! {
    /// Kinds of reflective access required on a type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ReflectionFlags: u8 {
        /// Declared constructors can be listed.
        const QUERY_DECLARED_CONSTRUCTORS = 1 << 0;
        /// Declared constructors can be invoked.
        const INVOKE_DECLARED_CONSTRUCTORS = 1 << 1;
        /// Declared methods can be listed.
        const QUERY_DECLARED_METHODS = 1 << 2;
        /// Declared methods can be invoked.
        const INVOKE_DECLARED_METHODS = 1 << 3;
        /// Declared fields can be read and written.
        const DECLARED_FIELDS = 1 << 4;
    }
}

impl ReflectionFlags {
    /// Access needed to instantiate a type without generated code.
    pub const INSTANTIATE: Self = Self::QUERY_DECLARED_CONSTRUCTORS
        .union(Self::INVOKE_DECLARED_CONSTRUCTORS)
        .union(Self::QUERY_DECLARED_METHODS);
}

/// A member kept introspectable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Member {
    Constructor(ExecId),
    Method(ExecId),
    Field(String),
}

/// Everything recorded for one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactRecord {
    pub ty: Idx,
    pub members: BTreeSet<Member>,
    pub flags: ReflectionFlags,
}

/// Run-scoped collector of reflection facts.
#[derive(Clone, Debug, Default)]
pub struct ReflectionFacts {
    records: Vec<FactRecord>,
    by_type: FxHashMap<Idx, usize>,
}

impl ReflectionFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `members` and `flags` for `ty`, merging with earlier records.
    pub fn record(
        &mut self,
        ty: Idx,
        members: impl IntoIterator<Item = Member>,
        flags: ReflectionFlags,
    ) {
        let index = *self.by_type.entry(ty).or_insert_with(|| {
            self.records.push(FactRecord {
                ty,
                members: BTreeSet::new(),
                flags: ReflectionFlags::empty(),
            });
            self.records.len() - 1
        });
        let record = &mut self.records[index];
        record.members.extend(members);
        record.flags |= flags;
    }

    /// Record what the reflective fallback needs to create `ty`: every
    /// declared constructor, plus method introspection for factory methods.
    pub fn record_instantiation(&mut self, pool: &Pool, ty: Idx) {
        let raw = pool.raw_class(ty);
        let constructors = pool
            .constructors(raw)
            .iter()
            .map(|&id| Member::Constructor(id));
        self.record(raw, constructors, ReflectionFlags::INSTANTIATE);
    }

    pub fn get(&self, ty: Idx) -> Option<&FactRecord> {
        self.by_type.get(&ty).map(|&i| &self.records[i])
    }

    /// Records in first-seen order.
    pub fn records(&self) -> &[FactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<FactRecord> {
        self.records
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
