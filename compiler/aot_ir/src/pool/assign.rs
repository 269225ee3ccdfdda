//! Assignability between pool types.

use super::{Pool, TypeData};
use crate::Idx;

impl Pool {
    /// Whether a value of type `source` can be passed where `target` is
    /// declared.
    ///
    /// Covers identity, boxing, `Object`, nominal subtyping, arrays by
    /// component, and parameterized types by raw type plus argument
    /// containment. A raw type on either side of a parameterized comparison
    /// is an unchecked match.
    pub fn is_assignable(&self, target: Idx, source: Idx) -> bool {
        if target == source {
            return true;
        }
        if target.is_primitive() {
            return source.unboxed() == Some(target);
        }
        if source == Idx::VOID {
            return false;
        }
        if let Some(boxed) = source.boxed() {
            return self.is_assignable(target, boxed);
        }

        if let TypeData::Variable { bound, .. } = self.data(source) {
            return self.is_assignable(target, bound.unwrap_or(Idx::OBJECT));
        }
        if let TypeData::Variable { bound, .. } = self.data(target) {
            return bound.map_or(true, |b| self.is_assignable(b, source));
        }
        if target == Idx::OBJECT {
            return true;
        }

        match (self.data(target), self.data(source)) {
            (TypeData::Array(t), TypeData::Array(s)) => {
                if t.is_primitive() || s.is_primitive() {
                    t == s
                } else {
                    self.is_assignable(*t, *s)
                }
            }
            (TypeData::Array(_), _) | (_, TypeData::Array(_)) => false,
            (
                TypeData::Parameterized { raw: tr, args: ta },
                TypeData::Parameterized { raw: sr, args: sa },
            ) if tr == sr => {
                ta.len() != sa.len()
                    || ta.iter().zip(sa).all(|(&t, &s)| self.contains_arg(t, s))
            }
            (TypeData::Parameterized { raw, .. }, TypeData::Declared(_)) if *raw == source => true,
            (TypeData::Declared(_), TypeData::Parameterized { raw, .. }) if *raw == target => true,
            _ => self
                .direct_supertypes(source)
                .into_iter()
                .any(|sup| self.is_assignable(target, sup)),
        }
    }

    /// Type argument containment: `List<T extends Number>` contains
    /// `List<Integer>`, `List<String>` only contains `List<String>`.
    ///
    /// A variable on the source side is unresolved, so any target argument
    /// within its bound is accepted.
    fn contains_arg(&self, target: Idx, source: Idx) -> bool {
        if target == source {
            return true;
        }
        match (self.data(target), self.data(source)) {
            (TypeData::Variable { bound, .. }, _) => {
                bound.map_or(true, |b| self.is_assignable(b, source))
            }
            (_, TypeData::Variable { bound, .. }) => {
                bound.map_or(true, |b| self.is_assignable(b, target))
            }
            _ => false,
        }
    }
}
