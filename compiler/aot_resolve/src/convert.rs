//! String conversions accepted as a last resort when matching arguments.
//!
//! Definitions frequently carry textual values (from configuration) for
//! parameters declared as a class, a number or an enum. The resolver uses
//! these conversions in its final matching tier and the descriptor builder
//! applies them so generated code passes a typed literal.

use aot_ir::{Idx, Pool, Value};

/// Convert `text` to a value assignable to `target`, if possible.
pub fn convert_string(pool: &Pool, text: &str, target: Idx) -> Option<Value> {
    let target = target.unboxed().unwrap_or(target);
    match target {
        Idx::BOOL => text.parse().ok().map(Value::Bool),
        Idx::BYTE => text.parse().ok().map(Value::Byte),
        Idx::SHORT => text.parse().ok().map(Value::Short),
        Idx::INT => text.parse().ok().map(Value::Int),
        Idx::LONG => text.parse().ok().map(Value::Long),
        Idx::FLOAT => text.parse().ok().map(Value::Float),
        Idx::DOUBLE => text.parse().ok().map(Value::Double),
        Idx::CHAR => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        Idx::NUMBER => text
            .parse()
            .map(Value::Int)
            .or_else(|_| text.parse().map(Value::Long))
            .or_else(|_| text.parse().map(Value::Double))
            .ok(),
        _ if pool.raw_class(target) == Idx::CLASS => pool.lookup(text).map(Value::Class),
        _ => {
            let declared = pool.declared(target)?;
            declared
                .constants
                .iter()
                .any(|c| c == text)
                .then(|| Value::Enum {
                    ty: target,
                    constant: text.to_owned(),
                })
        }
    }
}
