//! The verification engine: a recursive walk of value and spec in lock-step.

use tagwire_core::types::Value;

use crate::spec::{ContainerKind, Spec};

/// Check `value` against `spec`.
///
/// A pure, side-effect-free predicate: it recurses into composites exactly
/// as far as the spec demands and returns whether the shapes line up. A
/// mismatch is `false`, never an error; malformed specs are a
/// construction-time mistake, not a runtime condition.
#[must_use]
pub fn verify(value: &Value, spec: &Spec) -> bool {
    match spec {
        Spec::Plain(kind) => value.kind() == *kind,

        Spec::Predicate(accept) => accept(value),

        // Inclusive OR over the alternatives, in declaration order,
        // short-circuiting on the first match. `any` over an empty list is
        // false, so an empty sum never matches.
        Spec::Sum(children) => children.iter().any(|child| verify(value, child)),

        // Positional AND: one element per child, matched pairwise. An arity
        // mismatch is an ordinary non-match. Both sequence flavors qualify;
        // a caller that cares about the flavor nests this in a Container.
        Spec::Product(children) => match value.as_sequence() {
            Some(items) => {
                items.len() == children.len()
                    && items.iter().zip(children).all(|(item, child)| verify(item, child))
            }
            None => false,
        },

        Spec::Container { kind, element, len } => match (kind, value) {
            (ContainerKind::List, Value::List(items))
            | (ContainerKind::Tuple, Value::Tuple(items)) => {
                len.admits(items.len()) && items.iter().all(|item| verify(item, element))
            }
            (ContainerKind::Set, Value::Set(items))
            | (ContainerKind::FrozenSet, Value::FrozenSet(items)) => {
                len.admits(items.len()) && items.iter().all(|item| verify(item, element))
            }
            _ => false,
        },

        Spec::Map { entry, len } => match value {
            Value::Map(map) => {
                len.admits(map.len())
                    && map.iter().all(|(key, val)| {
                        // Each pair is presented to the entry spec as a
                        // 2-element tuple, so any node kind can judge it.
                        let pair = Value::Tuple(vec![key.clone(), val.clone()]);
                        verify(&pair, entry)
                    })
            }
            _ => false,
        },
    }
}
