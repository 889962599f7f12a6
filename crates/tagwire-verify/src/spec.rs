//! The specification tree: a small algebra of value shapes.

use std::fmt;
use std::sync::Arc;

use tagwire_core::types::{Value, ValueKind};

use crate::verify;

/// A size constraint on a container or mapping.
///
/// Either an exact required size or an inclusive `[min, max]` range; the two
/// forms are mutually exclusive per node. The default admits any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenConstraint {
    /// The size must equal this value exactly.
    Exact(usize),
    /// The size must fall within `[min, max]`; `max: None` is unbounded.
    Range {
        /// Smallest admitted size.
        min: usize,
        /// Largest admitted size, or `None` for no upper bound.
        max: Option<usize>,
    },
}

impl Default for LenConstraint {
    fn default() -> Self {
        Self::Range { min: 0, max: None }
    }
}

impl LenConstraint {
    /// Admit any size.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Require exactly `n` elements.
    #[must_use]
    pub const fn exact(n: usize) -> Self {
        Self::Exact(n)
    }

    /// Require at least `min` elements.
    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self::Range { min, max: None }
    }

    /// Require at most `max` elements.
    #[must_use]
    pub const fn at_most(max: usize) -> Self {
        Self::Range { min: 0, max: Some(max) }
    }

    /// Require between `min` and `max` elements, inclusive.
    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self::Range { min, max: Some(max) }
    }

    /// Whether `len` satisfies this constraint.
    #[must_use]
    pub fn admits(&self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == *n,
            Self::Range { min, max } => len >= *min && max.map_or(true, |m| len <= m),
        }
    }
}

/// The kind of homogeneous container a [`Spec::Container`] node denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Ordered sequence.
    List,
    /// Fixed-arity ordered sequence.
    Tuple,
    /// Unordered collection, mutable flavor.
    Set,
    /// Unordered collection, immutable flavor.
    FrozenSet,
}

/// One node of a shape specification.
///
/// A spec is an immutable tree built once, then freely shared and reused
/// across verification calls; cloning is cheap (predicates are behind
/// `Arc`). The node kinds form a closed set, so the engine matches
/// exhaustively and an unhandled kind is a compile error rather than a
/// silent `false`.
#[derive(Clone)]
pub enum Spec {
    /// Matches values of exactly this kind, without looking inside them.
    ///
    /// The escape hatch for "accept any contents" leaves, e.g. an
    /// arbitrary set used purely as an opaque key.
    Plain(ValueKind),
    /// Matches values the predicate accepts. The escape hatch for logic the
    /// other node kinds cannot express.
    Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
    /// Matches values that match at least one child, tried in order.
    /// An empty child list never matches.
    Sum(Vec<Spec>),
    /// Matches ordered sequences with exactly one element per child, each
    /// matching positionally.
    Product(Vec<Spec>),
    /// Matches a homogeneous container: right kind, admitted size, and
    /// every element matching the element spec.
    Container {
        /// Which container variant is required.
        kind: ContainerKind,
        /// The spec every element must match.
        element: Box<Spec>,
        /// Size constraint on the container.
        len: LenConstraint,
    },
    /// Matches a mapping whose size is admitted and whose every `(key,
    /// value)` pair, presented as a 2-element tuple, matches the entry
    /// spec.
    Map {
        /// The spec each key/value pair must match, typically a two-child
        /// [`Spec::Product`] or a [`Spec::Sum`] of such products.
        entry: Box<Spec>,
        /// Size constraint on the mapping.
        len: LenConstraint,
    },
}

impl Spec {
    /// A spec matching values of exactly `kind`.
    #[must_use]
    pub const fn plain(kind: ValueKind) -> Self {
        Self::Plain(kind)
    }

    /// A spec matching values the given predicate accepts.
    pub fn predicate(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// A union over alternatives, tried in declaration order.
    pub fn sum(children: impl IntoIterator<Item = Spec>) -> Self {
        Self::Sum(children.into_iter().collect())
    }

    /// A positional record shape.
    pub fn product(children: impl IntoIterator<Item = Spec>) -> Self {
        Self::Product(children.into_iter().collect())
    }

    /// A homogeneous container of the given kind.
    #[must_use]
    pub fn container(kind: ContainerKind, element: Spec, len: LenConstraint) -> Self {
        Self::Container { kind, element: Box::new(element), len }
    }

    /// A list whose every element matches `element`, any length.
    #[must_use]
    pub fn list_of(element: Spec) -> Self {
        Self::container(ContainerKind::List, element, LenConstraint::any())
    }

    /// A tuple whose every element matches `element`, any length.
    #[must_use]
    pub fn tuple_of(element: Spec) -> Self {
        Self::container(ContainerKind::Tuple, element, LenConstraint::any())
    }

    /// A set whose every element matches `element`, any length.
    #[must_use]
    pub fn set_of(element: Spec) -> Self {
        Self::container(ContainerKind::Set, element, LenConstraint::any())
    }

    /// A frozen set whose every element matches `element`, any length.
    #[must_use]
    pub fn frozen_set_of(element: Spec) -> Self {
        Self::container(ContainerKind::FrozenSet, element, LenConstraint::any())
    }

    /// A mapping whose every `(key, value)` pair matches `entry`, any size.
    #[must_use]
    pub fn map_of(entry: Spec) -> Self {
        Self::Map { entry: Box::new(entry), len: LenConstraint::any() }
    }

    /// Replace the size constraint of a container or mapping node.
    ///
    /// Only meaningful on [`Spec::Container`] and [`Spec::Map`]; applying it
    /// to any other node is a construction mistake and asserted in debug
    /// builds.
    #[must_use]
    pub fn with_len(mut self, constraint: LenConstraint) -> Self {
        match &mut self {
            Self::Container { len, .. } | Self::Map { len, .. } => *len = constraint,
            _ => debug_assert!(false, "with_len applies only to container and map specs"),
        }
        self
    }

    /// Whether `value` matches this spec. Method form of [`verify`].
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        verify(value, self)
    }
}

// Hand-written because the predicate closure has no Debug.
impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(kind) => f.debug_tuple("Plain").field(kind).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Sum(children) => f.debug_tuple("Sum").field(children).finish(),
            Self::Product(children) => f.debug_tuple("Product").field(children).finish(),
            Self::Container { kind, element, len } => f
                .debug_struct("Container")
                .field("kind", kind)
                .field("element", element)
                .field("len", len)
                .finish(),
            Self::Map { entry, len } => {
                f.debug_struct("Map").field("entry", entry).field("len", len).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_constraint_defaults_to_unbounded() {
        let len = LenConstraint::default();
        assert!(len.admits(0));
        assert!(len.admits(usize::MAX));
    }

    #[test]
    fn len_constraint_forms() {
        assert!(LenConstraint::exact(2).admits(2));
        assert!(!LenConstraint::exact(2).admits(3));
        assert!(LenConstraint::at_least(1).admits(4));
        assert!(!LenConstraint::at_least(1).admits(0));
        assert!(LenConstraint::at_most(2).admits(0));
        assert!(!LenConstraint::at_most(2).admits(3));
        assert!(LenConstraint::between(1, 4).admits(1));
        assert!(LenConstraint::between(1, 4).admits(4));
        assert!(!LenConstraint::between(1, 4).admits(5));
    }

    #[test]
    fn specs_are_cheaply_cloned_and_shared() {
        let spec = Spec::sum([
            Spec::plain(ValueKind::Int),
            Spec::predicate(|v| v.as_text().is_some_and(|s| s.len() < 4)),
        ]);
        let copy = spec.clone();
        assert!(copy.matches(&Value::Int(1)));
        assert!(spec.matches(&Value::from("abc")));
    }
}
