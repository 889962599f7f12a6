//! The dynamic values that can cross the wire.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ValueKind;

/// A structured in-memory value.
///
/// This enum is the universe both engines operate over: the codec serializes
/// and deserializes `Value`s, and the verification engine walks them against
/// a specification tree. Composites nest arbitrarily deep.
///
/// `Value` carries a total order (floats via [`f64::total_cmp`]) so that any
/// value, including floats and nested composites, can be a set member or a
/// map key. Equality follows that order, which makes unordered collections
/// compare by set equality regardless of the order their elements were
/// inserted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Opaque bytes.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
    /// 64-bit signed integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// 64-bit floating point number.
    Float(f64),
    /// Complex number.
    Complex {
        /// Real component.
        re: f64,
        /// Imaginary component.
        im: f64,
    },
    /// Ordered sequence.
    List(Vec<Value>),
    /// Fixed-arity ordered sequence.
    Tuple(Vec<Value>),
    /// Unordered collection, mutable flavor.
    Set(BTreeSet<Value>),
    /// Unordered collection, immutable flavor.
    FrozenSet(BTreeSet<Value>),
    /// Key-value mapping. Keys may be any `Value`.
    Map(BTreeMap<Value, Value>),
    /// A caller-defined value: a named wrapper around a structured
    /// representation, serialized through a caller-registered codec.
    Extension {
        /// Name of the extension type, matching its registry entry.
        kind: Arc<str>,
        /// The structured representation the extension codec works on.
        inner: Box<Value>,
    },
}

impl Value {
    /// The runtime type of this value, as used for serializer dispatch.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Text(_) => ValueKind::Text,
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::Float(_) => ValueKind::Float,
            Self::Complex { .. } => ValueKind::Complex,
            Self::List(_) => ValueKind::List,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::Set(_) => ValueKind::Set,
            Self::FrozenSet(_) => ValueKind::FrozenSet,
            Self::Map(_) => ValueKind::Map,
            Self::Extension { kind, .. } => ValueKind::Extension(Arc::clone(kind)),
        }
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if it is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is text.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a byte slice if it is bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements of an ordered sequence (list or tuple).
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a mapping if it is one.
    #[inline]
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Build a frozen set value from anything iterable.
    pub fn frozen_set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::FrozenSet(items.into_iter().collect())
    }

    /// Build a mutable set value from anything iterable.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Ordering rank of the variant, used only to order values of
    /// differing variants.
    const fn rank(&self) -> u8 {
        match self {
            Self::Bytes(_) => 0,
            Self::Text(_) => 1,
            Self::Int(_) => 2,
            Self::Bool(_) => 3,
            Self::Float(_) => 4,
            Self::Complex { .. } => 5,
            Self::List(_) => 6,
            Self::Tuple(_) => 7,
            Self::Set(_) => 8,
            Self::FrozenSet(_) => 9,
            Self::Map(_) => 10,
            Self::Extension { .. } => 11,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Complex { re: a, im: b }, Self::Complex { re: c, im: d }) => {
                a.total_cmp(c).then_with(|| b.total_cmp(d))
            }
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) | (Self::FrozenSet(a), Self::FrozenSet(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            (Self::Extension { kind: a, inner: x }, Self::Extension { kind: b, inner: y }) => {
                a.cmp(b).then_with(|| x.cmp(y))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}
