//! Type discriminants used for serializer dispatch.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The runtime type of a [`Value`](crate::types::Value), used as the
/// serialize-side registry key.
///
/// Built-in variants cover the closed value universe; [`ValueKind::Extension`]
/// names a caller-defined type so new codecs can be registered without
/// touching the core enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Opaque bytes.
    Bytes,
    /// UTF-8 text.
    Text,
    /// 64-bit signed integer.
    Int,
    /// Boolean.
    Bool,
    /// 64-bit floating point number.
    Float,
    /// Complex number.
    Complex,
    /// Ordered sequence.
    List,
    /// Fixed-arity ordered sequence.
    Tuple,
    /// Unordered collection, mutable flavor.
    Set,
    /// Unordered collection, immutable flavor.
    FrozenSet,
    /// Key-value mapping.
    Map,
    /// Caller-defined type, identified by name.
    Extension(Arc<str>),
}

impl ValueKind {
    /// Returns the name of an extension kind, or `None` for built-ins.
    #[must_use]
    pub fn extension_name(&self) -> Option<&str> {
        match self {
            Self::Extension(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Built-in names match the wire tags of the built-in codecs.
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Text => f.write_str("str"),
            Self::Int => f.write_str("int"),
            Self::Bool => f.write_str("bool"),
            Self::Float => f.write_str("float"),
            Self::Complex => f.write_str("complex"),
            Self::List => f.write_str("list"),
            Self::Tuple => f.write_str("tuple"),
            Self::Set => f.write_str("set"),
            Self::FrozenSet => f.write_str("frozenset"),
            Self::Map => f.write_str("dict"),
            Self::Extension(name) => write!(f, "extension {name:?}"),
        }
    }
}
