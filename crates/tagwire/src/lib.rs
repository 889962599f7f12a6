//! tagwire: safe, extensible binary serialization with shape verification
//!
//! tagwire turns structured in-memory values into self-describing framed
//! byte sequences and back, without ever executing code during
//! deserialization, and separately checks values against declarative shape
//! specifications.
//!
//! # Quick Start
//!
//! ## Serializing values
//!
//! ```
//! use tagwire::{deserialize, serialize, Value};
//!
//! let value = Value::List(vec![Value::Int(1), Value::from("two")]);
//! let bytes = serialize(&value)?;
//! assert_eq!(deserialize(&bytes)?, value);
//! # Ok::<(), tagwire::CodecError>(())
//! ```
//!
//! ## Verifying shapes
//!
//! ```
//! use tagwire::{verify, Spec, Value, ValueKind};
//!
//! let spec = Spec::list_of(Spec::plain(ValueKind::Int));
//! assert!(verify(&Value::List(vec![Value::Int(1)]), &spec));
//! assert!(!verify(&Value::from("not a list"), &spec));
//! ```
//!
//! ## Registering extension types
//!
//! The free functions above use one process-wide registry seeded with the
//! built-in codecs; [`register`] extends it. Code that wants isolation,
//! tests especially, builds its own [`Registry`] instead and calls its
//! methods directly.

use std::sync::{Arc, OnceLock, RwLock};

pub use tagwire_core::{CodecError, Registry, Value, ValueCodec, ValueKind};
pub use tagwire_core::{encoding, error, registry, types};
pub use tagwire_verify::{verify, ContainerKind, LenConstraint, Spec};

/// The process-wide default registry, seeded with built-ins on first use.
fn default_registry() -> &'static RwLock<Registry> {
    static DEFAULT: OnceLock<RwLock<Registry>> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        tracing::debug!("seeding default codec registry with built-ins");
        RwLock::new(Registry::with_builtins())
    })
}

/// Serialize a value through the process-wide default registry.
///
/// # Errors
///
/// See [`Registry::serialize`].
pub fn serialize(value: &Value) -> Result<Vec<u8>, CodecError> {
    // A poisoned lock only means some registrant panicked; the registry
    // itself is never left half-updated, so reading through is sound.
    let registry = default_registry().read().unwrap_or_else(|e| e.into_inner());
    registry.serialize(value)
}

/// Deserialize a buffer holding exactly one message through the
/// process-wide default registry.
///
/// # Errors
///
/// See [`Registry::deserialize`].
pub fn deserialize(bytes: &[u8]) -> Result<Value, CodecError> {
    let registry = default_registry().read().unwrap_or_else(|e| e.into_inner());
    registry.deserialize(bytes)
}

/// Register an extension codec on the process-wide default registry.
///
/// Takes the registry's exclusive lock for the duration of the call;
/// concurrent [`serialize`]/[`deserialize`] callers block until it is
/// released. Prefer registering during startup.
///
/// # Errors
///
/// See [`Registry::register`].
pub fn register(kind: ValueKind, codec: Arc<dyn ValueCodec>) -> Result<(), CodecError> {
    let mut registry = default_registry().write().unwrap_or_else(|e| e.into_inner());
    tracing::debug!(kind = %kind, tag = codec.tag(), "registering extension codec");
    registry.register(kind, codec)
}
