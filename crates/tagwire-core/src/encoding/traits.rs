//! The codec interface the registry dispatches through.

use crate::error::CodecError;
use crate::registry::Registry;
use crate::types::Value;

/// A serializer/deserializer pair for one value type.
///
/// A codec produces and consumes *raw, unframed* payloads: the codec
/// frontend ([`Registry::serialize`] and [`Registry::deserialize`]) is the
/// only place tag and length framing is applied, so codecs never manage
/// framing themselves. Composite codecs recurse through the registry they
/// are handed, which is what makes nesting unbounded and extension types
/// embeddable inside built-in containers.
///
/// Implementations are stateless and shared (`Send + Sync`); the registry
/// stores them behind `Arc`.
pub trait ValueCodec: Send + Sync {
    /// The short string identifying this codec's type on the wire.
    ///
    /// Tags are bijective within a registry instance: no two registered
    /// codecs may share one.
    fn tag(&self) -> &str;

    /// Encode `value` into a raw payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded, or if a nested
    /// element of a composite has no registered serializer.
    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError>;

    /// Decode a raw payload back into a value. Exact inverse of `encode`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedPrimitive`] for byte sequences that
    /// cannot correspond to any value of this type, or a
    /// [`CodecError::NestedDecode`] wrapping the cause when a composite
    /// element fails.
    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError>;
}
