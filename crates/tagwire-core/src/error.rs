//! Error types for the core crate.

use thiserror::Error;

use crate::types::ValueKind;

/// Errors that can occur while encoding or decoding tagwire messages.
///
/// All errors are raised synchronously at the point of detection and are
/// never retried internally; retry policy belongs to whatever transport
/// carries the bytes. Every error is terminal for the operation that raised
/// it: `serialize` and `deserialize` either fully succeed or leave nothing
/// behind.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A payload was too large for the fixed-width length prefix.
    ///
    /// The length prefix is never silently truncated; a payload that does
    /// not fit is rejected before any bytes are produced.
    #[error("payload of {len} bytes exceeds the {max}-byte frame limit")]
    OversizedPayload {
        /// The size of the offending payload.
        len: usize,
        /// The largest payload the length prefix can describe.
        max: usize,
    },

    /// A buffer ended before the bytes its length prefix declared.
    #[error("truncated buffer: needed {needed} bytes, had {available}")]
    TruncatedBuffer {
        /// How many bytes the frame required.
        needed: usize,
        /// How many bytes were actually present.
        available: usize,
    },

    /// A buffer contained bytes after one complete message.
    #[error("{0} trailing bytes after a complete message")]
    ExtraTrailingData(usize),

    /// A tag is already bound to a different deserializer.
    #[error("tag {0:?} is already bound to a different deserializer")]
    DuplicateTag(String),

    /// A value type is already bound to a different serializer.
    #[error("type {0} is already bound to a different serializer")]
    DuplicateType(ValueKind),

    /// No serializer is registered for the value's type.
    #[error("no serializer registered for type {0}")]
    UnregisteredType(ValueKind),

    /// No deserializer is registered for the message's tag.
    #[error("no deserializer registered for tag {0:?}")]
    UnregisteredTag(String),

    /// A codec was invoked with a value of the wrong variant.
    ///
    /// Registry dispatch makes this unreachable for well-behaved codecs;
    /// hitting it means a codec was registered under the wrong kind.
    #[error("codec for {expected} invoked with a {actual} value")]
    TypeMismatch {
        /// The variant the codec handles.
        expected: &'static str,
        /// The variant it was given.
        actual: ValueKind,
    },

    /// A primitive payload could not correspond to any value of its type.
    #[error("malformed {kind} payload: {reason}")]
    MalformedPrimitive {
        /// The wire tag of the primitive being decoded.
        kind: &'static str,
        /// What made the payload unusable.
        reason: String,
    },

    /// A mapping payload decoded to an odd number of elements.
    ///
    /// Well-formed producers always emit key/value pairs, so this signals
    /// either corruption or a hostile payload.
    #[error("mapping payload decoded to an odd number of elements ({0})")]
    OddEntryCount(usize),

    /// A composite element failed to decode.
    ///
    /// Wraps the underlying cause so the failing sub-element's context is
    /// preserved without losing the operation that triggered it.
    #[error("failed to decode element {index}")]
    NestedDecode {
        /// Position of the failing element within its composite payload.
        index: usize,
        /// The underlying decode failure.
        #[source]
        cause: Box<CodecError>,
    },
}

impl CodecError {
    /// Wrap a decode failure that occurred inside a composite payload.
    pub(crate) fn nested(index: usize, cause: CodecError) -> Self {
        Self::NestedDecode { index, cause: Box::new(cause) }
    }

    /// Shorthand for a malformed-primitive failure.
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedPrimitive { kind, reason: reason.into() }
    }
}
