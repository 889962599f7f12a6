//! The extensible type ↔ tag ↔ codec registry and the codec frontend.
//!
//! A [`Registry`] owns two lookup tables: value kind → codec for the encode
//! path and wire tag → codec for the decode path. It is an explicit,
//! constructed, passable object (tests routinely build several independent
//! registries) and [`Registry::with_builtins`] seeds one with codecs for
//! the whole built-in value universe.
//!
//! Lookups take `&self` and registration takes `&mut self`, so concurrent
//! lookups are safe by construction and concurrent registration is a borrow
//! error rather than a data race. Callers that want one process-wide shared
//! instance put the registry behind a lock.

use std::collections::HashMap;
use std::sync::Arc;

use crate::encoding::composite::{FrozenSetCodec, ListCodec, MapCodec, SetCodec, TupleCodec};
use crate::encoding::primitive::{
    BoolCodec, BytesCodec, ComplexCodec, FloatCodec, IntCodec, TextCodec,
};
use crate::encoding::{frame_into, unframe, ValueCodec};
use crate::error::CodecError;
use crate::types::{Value, ValueKind};

/// The extensible codec registry.
#[derive(Default)]
pub struct Registry {
    /// Encode path: value kind → codec (the codec carries its tag).
    serializers: HashMap<ValueKind, Arc<dyn ValueCodec>>,
    /// Decode path: wire tag → codec.
    deserializers: HashMap<String, Arc<dyn ValueCodec>>,
}

impl Registry {
    /// Create an empty registry with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with codecs for every built-in value type.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.install(ValueKind::Bytes, Arc::new(BytesCodec));
        registry.install(ValueKind::Text, Arc::new(TextCodec));
        registry.install(ValueKind::Int, Arc::new(IntCodec));
        registry.install(ValueKind::Bool, Arc::new(BoolCodec));
        registry.install(ValueKind::Float, Arc::new(FloatCodec));
        registry.install(ValueKind::Complex, Arc::new(ComplexCodec));
        registry.install(ValueKind::List, Arc::new(ListCodec));
        registry.install(ValueKind::Tuple, Arc::new(TupleCodec));
        registry.install(ValueKind::Set, Arc::new(SetCodec));
        registry.install(ValueKind::FrozenSet, Arc::new(FrozenSetCodec));
        registry.install(ValueKind::Map, Arc::new(MapCodec));
        registry
    }

    /// Seed one built-in codec. Built-in kinds and tags are distinct by
    /// construction, so no conflict checking is needed here.
    fn install(&mut self, kind: ValueKind, codec: Arc<dyn ValueCodec>) {
        self.deserializers.insert(codec.tag().to_owned(), Arc::clone(&codec));
        self.serializers.insert(kind, codec);
    }

    /// Register a codec for `kind` on both the encode and decode paths.
    ///
    /// Registration is idempotent: re-registering the *same* codec (the same
    /// `Arc`) for the same kind is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CodecError::DuplicateTag`] if the codec's tag is already bound to
    ///   a different codec.
    /// - [`CodecError::DuplicateType`] if `kind` is already bound to a
    ///   different codec.
    pub fn register(&mut self, kind: ValueKind, codec: Arc<dyn ValueCodec>) -> Result<(), CodecError> {
        self.check_tag_free(&codec)?;
        self.check_kind_free(&kind, &codec)?;
        self.install(kind, codec);
        Ok(())
    }

    /// Register only the encode side for `kind`.
    ///
    /// Legal but one-sided: values of `kind` become serializable while the
    /// produced bytes stay non-decodable by this registry until a matching
    /// [`Registry::register_deserializer`] call.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DuplicateType`] on a conflicting binding.
    pub fn register_serializer(
        &mut self,
        kind: ValueKind,
        codec: Arc<dyn ValueCodec>,
    ) -> Result<(), CodecError> {
        self.check_kind_free(&kind, &codec)?;
        self.serializers.insert(kind, codec);
        Ok(())
    }

    /// Register only the decode side, keyed by the codec's tag.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DuplicateTag`] on a conflicting binding.
    pub fn register_deserializer(&mut self, codec: Arc<dyn ValueCodec>) -> Result<(), CodecError> {
        self.check_tag_free(&codec)?;
        self.deserializers.insert(codec.tag().to_owned(), codec);
        Ok(())
    }

    fn check_tag_free(&self, codec: &Arc<dyn ValueCodec>) -> Result<(), CodecError> {
        if let Some(existing) = self.deserializers.get(codec.tag()) {
            if !Arc::ptr_eq(existing, codec) {
                return Err(CodecError::DuplicateTag(codec.tag().to_owned()));
            }
        }
        Ok(())
    }

    fn check_kind_free(
        &self,
        kind: &ValueKind,
        codec: &Arc<dyn ValueCodec>,
    ) -> Result<(), CodecError> {
        if let Some(existing) = self.serializers.get(kind) {
            if !Arc::ptr_eq(existing, codec) {
                return Err(CodecError::DuplicateType(kind.clone()));
            }
        }
        Ok(())
    }

    /// Look up the codec that serializes values of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnregisteredType`] when absent. No fallback or
    /// reflection-based guessing is attempted.
    pub fn serializer_for(&self, kind: &ValueKind) -> Result<&Arc<dyn ValueCodec>, CodecError> {
        self.serializers.get(kind).ok_or_else(|| CodecError::UnregisteredType(kind.clone()))
    }

    /// Look up the codec that deserializes payloads tagged `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnregisteredTag`] when absent.
    pub fn deserializer_for(&self, tag: &str) -> Result<&Arc<dyn ValueCodec>, CodecError> {
        self.deserializers.get(tag).ok_or_else(|| CodecError::UnregisteredTag(tag.to_owned()))
    }

    /// Serialize a value into one self-describing framed message.
    ///
    /// This is the only place framing is applied on the encode path; codecs
    /// produce raw payloads and recurse back through this entry point for
    /// their elements.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnregisteredType`] if the value (or any nested
    /// element) has no registered serializer, or whatever error the codec
    /// itself raises. Nothing is produced on failure.
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let codec = self.serializer_for(&value.kind())?;
        let payload = codec.encode(value, self)?;
        let tag = codec.tag().as_bytes();
        let mut out = Vec::with_capacity(2 * crate::encoding::LEN_PREFIX_SIZE + tag.len() + payload.len());
        frame_into(&mut out, tag)?;
        frame_into(&mut out, &payload)?;
        Ok(out)
    }

    /// Deserialize a buffer holding exactly one message.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ExtraTrailingData`] if anything follows the
    /// message, plus every decode-path error [`Registry::decode_message`]
    /// can raise.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let (value, rest) = self.decode_message(bytes)?;
        if !rest.is_empty() {
            return Err(CodecError::ExtraTrailingData(rest.len()));
        }
        Ok(value)
    }

    /// Decode exactly one message off the front of `bytes` and return the
    /// remainder.
    ///
    /// This is the cursor primitive composite codecs iterate to walk their
    /// concatenated element messages.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TruncatedBuffer`] on short input,
    /// [`CodecError::UnregisteredTag`] for unknown (or non-UTF-8) tags, and
    /// whatever the tag's codec raises for the payload.
    pub fn decode_message<'a>(&self, bytes: &'a [u8]) -> Result<(Value, &'a [u8]), CodecError> {
        let (tag_bytes, rest) = unframe(bytes)?;
        let tag = std::str::from_utf8(tag_bytes)
            .map_err(|_| CodecError::UnregisteredTag(String::from_utf8_lossy(tag_bytes).into_owned()))?;
        let codec = self.deserializer_for(tag)?;
        let (payload, rest) = unframe(rest)?;
        let value = codec.decode(payload, self)?;
        Ok((value, rest))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.deserializers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry")
            .field("serializers", &self.serializers.len())
            .field("tags", &tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An extension codec that stores a 2D point as a tuple of two ints.
    #[derive(Debug)]
    struct PointCodec;

    impl PointCodec {
        const KIND: &'static str = "point";
    }

    impl ValueCodec for PointCodec {
        fn tag(&self) -> &str {
            "point"
        }

        fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
            let Value::Extension { kind, inner } = value else {
                return Err(CodecError::TypeMismatch { expected: "point", actual: value.kind() });
            };
            debug_assert_eq!(kind.as_ref(), Self::KIND);
            registry.serialize(inner)
        }

        fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
            let inner = registry.deserialize(payload)?;
            Ok(Value::Extension { kind: Arc::from(Self::KIND), inner: Box::new(inner) })
        }
    }

    fn point(x: i64, y: i64) -> Value {
        Value::Extension {
            kind: Arc::from(PointCodec::KIND),
            inner: Box::new(Value::Tuple(vec![Value::Int(x), Value::Int(y)])),
        }
    }

    #[test]
    fn serialize_frames_tag_and_payload() {
        let registry = Registry::with_builtins();
        let bytes = registry.serialize(&Value::Int(5)).unwrap();
        // frame("int") ++ frame(5 as i64 be)
        assert_eq!(
            bytes,
            [0, 0, 0, 3, b'i', b'n', b't', 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, 5]
        );
    }

    #[test]
    fn deserialize_rejects_trailing_bytes() {
        let registry = Registry::with_builtins();
        let mut bytes = registry.serialize(&Value::Bool(true)).unwrap();
        bytes.extend_from_slice(b"garbage");
        let err = registry.deserialize(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::ExtraTrailingData(7)));
    }

    #[test]
    fn unregistered_type_produces_no_bytes() {
        let registry = Registry::new();
        let err = registry.serialize(&Value::Int(5)).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredType(ValueKind::Int)));
    }

    #[test]
    fn unregistered_tag_is_rejected() {
        let empty = Registry::new();
        let seeded = Registry::with_builtins();
        let bytes = seeded.serialize(&Value::Int(5)).unwrap();
        let err = empty.deserialize(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredTag(tag) if tag == "int"));
    }

    #[test]
    fn non_utf8_tag_is_rejected() {
        let registry = Registry::with_builtins();
        let mut bytes = Vec::new();
        frame_into(&mut bytes, &[0xFF, 0xFE]).unwrap();
        frame_into(&mut bytes, b"").unwrap();
        let err = registry.deserialize(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredTag(_)));
    }

    #[test]
    fn registration_is_idempotent_for_identical_codec() {
        let mut registry = Registry::with_builtins();
        let codec: Arc<dyn ValueCodec> = Arc::new(PointCodec);
        let kind = ValueKind::Extension(Arc::from(PointCodec::KIND));
        registry.register(kind.clone(), Arc::clone(&codec)).unwrap();
        // Same Arc again: fine.
        registry.register(kind.clone(), Arc::clone(&codec)).unwrap();
        // A distinct codec under the same tag: rejected.
        let err = registry.register(kind, Arc::new(PointCodec)).unwrap_err();
        assert!(matches!(err, CodecError::DuplicateTag(tag) if tag == "point"));
    }

    #[test]
    fn conflicting_kind_is_rejected() {
        let mut registry = Registry::with_builtins();
        let err = registry
            .register_serializer(ValueKind::Int, Arc::new(PointCodec))
            .unwrap_err();
        assert!(matches!(err, CodecError::DuplicateType(ValueKind::Int)));
    }

    #[test]
    fn extension_roundtrip_through_containers() {
        let mut registry = Registry::with_builtins();
        registry
            .register(ValueKind::Extension(Arc::from(PointCodec::KIND)), Arc::new(PointCodec))
            .unwrap();

        let value = Value::List(vec![point(1, 2), point(-3, 4)]);
        let bytes = registry.serialize(&value).unwrap();
        assert_eq!(registry.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn one_sided_registration_leaves_bytes_undecodable() {
        let mut registry = Registry::with_builtins();
        registry
            .register_serializer(
                ValueKind::Extension(Arc::from(PointCodec::KIND)),
                Arc::new(PointCodec),
            )
            .unwrap();

        let bytes = registry.serialize(&point(7, 8)).unwrap();
        let err = registry.deserialize(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredTag(tag) if tag == "point"));
    }
}
