//! Built-in codecs for the composite value types.
//!
//! A composite payload is a concatenation of complete framed messages, one
//! per element, each produced by [`Registry::serialize`]. Decoding walks the
//! shrinking remainder with [`Registry::decode_message`] until the payload
//! is exhausted, so nesting is unbounded and elements may be of any
//! registered type, extensions included.
//!
//! Mappings are flattened to a `2N`-element sequence (key, value, key,
//! value, …); the decoder pairs the elements back up.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CodecError;
use crate::registry::Registry;
use crate::types::Value;

use super::traits::ValueCodec;

/// Serialize each element in turn and concatenate the framed messages.
fn encode_elements<'a>(
    items: impl Iterator<Item = &'a Value>,
    registry: &Registry,
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    for item in items {
        out.extend_from_slice(&registry.serialize(item)?);
    }
    Ok(out)
}

/// Decode framed messages off the front of `payload` until it is exhausted.
///
/// Any element failure is wrapped in [`CodecError::NestedDecode`] carrying
/// the element's position, rather than being silently dropped.
fn decode_elements(payload: &[u8], registry: &Registry) -> Result<Vec<Value>, CodecError> {
    let mut items = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (value, remainder) = registry
            .decode_message(rest)
            .map_err(|cause| CodecError::nested(items.len(), cause))?;
        items.push(value);
        rest = remainder;
    }
    Ok(items)
}

/// Codec for ordered sequences.
#[derive(Debug)]
pub struct ListCodec;

impl ValueCodec for ListCodec {
    fn tag(&self) -> &str {
        "list"
    }

    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::List(items) = value else {
            return Err(CodecError::TypeMismatch { expected: "list", actual: value.kind() });
        };
        encode_elements(items.iter(), registry)
    }

    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
        Ok(Value::List(decode_elements(payload, registry)?))
    }
}

/// Codec for fixed-arity ordered sequences.
///
/// Same wire layout as `list`; the tag is what makes the decoded container
/// fixed-arity rather than open-ended.
#[derive(Debug)]
pub struct TupleCodec;

impl ValueCodec for TupleCodec {
    fn tag(&self) -> &str {
        "tuple"
    }

    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Tuple(items) = value else {
            return Err(CodecError::TypeMismatch { expected: "tuple", actual: value.kind() });
        };
        encode_elements(items.iter(), registry)
    }

    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
        Ok(Value::Tuple(decode_elements(payload, registry)?))
    }
}

/// Codec for the mutable unordered collection.
///
/// Elements are written in the set's deterministic iteration order; only
/// round-trip set equality is guaranteed, never byte identity with whatever
/// order a peer produced.
#[derive(Debug)]
pub struct SetCodec;

impl ValueCodec for SetCodec {
    fn tag(&self) -> &str {
        "set"
    }

    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Set(items) = value else {
            return Err(CodecError::TypeMismatch { expected: "set", actual: value.kind() });
        };
        encode_elements(items.iter(), registry)
    }

    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
        let items: BTreeSet<Value> = decode_elements(payload, registry)?.into_iter().collect();
        Ok(Value::Set(items))
    }
}

/// Codec for the immutable unordered collection.
#[derive(Debug)]
pub struct FrozenSetCodec;

impl ValueCodec for FrozenSetCodec {
    fn tag(&self) -> &str {
        "frozenset"
    }

    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::FrozenSet(items) = value else {
            return Err(CodecError::TypeMismatch { expected: "frozenset", actual: value.kind() });
        };
        encode_elements(items.iter(), registry)
    }

    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
        let items: BTreeSet<Value> = decode_elements(payload, registry)?.into_iter().collect();
        Ok(Value::FrozenSet(items))
    }
}

/// Codec for key-value mappings.
#[derive(Debug)]
pub struct MapCodec;

impl ValueCodec for MapCodec {
    fn tag(&self) -> &str {
        "dict"
    }

    fn encode(&self, value: &Value, registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Map(map) = value else {
            return Err(CodecError::TypeMismatch { expected: "dict", actual: value.kind() });
        };
        encode_elements(map.iter().flat_map(|(k, v)| [k, v]), registry)
    }

    fn decode(&self, payload: &[u8], registry: &Registry) -> Result<Value, CodecError> {
        let items = decode_elements(payload, registry)?;
        if items.len() % 2 != 0 {
            return Err(CodecError::OddEntryCount(items.len()));
        }
        let mut map = BTreeMap::new();
        let mut iter = items.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::with_builtins()
    }

    #[test]
    fn empty_list_has_empty_payload() {
        let reg = registry();
        let payload = ListCodec.encode(&Value::List(vec![]), &reg).unwrap();
        assert!(payload.is_empty());
        assert_eq!(ListCodec.decode(&payload, &reg).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn list_elements_are_complete_messages() {
        let reg = registry();
        let value = Value::List(vec![Value::Int(5), Value::from("hi")]);
        let payload = ListCodec.encode(&value, &reg).unwrap();

        // The payload must be a concatenation of two standalone messages.
        let (first, rest) = reg.decode_message(&payload).unwrap();
        assert_eq!(first, Value::Int(5));
        let (second, rest) = reg.decode_message(rest).unwrap();
        assert_eq!(second, Value::from("hi"));
        assert!(rest.is_empty());
    }

    #[test]
    fn map_flattens_to_pairs() {
        let reg = registry();
        let mut map = BTreeMap::new();
        map.insert(Value::from("k"), Value::Int(1));
        let payload = MapCodec.encode(&Value::Map(map.clone()), &reg).unwrap();

        let elements = decode_elements(&payload, &reg).unwrap();
        assert_eq!(elements, vec![Value::from("k"), Value::Int(1)]);
        assert_eq!(MapCodec.decode(&payload, &reg).unwrap(), Value::Map(map));
    }

    #[test]
    fn odd_element_count_is_rejected() {
        let reg = registry();
        // A single serialized element is not a valid mapping payload.
        let payload = reg.serialize(&Value::Int(1)).unwrap();
        let err = MapCodec.decode(&payload, &reg).unwrap_err();
        assert!(matches!(err, CodecError::OddEntryCount(1)));
    }

    #[test]
    fn nested_failure_reports_element_index() {
        let reg = registry();
        let mut payload = reg.serialize(&Value::Int(1)).unwrap();
        // Second element: valid framing, unknown tag.
        let mut bogus = Vec::new();
        crate::encoding::frame_into(&mut bogus, b"no-such-tag").unwrap();
        crate::encoding::frame_into(&mut bogus, b"").unwrap();
        payload.extend_from_slice(&bogus);

        let err = ListCodec.decode(&payload, &reg).unwrap_err();
        match err {
            CodecError::NestedDecode { index, cause } => {
                assert_eq!(index, 1);
                assert!(matches!(*cause, CodecError::UnregisteredTag(_)));
            }
            other => panic!("expected NestedDecode, got {other:?}"),
        }
    }

    #[test]
    fn set_roundtrip_ignores_insertion_order() {
        let reg = registry();
        let value = Value::set([Value::Int(3), Value::Int(1), Value::Int(2)]);
        let payload = SetCodec.encode(&value, &reg).unwrap();
        let decoded = SetCodec.decode(&payload, &reg).unwrap();
        assert_eq!(decoded, Value::set([Value::Int(1), Value::Int(2), Value::Int(3)]));
    }
}
