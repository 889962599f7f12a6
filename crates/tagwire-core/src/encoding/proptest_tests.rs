//! Property-based tests for encoding round-trips.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use crate::encoding::{frame, unframe};
use crate::registry::Registry;
use crate::types::Value;

/// Strategy for generating arbitrary `Value` instances.
///
/// Extension values are excluded: they need a caller-registered codec and
/// are exercised by the registry tests instead. Floats are not filtered for
/// NaN; `Value` equality uses a total order, so NaN round-trips like any
/// other bit pattern.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        ".*".prop_map(Value::Text),
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::Float),
        (any::<f64>(), any::<f64>()).prop_map(|(re, im)| Value::Complex { re, im }),
    ];

    leaf.prop_recursive(
        3,  // depth
        48, // size
        8,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Tuple),
                prop::collection::btree_set(inner.clone(), 0..8).prop_map(Value::Set),
                prop::collection::btree_set(inner.clone(), 0..8).prop_map(Value::FrozenSet),
                prop::collection::btree_map(inner.clone(), inner, 0..8).prop_map(Value::Map),
            ]
        },
    )
}

proptest! {
    #[test]
    fn value_roundtrip(value in arb_value()) {
        let registry = Registry::with_builtins();
        let encoded = registry.serialize(&value).expect("encoding should succeed");
        let decoded = registry.deserialize(&encoded).expect("decoding should succeed");
        prop_assert_eq!(value, decoded);
    }

    #[test]
    fn framing_is_exact(payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let framed = frame(&payload).expect("framing should succeed");
        let (recovered, rest) = unframe(&framed).expect("unframing should succeed");
        prop_assert_eq!(recovered, payload.as_slice());
        prop_assert!(rest.is_empty());
    }

    #[test]
    fn messages_are_self_delimiting(value in arb_value(), garbage in prop::collection::vec(any::<u8>(), 1..32)) {
        let registry = Registry::with_builtins();
        let mut encoded = registry.serialize(&value).expect("encoding should succeed");
        encoded.extend_from_slice(&garbage);
        // One message followed by garbage must be rejected outright...
        prop_assert!(registry.deserialize(&encoded).is_err());
        // ...while cursor extraction recovers the message and the garbage.
        let (decoded, rest) = registry.decode_message(&encoded).expect("extraction should succeed");
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(rest, garbage.as_slice());
    }

    #[test]
    fn int_value_preserves_bits(i in any::<i64>()) {
        let registry = Registry::with_builtins();
        let encoded = registry.serialize(&Value::Int(i)).expect("encoding should succeed");
        let decoded = registry.deserialize(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded.as_int(), Some(i));
    }

    #[test]
    fn float_value_preserves_bits(f in any::<f64>()) {
        let registry = Registry::with_builtins();
        let encoded = registry.serialize(&Value::Float(f)).expect("encoding should succeed");
        let decoded = registry.deserialize(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded.as_float().map(f64::to_bits), Some(f.to_bits()));
    }

    #[test]
    fn truncated_buffers_never_decode(value in arb_value()) {
        let registry = Registry::with_builtins();
        let encoded = registry.serialize(&value).expect("encoding should succeed");
        // Dropping the final byte must always fail somewhere in the chain;
        // the exact error depends on which frame the cut lands in.
        prop_assert!(registry.deserialize(&encoded[..encoded.len() - 1]).is_err());
    }
}
