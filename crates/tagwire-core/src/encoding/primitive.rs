//! Built-in codecs for the primitive value types.
//!
//! Each codec produces a raw, unframed payload:
//!
//! - `bytes`: the bytes themselves
//! - `str`: UTF-8
//! - `int`: 8 bytes, big-endian two's-complement i64
//! - `bool`: one byte, `0x00` = false, `0x01` = true
//! - `float`: 8 bytes, big-endian IEEE 754
//! - `complex`: 16 bytes, real then imaginary, each as `float`
//!
//! Numeric encodings are fixed-width binary, so every payload length is
//! known in advance and anything else is malformed.

use crate::error::CodecError;
use crate::registry::Registry;
use crate::types::Value;

use super::traits::ValueCodec;

/// Codec for opaque bytes.
#[derive(Debug)]
pub struct BytesCodec;

impl ValueCodec for BytesCodec {
    fn tag(&self) -> &str {
        "bytes"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Bytes(bytes) = value else {
            return Err(CodecError::TypeMismatch { expected: "bytes", actual: value.kind() });
        };
        Ok(bytes.clone())
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        Ok(Value::Bytes(payload.to_vec()))
    }
}

/// Codec for UTF-8 text.
#[derive(Debug)]
pub struct TextCodec;

impl ValueCodec for TextCodec {
    fn tag(&self) -> &str {
        "str"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Text(text) = value else {
            return Err(CodecError::TypeMismatch { expected: "str", actual: value.kind() });
        };
        Ok(text.as_bytes().to_vec())
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        let text = String::from_utf8(payload.to_vec())
            .map_err(|e| CodecError::malformed("str", format!("invalid UTF-8: {e}")))?;
        Ok(Value::Text(text))
    }
}

/// Codec for 64-bit signed integers.
#[derive(Debug)]
pub struct IntCodec;

impl ValueCodec for IntCodec {
    fn tag(&self) -> &str {
        "int"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Int(n) = value else {
            return Err(CodecError::TypeMismatch { expected: "int", actual: value.kind() });
        };
        Ok(n.to_be_bytes().to_vec())
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        let bytes: [u8; 8] = payload
            .try_into()
            .map_err(|_| CodecError::malformed("int", format!("expected 8 bytes, got {}", payload.len())))?;
        Ok(Value::Int(i64::from_be_bytes(bytes)))
    }
}

/// Codec for booleans.
#[derive(Debug)]
pub struct BoolCodec;

impl ValueCodec for BoolCodec {
    fn tag(&self) -> &str {
        "bool"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Bool(b) = value else {
            return Err(CodecError::TypeMismatch { expected: "bool", actual: value.kind() });
        };
        Ok(vec![u8::from(*b)])
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        match payload {
            [0x00] => Ok(Value::Bool(false)),
            [0x01] => Ok(Value::Bool(true)),
            [other] => Err(CodecError::malformed("bool", format!("invalid discriminant {other:#04x}"))),
            _ => Err(CodecError::malformed("bool", format!("expected 1 byte, got {}", payload.len()))),
        }
    }
}

/// Codec for 64-bit floats.
#[derive(Debug)]
pub struct FloatCodec;

impl ValueCodec for FloatCodec {
    fn tag(&self) -> &str {
        "float"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Float(f) = value else {
            return Err(CodecError::TypeMismatch { expected: "float", actual: value.kind() });
        };
        Ok(f.to_be_bytes().to_vec())
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        let bytes: [u8; 8] = payload
            .try_into()
            .map_err(|_| CodecError::malformed("float", format!("expected 8 bytes, got {}", payload.len())))?;
        Ok(Value::Float(f64::from_be_bytes(bytes)))
    }
}

/// Codec for complex numbers.
///
/// The two components are fixed-width floats, so they are self-delimiting
/// and need no separator between them.
#[derive(Debug)]
pub struct ComplexCodec;

impl ValueCodec for ComplexCodec {
    fn tag(&self) -> &str {
        "complex"
    }

    fn encode(&self, value: &Value, _registry: &Registry) -> Result<Vec<u8>, CodecError> {
        let Value::Complex { re, im } = value else {
            return Err(CodecError::TypeMismatch { expected: "complex", actual: value.kind() });
        };
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&re.to_be_bytes());
        out.extend_from_slice(&im.to_be_bytes());
        Ok(out)
    }

    fn decode(&self, payload: &[u8], _registry: &Registry) -> Result<Value, CodecError> {
        if payload.len() != 16 {
            return Err(CodecError::malformed(
                "complex",
                format!("expected 16 bytes, got {}", payload.len()),
            ));
        }
        let re: [u8; 8] = payload[..8]
            .try_into()
            .map_err(|_| CodecError::malformed("complex", "failed to read real component"))?;
        let im: [u8; 8] = payload[8..]
            .try_into()
            .map_err(|_| CodecError::malformed("complex", "failed to read imaginary component"))?;
        Ok(Value::Complex { re: f64::from_be_bytes(re), im: f64::from_be_bytes(im) })
    }
}
