//! Wire encoding: framing, the codec interface, and the built-in codecs.
//!
//! # Wire format
//!
//! A top-level message is two framed spans:
//!
//! ```text
//! message  := frame(tag) ++ frame(payload)
//! frame(b) := len(b) as u32 big-endian ++ b
//! ```
//!
//! The tag names the registered codec that produced the payload;
//! the payload is whatever that codec's [`ValueCodec::encode`] returned.
//! Composite payloads are concatenations of further complete messages, so
//! the format is self-describing at every nesting level.
//!
//! Fixed choices, part of the wire contract: 4-byte big-endian length
//! prefixes, UTF-8 text, 8-byte big-endian integers and floats (see
//! [`primitive`] for the full table).
//!
//! # Example
//!
//! ```
//! use tagwire_core::registry::Registry;
//! use tagwire_core::types::Value;
//!
//! let registry = Registry::with_builtins();
//! let value = Value::List(vec![Value::Int(5), Value::from("hi")]);
//!
//! let bytes = registry.serialize(&value)?;
//! assert_eq!(registry.deserialize(&bytes)?, value);
//! # Ok::<(), tagwire_core::CodecError>(())
//! ```

pub mod composite;
mod frame;
pub mod primitive;
mod traits;

#[cfg(test)]
mod proptest_tests;

pub use frame::{frame, frame_into, unframe, LEN_PREFIX_SIZE, MAX_PAYLOAD_LEN};
pub use traits::ValueCodec;
