//! tagwire core
//!
//! This crate provides the wire codec for `tagwire`: a safe, extensible
//! binary serialization of structured in-memory values. Nothing here
//! executes code during deserialization; decoding is a pure function from
//! bytes to [`types::Value`], driven by an explicit codec registry.
//!
//! # Modules
//!
//! - [`types`] - The dynamic value universe ([`types::Value`], [`types::ValueKind`])
//! - [`encoding`] - Framing, the [`encoding::ValueCodec`] interface, and built-in codecs
//! - [`registry`] - The type ↔ tag ↔ codec registry and the `serialize`/`deserialize` frontend
//! - [`error`] - The codec error taxonomy

pub mod encoding;
pub mod error;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use encoding::ValueCodec;
pub use error::CodecError;
pub use registry::Registry;
pub use types::{Value, ValueKind};
