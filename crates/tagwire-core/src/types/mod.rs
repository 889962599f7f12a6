//! Core data types: the dynamic value universe and its type discriminants.

mod kind;
mod value;

pub use kind::ValueKind;
pub use value::Value;
