//! tagwire verification
//!
//! Structural shape verification for tagwire values: build a [`Spec`] tree
//! out of a small closed algebra (plain type, custom predicate, sum,
//! product, homogeneous container, mapping), then check any [`Value`]
//! against it with [`verify`]. Verification is independent of the codec; the
//! two share only the value universe.
//!
//! # Example
//!
//! ```
//! use tagwire_core::types::{Value, ValueKind};
//! use tagwire_verify::{verify, LenConstraint, Spec};
//!
//! // A non-empty list of ints or short strings.
//! let spec = Spec::list_of(Spec::sum([
//!     Spec::plain(ValueKind::Int),
//!     Spec::predicate(|v| v.as_text().is_some_and(|s| s.len() <= 8)),
//! ]))
//! .with_len(LenConstraint::at_least(1));
//!
//! let value = Value::List(vec![Value::Int(1), Value::from("ok")]);
//! assert!(verify(&value, &spec));
//! assert!(!verify(&Value::List(vec![]), &spec));
//! ```

mod engine;
mod spec;

pub use engine::verify;
pub use spec::{ContainerKind, LenConstraint, Spec};
