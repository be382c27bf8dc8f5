//! # Tripwire
//!
//! Runtime assertions over JSON-like values, with fluent chains, lazy
//! aggregation and name-based variants.
//!
//! ## Overview
//!
//! A predicate checks one condition on a value and either passes or
//! returns a [`Failure`] carrying a stable [`Code`], a message, the offending
//! value, an optional property path and the constraints it checked against.
//! Predicates are composed three ways:
//!
//! - [`AssertionChain`]: one subject, many predicates, stops at the first
//!   failure
//! - [`LazyAssertion`]: many subjects, each failure collected, reported at
//!   the end as one aggregate error
//! - [`dispatch()`]: call a predicate by name, including the derived
//!   `null_or_*` and `all_*` variants
//!
//! Calling the API wrong (an unknown predicate, a missing subject, a bad
//! argument) is a [`UsageError`], never a validation failure.
//!
//! ## Core Types
//!
//! - [`Failure`] / [`Failures`]: one rejected value / a non-empty list of them
//! - [`LazyFailure`]: the default aggregate raised by lazy verification
//! - [`Fluent`]: the named predicate methods shared by chains and collectors
//! - [`PredicateSource`] / [`PredicateRegistry`]: where predicates are looked up
//! - [`Assert`]: a predicate source plus an aggregate type
//!
//! ## Example
//!
//! ```rust
//! use tripwire::{lazy, that, Fluent};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), tripwire::Error> {
//! that(json!("alice@example.com")).string()?.email()?;
//!
//! let err = lazy()
//!     .that(json!("bob"), "email").email()
//!     .that(json!(9.9), "age").try_all().integer().between(18, 120)
//!     .verify_now()
//!     .unwrap_err();
//!
//! assert_eq!(err.failures().len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod assert;
pub mod call;
pub mod chain;
pub mod code;
pub mod dispatch;
pub mod error;
pub mod fluent;
pub mod lazy;
pub mod message;
pub mod predicates;
pub mod registry;

pub use assert::Assert;
pub use call::{CallOptions, Invocation};
pub use chain::AssertionChain;
pub use code::Code;
pub use dispatch::dispatch;
pub use error::{
    write_summary, AggregateFailure, Error, Failure, Failures, LazyFailure, UsageError,
    ValidationError,
};
pub use fluent::Fluent;
pub use lazy::LazyAssertion;
pub use message::{Message, MessageParams};
pub use registry::{
    default_registry, default_source, ensure_compatible, PredicateDef, PredicateRegistry,
    PredicateSource,
};

use serde_json::Value;

/// Result alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type alias for lazy verification results using Failures
pub type ValidationResult<T> = stillwater::Validation<T, Failures>;

/// A chain over `value` using the built-in predicates.
pub fn that(value: impl Into<Value>) -> AssertionChain {
    AssertionChain::new(value)
}

/// A chain over `value` whose calls default to `defaults`.
pub fn that_with(value: impl Into<Value>, defaults: CallOptions) -> AssertionChain {
    AssertionChain::with_defaults(value, defaults)
}

/// A chain that checks every element of `values`.
pub fn that_all(values: impl Into<Value>) -> AssertionChain {
    AssertionChain::new(values).all()
}

/// A chain that passes outright when `value` is null.
pub fn that_null_or(value: impl Into<Value>) -> AssertionChain {
    AssertionChain::new(value).null_or()
}

/// An empty lazy collector raising [`LazyFailure`].
pub fn lazy() -> LazyAssertion {
    LazyAssertion::new()
}

/// Calls a built-in predicate by name, `args[0]` being the subject.
pub fn check(name: &str, args: &[Value]) -> Result<()> {
    dispatch(&*default_source(), name, args, &CallOptions::default())
}
