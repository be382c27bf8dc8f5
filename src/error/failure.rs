//! Assertion failure types.
//!
//! This module provides [`Failure`] for a single rejected predicate call and
//! [`Failures`] for an ordered, non-empty batch of them.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::prelude::*;

use crate::code::Code;

/// A single assertion failure with full context.
///
/// `Failure` captures everything a caller needs to react to a rejected value:
/// - **code**: Which predicate rejected it
/// - **message**: Human-readable description of the failure
/// - **value**: The offending input
/// - **property_path**: Which logical field it belongs to, if known
/// - **constraints**: The bounds the predicate checked against
///
/// Failures are immutable once built; the `with_*` methods consume and
/// return a new value.
///
/// # Example
///
/// ```rust
/// use tripwire::{Code, Failure};
/// use serde_json::json;
///
/// let failure = Failure::new(Code::InvalidMinLength, "too short", json!("ab"))
///     .with_property_path("user.name")
///     .with_constraint("min_length", json!(3));
///
/// assert_eq!(failure.code(), Code::InvalidMinLength);
/// assert_eq!(failure.property_path(), Some("user.name"));
/// assert_eq!(failure.constraints()["min_length"], json!(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    code: Code,
    message: String,
    value: Value,
    property_path: Option<String>,
    constraints: IndexMap<String, Value>,
    assertion: Option<String>,
}

impl Failure {
    /// Creates a failure with no property path and no constraints.
    pub fn new(code: Code, message: impl Into<String>, value: Value) -> Self {
        Self {
            code,
            message: message.into(),
            value,
            property_path: None,
            constraints: IndexMap::new(),
            assertion: None,
        }
    }

    /// Sets the property path and returns self for chaining.
    pub fn with_property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    /// Adds a named constraint and returns self for chaining.
    pub fn with_constraint(mut self, name: impl Into<String>, value: Value) -> Self {
        self.constraints.insert(name.into(), value);
        self
    }

    /// Replaces the whole constraints map and returns self for chaining.
    pub fn with_constraints(mut self, constraints: IndexMap<String, Value>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Records the name of the assertion that produced this failure.
    pub fn with_assertion(mut self, name: impl Into<String>) -> Self {
        self.assertion = Some(name.into());
        self
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn property_path(&self) -> Option<&str> {
        self.property_path.as_deref()
    }

    pub fn constraints(&self) -> &IndexMap<String, Value> {
        &self.constraints
    }

    /// Name of the predicate that failed, when raised through a source.
    pub fn assertion(&self) -> Option<&str> {
        self.assertion.as_deref()
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property_path {
            Some(ref path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Failure {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failure>();
    assert_sync::<Failure>();
};

/// A non-empty, ordered collection of failures.
///
/// `Failures` wraps a `NonEmptyVec<Failure>`, so a failed verification always
/// carries at least one failure. Order is the order the failures were
/// collected in.
///
/// # Example
///
/// ```rust
/// use tripwire::{Code, Failure, Failures};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let a = Failures::single(
///     Failure::new(Code::InvalidEmail, "bad email", json!("x")).with_property_path("email"),
/// );
/// let b = Failures::single(
///     Failure::new(Code::InvalidMin, "too young", json!(3)).with_property_path("age"),
/// );
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.at_path("age").len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failures(NonEmptyVec<Failure>);

impl Failures {
    /// Creates a collection containing a single failure.
    pub fn single(failure: Failure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a collection from a vec, or `None` when it is empty.
    pub fn from_vec(failures: Vec<Failure>) -> Option<Self> {
        NonEmptyVec::from_vec(failures).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.0.iter()
    }

    pub fn first(&self) -> &Failure {
        self.0.head()
    }

    /// Returns all failures recorded for the given property path.
    pub fn at_path(&self, path: &str) -> Vec<&Failure> {
        self.0
            .iter()
            .filter(|f| f.property_path() == Some(path))
            .collect()
    }

    /// Returns all failures with the given code.
    pub fn with_code(&self, code: Code) -> Vec<&Failure> {
        self.0.iter().filter(|f| f.code() == code).collect()
    }

    /// Groups messages by property path, keeping collection order.
    ///
    /// Failures without a path are grouped under the empty string.
    pub fn by_path(&self) -> IndexMap<String, Vec<String>> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for failure in self.0.iter() {
            map.entry(failure.property_path().unwrap_or_default().to_string())
                .or_default()
                .push(failure.message().to_string());
        }
        map
    }

    pub fn into_vec(self) -> Vec<Failure> {
        self.0.into_vec()
    }
}

impl Semigroup for Failures {
    fn combine(self, other: Self) -> Self {
        Failures(self.0.combine(other.0))
    }
}

impl IntoIterator for Failures {
    type Item = Failure;
    type IntoIter = std::vec::IntoIter<Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a Failure;
    type IntoIter = Box<dyn Iterator<Item = &'a Failure> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}
