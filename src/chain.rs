//! Fluent assertion chains.
//!
//! This module provides [`AssertionChain`], which applies a sequence of
//! predicates to one subject and stops at the first failure.

use serde_json::Value;
use std::sync::Arc;

use crate::call::{CallOptions, Invocation};
use crate::dispatch::{self, ALL_PREFIX};
use crate::error::{Error, UsageError};
use crate::fluent::Fluent;
use crate::registry::{self, PredicateSource};

/// One subject, many predicates.
///
/// Each predicate call runs immediately. A failing call returns its error and
/// consumes the chain, so later calls are never reached. Two modifiers
/// change how later calls behave:
/// - [`all`](Self::all): check every element of the subject instead of the
///   subject itself
/// - [`null_or`](Self::null_or): if the subject is null, every later call
///   passes without running
///
/// # Example
///
/// ```rust
/// use tripwire::{that, Fluent};
/// use serde_json::json;
///
/// # fn main() -> Result<(), tripwire::Error> {
/// that(json!("tripwire")).string()?.min_length(3)?.max_length(20)?;
/// that(json!([1, 2, 3])).all().integer()?.greater_than(0)?;
/// that(json!(null)).null_or().integer()?.eq(10)?;
///
/// let err = that(json!(10)).string().unwrap_err();
/// assert!(err.is_validation());
/// # Ok(())
/// # }
/// ```
pub struct AssertionChain {
    value: Value,
    defaults: CallOptions,
    always_valid: bool,
    all: bool,
    source: Arc<dyn PredicateSource>,
}

impl AssertionChain {
    /// Creates a chain over `value` using the built-in predicates.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::from_parts(value.into(), CallOptions::default(), registry::default_source())
    }

    /// Creates a chain whose calls default to `defaults`' message and
    /// property path.
    pub fn with_defaults(value: impl Into<Value>, defaults: CallOptions) -> Self {
        Self::from_parts(value.into(), defaults, registry::default_source())
    }

    pub(crate) fn from_parts(
        value: Value,
        defaults: CallOptions,
        source: Arc<dyn PredicateSource>,
    ) -> Self {
        Self {
            value,
            defaults,
            always_valid: false,
            all: false,
            source,
        }
    }

    /// Replaces the predicate source.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::IncompatibleSource` if the source does not
    /// expose the built-in catalog. The chain keeps its old source.
    pub fn set_predicate_source(
        &mut self,
        source: Arc<dyn PredicateSource>,
    ) -> Result<(), UsageError> {
        registry::ensure_compatible(&*source)?;
        self.source = source;
        Ok(())
    }

    /// Fluent form of [`set_predicate_source`](Self::set_predicate_source).
    pub fn with_source(mut self, source: Arc<dyn PredicateSource>) -> Result<Self, UsageError> {
        self.set_predicate_source(source)?;
        Ok(self)
    }

    /// Routes every later call through its `all_` variant.
    pub fn all(mut self) -> Self {
        self.set_all();
        self
    }

    /// Makes every later call pass when the subject is null.
    ///
    /// Has no effect on a non-null subject.
    pub fn null_or(mut self) -> Self {
        self.set_null_or();
        self
    }

    pub(crate) fn set_all(&mut self) {
        self.all = true;
    }

    pub(crate) fn set_null_or(&mut self) {
        if self.value.is_null() {
            self.always_valid = true;
        }
    }

    /// The subject under test.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether predicates run against each element of the subject.
    pub fn is_all(&self) -> bool {
        self.all
    }

    /// Whether predicates are skipped because `null_or()` met a null subject.
    ///
    /// ```rust
    /// use serde_json::{json, Value};
    /// use tripwire::AssertionChain;
    ///
    /// let chain = AssertionChain::new(Value::Null).null_or();
    /// assert!(chain.is_always_valid());
    /// assert_eq!(chain.value(), &Value::Null);
    ///
    /// let chain = AssertionChain::new(json!([1, 2])).all().null_or();
    /// assert!(chain.is_all());
    /// assert!(!chain.is_always_valid());
    /// ```
    pub fn is_always_valid(&self) -> bool {
        self.always_valid
    }

    /// Runs one predicate without consuming the chain.
    ///
    /// The name must resolve on the chain's source even when the chain is
    /// always-valid, so misspelled names surface on null subjects too.
    pub fn evaluate(&self, name: &str, args: &[Value], options: &CallOptions) -> Result<(), Error> {
        let target = if self.all {
            format!("{}{}", ALL_PREFIX, name)
        } else {
            name.to_string()
        };

        if !dispatch::resolves(&*self.source, &target) {
            return Err(UsageError::UnknownAssertion(name.to_string()).into());
        }
        if self.always_valid {
            return Ok(());
        }

        let options = options.merged_with(&self.defaults);
        dispatch::invoke(
            &*self.source,
            &Invocation::new(&target, &self.value, args, &options),
        )
    }
}

impl Fluent for AssertionChain {
    type Output = Result<Self, Error>;

    fn assert_with(self, name: &str, args: &[Value], options: CallOptions) -> Self::Output {
        self.evaluate(name, args, &options)?;
        Ok(self)
    }
}

impl std::fmt::Debug for AssertionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssertionChain")
            .field("value", &self.value)
            .field("defaults", &self.defaults)
            .field("always_valid", &self.always_valid)
            .field("all", &self.all)
            .finish_non_exhaustive()
    }
}
