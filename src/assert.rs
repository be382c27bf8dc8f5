//! Entry points for building chains and lazy collectors.
//!
//! [`Assert`] bundles a predicate source with the aggregate type lazy
//! verification raises. The crate-level [`that`](crate::that) and friends
//! use [`Assert::default`].

use serde_json::Value;
use std::sync::Arc;

use crate::call::CallOptions;
use crate::chain::AssertionChain;
use crate::dispatch;
use crate::error::{build_aggregate, AggregateBuilder, AggregateFailure, Error, LazyFailure, UsageError};
use crate::lazy::LazyAssertion;
use crate::registry::{self, PredicateSource};

/// A configured validation domain.
///
/// Cloning is cheap: the source is shared behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use tripwire::{Assert, Failures, AggregateFailure, Fluent, write_summary};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct SignupRejected(Failures);
///
/// impl std::fmt::Display for SignupRejected {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write_summary(f, &self.0)
///     }
/// }
///
/// impl std::error::Error for SignupRejected {}
///
/// impl AggregateFailure for SignupRejected {
///     fn from_failures(failures: Failures) -> Self {
///         SignupRejected(failures)
///     }
///
///     fn failures(&self) -> &Failures {
///         &self.0
///     }
/// }
///
/// let signup = Assert::new().with_aggregate::<SignupRejected>();
///
/// let err = signup
///     .lazy()
///     .that(json!("not-an-email"), "email").email()
///     .that(json!(12), "age").between(18, 120)
///     .verify_now()
///     .unwrap_err();
///
/// let tripwire::Error::Validation(err) = err else { unreachable!() };
/// let rejected = err.downcast_ref::<SignupRejected>().unwrap();
/// assert_eq!(rejected.failures().len(), 2);
/// ```
#[derive(Clone)]
pub struct Assert {
    source: Arc<dyn PredicateSource>,
    aggregate: AggregateBuilder,
}

impl Assert {
    /// The built-in predicates, raising [`LazyFailure`].
    pub fn new() -> Self {
        Self {
            source: registry::default_source(),
            aggregate: build_aggregate::<LazyFailure>,
        }
    }

    /// Uses `source` for every chain and collector built from here.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::IncompatibleSource` if the source does not
    /// expose the built-in catalog.
    pub fn with_source(mut self, source: Arc<dyn PredicateSource>) -> Result<Self, UsageError> {
        registry::ensure_compatible(&*source)?;
        self.source = source;
        Ok(self)
    }

    /// Raises `A` from lazy verification.
    pub fn with_aggregate<A: AggregateFailure>(mut self) -> Self {
        self.aggregate = build_aggregate::<A>;
        self
    }

    pub fn source(&self) -> &Arc<dyn PredicateSource> {
        &self.source
    }

    /// A chain over `value`.
    pub fn that(&self, value: impl Into<Value>) -> AssertionChain {
        self.that_with(value, CallOptions::default())
    }

    /// A chain over `value` whose calls default to `defaults`.
    pub fn that_with(&self, value: impl Into<Value>, defaults: CallOptions) -> AssertionChain {
        AssertionChain::from_parts(value.into(), defaults, Arc::clone(&self.source))
    }

    /// A chain that checks every element of `values`.
    pub fn that_all(&self, values: impl Into<Value>) -> AssertionChain {
        self.that(values).all()
    }

    /// A chain that passes outright when `value` is null.
    pub fn that_null_or(&self, value: impl Into<Value>) -> AssertionChain {
        self.that(value).null_or()
    }

    /// An empty lazy collector.
    pub fn lazy(&self) -> LazyAssertion {
        LazyAssertion::from_parts(Arc::clone(&self.source), self.aggregate)
    }

    /// Calls a predicate by name, `args[0]` being the subject.
    ///
    /// Accepts `null_or_`/`all_` names; see [`dispatch`](crate::dispatch()).
    pub fn check(&self, name: &str, args: &[Value]) -> Result<(), Error> {
        dispatch::dispatch(&*self.source, name, args, &CallOptions::default())
    }
}

impl Default for Assert {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Assert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assert")
            .field("predicates", &self.source.names().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;
    use crate::error::{Failures, ValidationError};
    use crate::fluent::Fluent;
    use crate::registry::{PredicateDef, PredicateRegistry};
    use serde_json::json;

    #[derive(Debug)]
    struct Branded(Failures);

    impl std::fmt::Display for Branded {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "branded: {} failures", self.0.len())
        }
    }

    impl std::error::Error for Branded {}

    impl AggregateFailure for Branded {
        fn from_failures(failures: Failures) -> Self {
            Branded(failures)
        }

        fn failures(&self) -> &Failures {
            &self.0
        }
    }

    #[test]
    fn test_convenience_constructors() {
        let assert = Assert::new();
        assert!(assert.that_all(json!([1, 2])).integer().is_ok());
        assert!(assert.that_null_or(Value::Null).string().is_ok());
        assert!(assert.that(json!(1)).string().is_err());
    }

    #[test]
    fn test_check_goes_through_dispatch() {
        let assert = Assert::new();
        assert!(assert.check("all_integer", &[json!([1, 2, 3])]).is_ok());
        let err = assert.check("all_integer", &[json!([1, "2", 3])]).unwrap_err();
        assert_eq!(err.as_failure().unwrap().code(), Code::InvalidInteger);
    }

    #[test]
    fn test_branded_aggregate() {
        let err = Assert::new()
            .with_aggregate::<Branded>()
            .lazy()
            .that(json!(1), "a")
            .string()
            .verify_now()
            .unwrap_err();

        assert_eq!(err.to_string(), "branded: 1 failures");
        match err {
            Error::Validation(ValidationError::Aggregate(ref aggregate)) => {
                assert_eq!(aggregate.failures().len(), 1);
            }
            ref other => panic!("unexpected error: {other}"),
        }
        let Error::Validation(err) = err else { unreachable!() };
        assert!(err.downcast_ref::<Branded>().is_some());
        assert!(err.downcast_ref::<LazyFailure>().is_none());
    }

    #[test]
    fn test_custom_source_reaches_chains_and_collectors() {
        let registry = PredicateRegistry::with_defaults();
        registry
            .register(
                "even",
                PredicateDef::new(Code::Custom(1), |call| {
                    match call.value.as_i64() {
                        Some(n) if n % 2 == 0 => Ok(()),
                        _ => Err(call.fail(Code::Custom(1), "odd", &[])),
                    }
                }),
            )
            .unwrap();

        let assert = Assert::new().with_source(Arc::new(registry)).unwrap();
        assert!(assert.that(json!(4)).assert("even", &[]).is_ok());
        assert!(assert.that_all(json!([2, 3])).assert("even", &[]).is_err());
        assert!(assert.check("null_or_even", &[Value::Null]).is_ok());

        let err = assert
            .lazy()
            .that(json!(3), "n")
            .assert("even", &[])
            .verify_now()
            .unwrap_err();
        assert_eq!(err.failures()[0].message(), "odd");
    }

    #[test]
    fn test_incompatible_source_is_rejected() {
        let err = Assert::new()
            .with_source(Arc::new(PredicateRegistry::new()))
            .unwrap_err();
        assert!(matches!(err, UsageError::IncompatibleSource { .. }));
    }
}
