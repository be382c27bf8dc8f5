//! Aggregate failures raised by lazy verification.

use std::any::Any;
use std::fmt::{self, Display};

use super::failure::{Failure, Failures};

#[doc(hidden)]
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An error type that carries every failure a lazy verification collected.
///
/// [`LazyFailure`] is the default. A validation domain that wants its own
/// branded error implements this trait and registers it with
/// [`LazyAssertion::with_aggregate`](crate::LazyAssertion::with_aggregate) or
/// [`Assert::with_aggregate`](crate::Assert::with_aggregate). The raised value
/// can be recovered with [`ValidationError::downcast_ref`](crate::ValidationError::downcast_ref).
///
/// # Example
///
/// ```rust
/// use tripwire::{AggregateFailure, Failures};
///
/// #[derive(Debug)]
/// struct SignupRejected(Failures);
///
/// impl std::fmt::Display for SignupRejected {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "signup rejected ({} problems)", self.0.len())
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
/// ```
pub trait AggregateFailure: std::error::Error + AsAny + Send + Sync + 'static {
    /// Builds the aggregate from the collected failures, in entry order.
    fn from_failures(failures: Failures) -> Self
    where
        Self: Sized;

    /// The collected failures, in entry order.
    fn failures(&self) -> &Failures;
}

/// Builds a boxed aggregate of a concrete type.
pub(crate) type AggregateBuilder = fn(Failures) -> Box<dyn AggregateFailure>;

pub(crate) fn build_aggregate<A: AggregateFailure>(failures: Failures) -> Box<dyn AggregateFailure> {
    Box::new(A::from_failures(failures))
}

/// The default aggregate failure.
///
/// Renders as:
///
/// ```text
/// The following 2 assertions failed:
/// 1) email: Value "x" was expected to be a valid e-mail address.
/// 2) age: Provided "3" is not greater or equal to "18".
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LazyFailure {
    failures: Failures,
}

impl LazyFailure {
    pub fn new(failures: Failures) -> Self {
        Self { failures }
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter()
    }

    pub fn into_failures(self) -> Failures {
        self.failures
    }
}

impl AggregateFailure for LazyFailure {
    fn from_failures(failures: Failures) -> Self {
        Self::new(failures)
    }

    fn failures(&self) -> &Failures {
        &self.failures
    }
}

/// Writes the standard "The following N assertions failed" summary.
///
/// Exposed so branded aggregates can reuse the layout.
pub fn write_summary(f: &mut fmt::Formatter<'_>, failures: &Failures) -> fmt::Result {
    writeln!(f, "The following {} assertions failed:", failures.len())?;
    for (i, failure) in failures.iter().enumerate() {
        writeln!(
            f,
            "{}) {}: {}",
            i + 1,
            failure.property_path().unwrap_or_default(),
            failure.message()
        )?;
    }
    Ok(())
}

impl Display for LazyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, &self.failures)
    }
}

impl std::error::Error for LazyFailure {}
