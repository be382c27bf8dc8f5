//! Error types.
//!
//! Three kinds are kept apart:
//! - [`Failure`]: one predicate rejected a value
//! - an [`AggregateFailure`] (default [`LazyFailure`]): everything a lazy
//!   verification collected
//! - [`UsageError`]: the API was called wrong
//!
//! The first two are both a [`ValidationError`]; the third never is.

mod aggregate;
mod failure;
mod usage;

pub use aggregate::{write_summary, AggregateFailure, AsAny, LazyFailure};
pub(crate) use aggregate::{build_aggregate, AggregateBuilder};
pub use failure::{Failure, Failures};
pub use usage::UsageError;

/// Input was rejected, by one predicate or by a lazy verification.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A single predicate failed.
    #[error("{0}")]
    Assertion(Failure),

    /// A lazy verification collected one or more failures.
    #[error("{0}")]
    Aggregate(Box<dyn AggregateFailure>),
}

impl ValidationError {
    /// Every underlying failure, in order.
    pub fn failures(&self) -> Vec<&Failure> {
        match self {
            ValidationError::Assertion(failure) => vec![failure],
            ValidationError::Aggregate(aggregate) => aggregate.failures().iter().collect(),
        }
    }

    /// The single failure, when this is not an aggregate.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            ValidationError::Assertion(failure) => Some(failure),
            ValidationError::Aggregate(_) => None,
        }
    }

    /// Recovers the concrete aggregate type, e.g. a branded one.
    pub fn downcast_ref<A: AggregateFailure>(&self) -> Option<&A> {
        match self {
            ValidationError::Aggregate(aggregate) => AsAny::as_any(&**aggregate).downcast_ref::<A>(),
            ValidationError::Assertion(_) => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, ValidationError::Aggregate(_))
    }
}

/// Any error this crate raises.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }

    /// The underlying failures; empty for usage errors.
    pub fn failures(&self) -> Vec<&Failure> {
        match self {
            Error::Validation(e) => e.failures(),
            Error::Usage(_) => Vec::new(),
        }
    }

    /// The single failure, when this is a plain assertion failure.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Error::Validation(e) => e.as_failure(),
            Error::Usage(_) => None,
        }
    }

    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Error::Usage(e) => Some(e),
            Error::Validation(_) => None,
        }
    }
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        Error::Validation(ValidationError::Assertion(failure))
    }
}
