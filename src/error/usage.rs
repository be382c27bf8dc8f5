//! Errors for calling the API wrong.

use crate::code::Code;

/// A programming mistake, as opposed to invalid input.
///
/// Usage errors are never collected by a lazy verification and never
/// converted into [`Failure`](crate::Failure)s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// The name resolves to no predicate, directly or through a prefix.
    #[error("assertion '{0}' does not exist")]
    UnknownAssertion(String),

    /// A `null_or_*`/`all_*` (or plain) call was made without a subject.
    #[error("missing the first argument for '{0}'")]
    MissingArgument(String),

    /// A predicate received arguments it cannot work with.
    #[error("invalid argument for '{assertion}': {reason}")]
    InvalidArgument { assertion: String, reason: String },

    /// A replacement predicate source does not cover the default catalog.
    #[error("predicate source is incompatible, missing: {}", .missing.join(", "))]
    IncompatibleSource { missing: Vec<String> },

    /// A predicate with this name is already registered.
    #[error("predicate '{0}' already registered")]
    DuplicatePredicate(String),

    /// A predicate reporting this code is already registered.
    #[error("code {code} is already used by predicate '{existing}'")]
    DuplicateCode { code: Code, existing: String },

    /// A lazy collector received a predicate call before any `that()`.
    #[error("'{0}' was called before any value was attached with that()")]
    NoSubject(String),
}

impl UsageError {
    pub(crate) fn invalid_argument(assertion: &str, reason: impl Into<String>) -> Self {
        UsageError::InvalidArgument {
            assertion: assertion.to_string(),
            reason: reason.into(),
        }
    }
}
