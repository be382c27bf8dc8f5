//! Lazy, aggregated assertions.
//!
//! This module provides [`LazyAssertion`], which records many independent
//! `(value, property path, predicates)` entries and only runs them when
//! [`verify_now`](LazyAssertion::verify_now) is called. Every failure is
//! kept, and a single aggregate error reports them all.
//!
//! # Failure handling per entry
//!
//! - Default mode: an entry stops at its first failing predicate; the next
//!   entry still runs.
//! - Try-all mode: every predicate of the entry runs and every failure is
//!   kept.
//!
//! An entry runs in try-all mode when [`try_all`](LazyAssertion::try_all)
//! was called on it, or when the collector-wide flag is set. The mode is
//! read once, when the entry starts running.

use serde_json::Value;
use std::sync::Arc;
use stillwater::Validation;

use crate::call::CallOptions;
use crate::chain::AssertionChain;
use crate::error::{
    build_aggregate, AggregateBuilder, AggregateFailure, Error, Failure, Failures, LazyFailure,
    UsageError, ValidationError,
};
use crate::fluent::Fluent;
use crate::message::Message;
use crate::registry::{self, PredicateSource};
use crate::ValidationResult;

/// One recorded step of an entry, replayed in order.
#[derive(Debug, Clone)]
enum Step {
    Check {
        name: String,
        args: Vec<Value>,
        options: CallOptions,
    },
    NullOr,
    All,
}

#[derive(Debug)]
struct Entry {
    value: Value,
    defaults: CallOptions,
    try_all: bool,
    steps: Vec<Step>,
}

/// Collects failures across many values and reports them together.
///
/// # Example
///
/// ```rust
/// use tripwire::{lazy, Fluent};
/// use serde_json::json;
///
/// let err = lazy()
///     .that(json!(10), "foo").string()
///     .that(json!(null), "bar").not_empty()
///     .that(json!("ok"), "baz").string()
///     .verify_now()
///     .unwrap_err();
///
/// let failures = err.failures();
/// assert_eq!(failures.len(), 2);
/// assert_eq!(failures[0].property_path(), Some("foo"));
/// assert_eq!(failures[1].property_path(), Some("bar"));
/// ```
pub struct LazyAssertion {
    entries: Vec<Entry>,
    try_all: bool,
    // calls made before the first that(), reported by verify
    orphans: Vec<String>,
    source: Arc<dyn PredicateSource>,
    aggregate: AggregateBuilder,
}

impl LazyAssertion {
    /// Creates a collector using the built-in predicates and [`LazyFailure`].
    pub fn new() -> Self {
        Self::from_parts(registry::default_source(), build_aggregate::<LazyFailure>)
    }

    pub(crate) fn from_parts(source: Arc<dyn PredicateSource>, aggregate: AggregateBuilder) -> Self {
        Self {
            entries: Vec::new(),
            try_all: false,
            orphans: Vec::new(),
            source,
            aggregate,
        }
    }

    /// Replaces the predicate source used at verification.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::IncompatibleSource` if the source does not
    /// expose the built-in catalog.
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

    /// Raises `A` instead of [`LazyFailure`] from `verify_now`.
    pub fn with_aggregate<A: AggregateFailure>(mut self) -> Self {
        self.aggregate = build_aggregate::<A>;
        self
    }

    /// Starts a new entry for `value`, attributed to `property_path`.
    pub fn that(self, value: impl Into<Value>, property_path: impl Into<String>) -> Self {
        self.push_entry(value.into(), CallOptions::new().property_path(property_path))
    }

    /// Starts a new entry whose failures default to `message`.
    pub fn that_with(
        self,
        value: impl Into<Value>,
        property_path: impl Into<String>,
        message: impl Into<Message>,
    ) -> Self {
        self.push_entry(
            value.into(),
            CallOptions::new()
                .property_path(property_path)
                .message(message),
        )
    }

    fn push_entry(mut self, value: Value, defaults: CallOptions) -> Self {
        self.entries.push(Entry {
            value,
            defaults,
            try_all: false,
            steps: Vec::new(),
        });
        self
    }

    /// Enables try-all mode.
    ///
    /// Before any `that()` this sets the default for every entry; afterwards
    /// it applies to the current entry only.
    pub fn try_all(mut self) -> Self {
        match self.entries.last_mut() {
            Some(entry) => entry.try_all = true,
            None => self.try_all = true,
        }
        self
    }

    /// Enables try-all mode for every entry, whenever it is called.
    pub fn try_all_entries(mut self) -> Self {
        self.try_all = true;
        self
    }

    /// Routes the current entry's later calls through their `all_` variant.
    pub fn all(self) -> Self {
        self.push_step("all", Step::All)
    }

    /// Makes the current entry's later calls pass if its value is null.
    pub fn null_or(self) -> Self {
        self.push_step("null_or", Step::NullOr)
    }

    fn push_step(mut self, name: &str, step: Step) -> Self {
        match self.entries.last_mut() {
            Some(entry) => entry.steps.push(step),
            None => self.orphans.push(name.to_string()),
        }
        self
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no `that()` has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every entry and returns the collected failures.
    ///
    /// # Errors
    ///
    /// Usage errors are not collected: the first one ends verification and
    /// is returned as is.
    pub fn verify(self) -> Result<ValidationResult<()>, UsageError> {
        if let Some(name) = self.orphans.first() {
            return Err(UsageError::NoSubject(name.clone()));
        }

        let entry_count = self.entries.len();
        let mut collected: Vec<Failure> = Vec::new();

        for entry in self.entries {
            let try_all = self.try_all || entry.try_all;
            run_entry(entry, try_all, &self.source, &mut collected)?;
        }

        tracing::debug!(
            entries = entry_count,
            failures = collected.len(),
            "lazy verification finished"
        );

        Ok(match Failures::from_vec(collected) {
            Some(failures) => Validation::Failure(failures),
            None => Validation::Success(()),
        })
    }

    /// Runs every entry and raises one aggregate if anything failed.
    ///
    /// # Errors
    ///
    /// - `Error::Validation(ValidationError::Aggregate(..))` holding every
    ///   failure in entry order
    /// - `Error::Usage(..)` for API misuse, which is never aggregated
    pub fn verify_now(self) -> Result<(), Error> {
        let aggregate = self.aggregate;
        match self.verify()? {
            Validation::Success(()) => Ok(()),
            Validation::Failure(failures) => {
                Err(ValidationError::Aggregate(aggregate(failures)).into())
            }
        }
    }
}

fn run_entry(
    entry: Entry,
    try_all: bool,
    source: &Arc<dyn PredicateSource>,
    collected: &mut Vec<Failure>,
) -> Result<(), UsageError> {
    let mut chain = AssertionChain::from_parts(entry.value, entry.defaults, Arc::clone(source));

    for step in entry.steps {
        match step {
            Step::NullOr => chain.set_null_or(),
            Step::All => chain.set_all(),
            Step::Check {
                name,
                args,
                options,
            } => match chain.evaluate(&name, &args, &options) {
                Ok(()) => {}
                Err(Error::Validation(err)) => {
                    collected.extend(err.failures().into_iter().cloned());
                    if !try_all {
                        break;
                    }
                }
                Err(Error::Usage(err)) => return Err(err),
            },
        }
    }
    Ok(())
}

impl Default for LazyAssertion {
    fn default() -> Self {
        Self::new()
    }
}

impl Fluent for LazyAssertion {
    type Output = Self;

    fn assert_with(mut self, name: &str, args: &[Value], options: CallOptions) -> Self::Output {
        let step = Step::Check {
            name: name.to_string(),
            args: args.to_vec(),
            options,
        };
        match self.entries.last_mut() {
            Some(entry) => entry.steps.push(step),
            None => self.orphans.push(name.to_string()),
        }
        self
    }
}

impl std::fmt::Debug for LazyAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyAssertion")
            .field("entries", &self.entries)
            .field("try_all", &self.try_all)
            .finish_non_exhaustive()
    }
}
