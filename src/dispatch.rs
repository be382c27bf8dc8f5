//! Variant dispatch.
//!
//! Any base predicate `x` of a source is also reachable as `null_or_x`
//! (skip when the subject is null) and `all_x` (check every element of an
//! array or object). Prefixes compose, so `null_or_all_x` and
//! `all_null_or_x` resolve as well. Nothing is registered per variant; the
//! name is taken apart at call time.

use serde_json::Value;

use crate::call::{CallOptions, Invocation};
use crate::code::Code;
use crate::error::{Error, UsageError};
use crate::message::describe;
use crate::registry::PredicateSource;

pub const NULL_OR_PREFIX: &str = "null_or_";
pub const ALL_PREFIX: &str = "all_";

/// Whether `name` resolves on `source`, directly or through the prefixes.
pub fn resolves(source: &dyn PredicateSource, name: &str) -> bool {
    if source.contains(name) {
        return true;
    }
    if let Some(base) = name.strip_prefix(NULL_OR_PREFIX) {
        if resolves(source, base) {
            return true;
        }
    }
    if let Some(base) = name.strip_prefix(ALL_PREFIX) {
        if resolves(source, base) {
            return true;
        }
    }
    false
}

/// Calls `name` with a positional argument list whose first entry is the
/// subject.
///
/// # Errors
///
/// - `UsageError::UnknownAssertion` when the name does not resolve
/// - `UsageError::MissingArgument` when `args` is empty
/// - the predicate's own failure otherwise
///
/// # Example
///
/// ```rust
/// use tripwire::{default_source, dispatch, CallOptions};
/// use serde_json::json;
///
/// let source = default_source();
/// let options = CallOptions::new();
///
/// assert!(dispatch(&*source, "null_or_integer", &[json!(null)], &options).is_ok());
/// assert!(dispatch(&*source, "all_integer", &[json!([1, 2, 3])], &options).is_ok());
///
/// let err = dispatch(&*source, "all_integer", &[json!([1, "2", 3])], &options).unwrap_err();
/// assert_eq!(err.as_failure().unwrap().value(), &json!("2"));
///
/// assert!(dispatch(&*source, "all_integer", &[], &options).unwrap_err().is_usage());
/// ```
pub fn dispatch(
    source: &dyn PredicateSource,
    name: &str,
    args: &[Value],
    options: &CallOptions,
) -> Result<(), Error> {
    if !resolves(source, name) {
        return Err(UsageError::UnknownAssertion(name.to_string()).into());
    }
    let (subject, rest) = args
        .split_first()
        .ok_or_else(|| UsageError::MissingArgument(name.to_string()))?;

    invoke(source, &Invocation::new(name, subject, rest, options))
}

/// Evaluates an already-assembled invocation, peeling variant prefixes.
pub(crate) fn invoke<'a>(source: &dyn PredicateSource, call: &Invocation<'a>) -> Result<(), Error> {
    if source.contains(call.name) {
        return source.evaluate(call);
    }
    if let Some(base) = call.name.strip_prefix(NULL_OR_PREFIX) {
        if resolves(source, base) {
            return null_or(call, |inner| invoke(source, &inner.renamed(base)));
        }
    }
    if let Some(base) = call.name.strip_prefix(ALL_PREFIX) {
        if resolves(source, base) {
            return for_all(call, |inner| invoke(source, &inner.renamed(base)));
        }
    }
    Err(UsageError::UnknownAssertion(call.name.to_string()).into())
}

/// Runs `check` unless the subject is null.
pub fn null_or<'a, F>(call: &Invocation<'a>, check: F) -> Result<(), Error>
where
    F: FnOnce(&Invocation<'a>) -> Result<(), Error>,
{
    if call.value.is_null() {
        return Ok(());
    }
    check(call)
}

/// Runs `check` on every element of the subject, stopping at the first
/// failure.
///
/// Arrays yield their elements and objects their values. Any other subject
/// fails with `INVALID_TRAVERSABLE`.
pub fn for_all<'a, F>(call: &Invocation<'a>, mut check: F) -> Result<(), Error>
where
    F: FnMut(&Invocation<'a>) -> Result<(), Error>,
{
    let elements: Vec<&'a Value> = match call.value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        other => {
            return Err(call.fail(
                Code::InvalidTraversable,
                format!("Value {} is not an array or object.", describe(other)),
                &[],
            ))
        }
    };

    for element in elements {
        check(&call.with_value(element))?;
    }
    Ok(())
}
