//! Equality and ordering predicates.
//!
//! Ordering is defined between two numbers or between two strings. Any
//! other pairing does not satisfy an ordering predicate.

use serde_json::Value;
use std::cmp::Ordering;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::{Error, UsageError};
use crate::message::describe;

use super::ensure;

/// Equality that compares numbers by value, so `1 == 1.0`.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn is_comparable(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_))
}

fn bound<'a>(call: &Invocation<'a>, index: usize, what: &str) -> Result<&'a Value, Error> {
    let value = call.arg(index, what)?;
    if is_comparable(value) {
        Ok(value)
    } else {
        Err(UsageError::invalid_argument(call.name, format!("{} must be a number or string", what)).into())
    }
}

pub fn eq(call: &Invocation<'_>) -> Result<(), Error> {
    let expected = call.arg(0, "expected value")?;
    ensure(loose_eq(call.value, expected), || {
        call.fail(
            Code::InvalidEq,
            format!(
                "Value {} does not equal expected value {}.",
                describe(call.value),
                describe(expected)
            ),
            &[("expected", expected.clone())],
        )
    })
}

pub fn not_eq(call: &Invocation<'_>) -> Result<(), Error> {
    let other = call.arg(0, "value to compare")?;
    ensure(!loose_eq(call.value, other), || {
        call.fail(
            Code::InvalidNotEq,
            format!(
                "Value {} was not expected to be equal to value {}.",
                describe(call.value),
                describe(other)
            ),
            &[("expected", other.clone())],
        )
    })
}

pub fn same(call: &Invocation<'_>) -> Result<(), Error> {
    let expected = call.arg(0, "expected value")?;
    ensure(call.value == expected, || {
        call.fail(
            Code::InvalidSame,
            format!(
                "Value {} is not the same as expected value {}.",
                describe(call.value),
                describe(expected)
            ),
            &[("expected", expected.clone())],
        )
    })
}

pub fn not_same(call: &Invocation<'_>) -> Result<(), Error> {
    let other = call.arg(0, "value to compare")?;
    ensure(call.value != other, || {
        call.fail(
            Code::InvalidNotSame,
            format!(
                "Value {} was not expected to be the same as value {}.",
                describe(call.value),
                describe(other)
            ),
            &[("expected", other.clone())],
        )
    })
}

pub fn min(call: &Invocation<'_>) -> Result<(), Error> {
    let min = bound(call, 0, "min")?;
    let holds = matches!(compare(call.value, min), Some(Ordering::Greater | Ordering::Equal));
    ensure(holds, || {
        call.fail(
            Code::InvalidMin,
            format!(
                "Number {} was expected to be at least {}.",
                describe(call.value),
                describe(min)
            ),
            &[("min", min.clone())],
        )
    })
}

pub fn max(call: &Invocation<'_>) -> Result<(), Error> {
    let max = bound(call, 0, "max")?;
    let holds = matches!(compare(call.value, max), Some(Ordering::Less | Ordering::Equal));
    ensure(holds, || {
        call.fail(
            Code::InvalidMax,
            format!(
                "Number {} was expected to be at most {}.",
                describe(call.value),
                describe(max)
            ),
            &[("max", max.clone())],
        )
    })
}

fn within<'a>(
    call: &Invocation<'a>,
    inclusive: bool,
) -> Result<(bool, &'a Value, &'a Value), Error> {
    let lower = bound(call, 0, "lower limit")?;
    let upper = bound(call, 1, "upper limit")?;
    let above = compare(call.value, lower);
    let below = compare(call.value, upper);
    let holds = if inclusive {
        matches!(above, Some(Ordering::Greater | Ordering::Equal))
            && matches!(below, Some(Ordering::Less | Ordering::Equal))
    } else {
        above == Some(Ordering::Greater) && below == Some(Ordering::Less)
    };
    Ok((holds, lower, upper))
}

pub fn between(call: &Invocation<'_>) -> Result<(), Error> {
    let (holds, lower, upper) = within(call, true)?;
    ensure(holds, || {
        call.fail(
            Code::InvalidBetween,
            format!(
                "Provided {} is neither greater than or equal to {} nor less than or equal to {}.",
                describe(call.value),
                describe(lower),
                describe(upper)
            ),
            &[("min", lower.clone()), ("max", upper.clone())],
        )
    })
}

pub fn between_exclusive(call: &Invocation<'_>) -> Result<(), Error> {
    let (holds, lower, upper) = within(call, false)?;
    ensure(holds, || {
        call.fail(
            Code::InvalidBetweenExclusive,
            format!(
                "Provided {} is neither greater than {} nor less than {}.",
                describe(call.value),
                describe(lower),
                describe(upper)
            ),
            &[("min", lower.clone()), ("max", upper.clone())],
        )
    })
}

/// Like [`between`], but only numbers qualify.
pub fn range(call: &Invocation<'_>) -> Result<(), Error> {
    let min = call.number_arg(0, "min")?;
    let max = call.number_arg(1, "max")?;
    let holds = call
        .value
        .as_f64()
        .is_some_and(|n| n >= min && n <= max);
    ensure(holds, || {
        call.fail(
            Code::InvalidRange,
            format!(
                "Number {} was expected to be at least {} and at most {}.",
                describe(call.value),
                describe(&call.args[0]),
                describe(&call.args[1])
            ),
            &[("min", call.args[0].clone()), ("max", call.args[1].clone())],
        )
    })
}

fn ordered(
    call: &Invocation<'_>,
    code: Code,
    accept: &[Ordering],
    relation: &str,
) -> Result<(), Error> {
    let limit = bound(call, 0, "limit")?;
    let holds = compare(call.value, limit).is_some_and(|o| accept.contains(&o));
    ensure(holds, || {
        call.fail(
            code,
            format!(
                "Provided {} is not {} {}.",
                describe(call.value),
                relation,
                describe(limit)
            ),
            &[("limit", limit.clone())],
        )
    })
}

pub fn less_than(call: &Invocation<'_>) -> Result<(), Error> {
    ordered(call, Code::InvalidLess, &[Ordering::Less], "less than")
}

pub fn less_or_equal(call: &Invocation<'_>) -> Result<(), Error> {
    ordered(
        call,
        Code::InvalidLessOrEqual,
        &[Ordering::Less, Ordering::Equal],
        "less or equal to",
    )
}

pub fn greater_than(call: &Invocation<'_>) -> Result<(), Error> {
    ordered(call, Code::InvalidGreater, &[Ordering::Greater], "greater than")
}

pub fn greater_or_equal(call: &Invocation<'_>) -> Result<(), Error> {
    ordered(
        call,
        Code::InvalidGreaterOrEqual,
        &[Ordering::Greater, Ordering::Equal],
        "greater or equal to",
    )
}
