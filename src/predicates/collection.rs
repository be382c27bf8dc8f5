//! Array and object predicates.

use serde_json::Value;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::Error;
use crate::message::describe;

use super::ensure;

fn size(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

pub fn choice(call: &Invocation<'_>) -> Result<(), Error> {
    let choices = call.array_arg(0, "choices")?;
    ensure(choices.contains(call.value), || {
        call.fail(
            Code::InvalidChoice,
            format!("Value {} is not an element of the valid values.", describe(call.value)),
            &[("choices", Value::Array(choices.clone()))],
        )
    })
}

pub fn not_in_array(call: &Invocation<'_>) -> Result<(), Error> {
    let choices = call.array_arg(0, "choices")?;
    ensure(!choices.contains(call.value), || {
        call.fail(
            Code::InvalidNotInArray,
            format!("Value {} was not expected to be an element of the values.", describe(call.value)),
            &[("choices", Value::Array(choices.clone()))],
        )
    })
}

fn sized(
    call: &Invocation<'_>,
    code: Code,
    constraint: &str,
    holds: impl Fn(usize, usize) -> bool,
) -> Result<(), Error> {
    let limit = call.usize_arg(0, constraint)?;
    let actual = size(call.value);
    ensure(actual.is_some_and(|n| holds(n, limit)), || {
        call.fail(
            code,
            format!(
                "List does not satisfy {} {}, it contains {} elements.",
                constraint,
                limit,
                actual.map_or("no".to_string(), |n| n.to_string())
            ),
            &[(constraint, limit.into())],
        )
    })
}

pub fn count(call: &Invocation<'_>) -> Result<(), Error> {
    sized(call, Code::InvalidCount, "count", |n, limit| n == limit)
}

pub fn min_count(call: &Invocation<'_>) -> Result<(), Error> {
    sized(call, Code::InvalidMinCount, "min_count", |n, limit| n >= limit)
}

pub fn max_count(call: &Invocation<'_>) -> Result<(), Error> {
    sized(call, Code::InvalidMaxCount, "max_count", |n, limit| n <= limit)
}

/// Object keys are strings; array keys are indexes.
fn has_key(value: &Value, key: &Value) -> bool {
    match (value, key) {
        (Value::Object(map), Value::String(k)) => map.contains_key(k),
        (Value::Array(items), Value::Number(n)) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .is_some_and(|i| i < items.len()),
        _ => false,
    }
}

pub fn key_exists(call: &Invocation<'_>) -> Result<(), Error> {
    let key = call.arg(0, "key")?;
    ensure(has_key(call.value, key), || {
        call.fail(
            Code::InvalidKeyExists,
            format!("Array does not contain an element with key {}", describe(key)),
            &[("key", key.clone())],
        )
    })
}

pub fn key_not_exists(call: &Invocation<'_>) -> Result<(), Error> {
    let key = call.arg(0, "key")?;
    let holds = size(call.value).is_some() && !has_key(call.value, key);
    ensure(holds, || {
        call.fail(
            Code::InvalidKeyNotExists,
            format!("Array contains an element with key {}", describe(key)),
            &[("key", key.clone())],
        )
    })
}

/// No two elements (or object values) are identical.
pub fn unique_values(call: &Invocation<'_>) -> Result<(), Error> {
    let values: Option<Vec<&Value>> = match call.value {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(map) => Some(map.values().collect()),
        _ => None,
    };
    let holds = values.is_some_and(|values| {
        values
            .iter()
            .enumerate()
            .all(|(i, v)| !values[i + 1..].contains(v))
    });
    ensure(holds, || {
        call.fail(
            Code::InvalidUniqueValues,
            format!("Value {} is not a list of unique values.", describe(call.value)),
            &[],
        )
    })
}
