//! Type predicates.

use serde_json::Value;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::Error;
use crate::message::describe;

use super::ensure;

pub(super) fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}

pub(super) fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn integer(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(is_integer(call.value), || {
        call.fail(
            Code::InvalidInteger,
            format!("Value {} is not an integer.", describe(call.value)),
            &[],
        )
    })
}

pub fn float(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = matches!(call.value, Value::Number(n) if n.is_f64());
    ensure(holds, || {
        call.fail(
            Code::InvalidFloat,
            format!("Value {} is not a float.", describe(call.value)),
            &[],
        )
    })
}

/// A number, or a string that parses as a finite one.
pub fn numeric(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = match call.value {
        Value::Number(_) => true,
        Value::String(s) => parse_number(s).is_some(),
        _ => false,
    };
    ensure(holds, || {
        call.fail(
            Code::InvalidNumeric,
            format!("Value {} is not numeric.", describe(call.value)),
            &[],
        )
    })
}

/// An integer, a float without a fractional part, or a string holding an
/// integer.
pub fn integerish(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = match call.value {
        Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() == 0.0),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    };
    ensure(holds, || {
        call.fail(
            Code::InvalidIntegerish,
            format!("Value {} is not an integer or a number castable to integer.", describe(call.value)),
            &[],
        )
    })
}

pub fn boolean(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value.is_boolean(), || {
        call.fail(
            Code::InvalidBoolean,
            format!("Value {} is not a boolean.", describe(call.value)),
            &[],
        )
    })
}

pub fn string(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value.is_string(), || {
        call.fail(
            Code::InvalidString,
            format!("Value {} expected to be string, type {} given.", describe(call.value), type_name(call.value)),
            &[],
        )
    })
}

pub fn scalar(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = matches!(call.value, Value::Bool(_) | Value::Number(_) | Value::String(_));
    ensure(holds, || {
        call.fail(
            Code::InvalidScalar,
            format!("Value {} is not a scalar.", describe(call.value)),
            &[],
        )
    })
}

pub fn is_array(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value.is_array(), || {
        call.fail(
            Code::InvalidArray,
            format!("Value {} is not an array.", describe(call.value)),
            &[],
        )
    })
}

pub fn is_object(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value.is_object(), || {
        call.fail(
            Code::InvalidObject,
            format!("Value {} is not an object.", describe(call.value)),
            &[],
        )
    })
}

pub fn null(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value.is_null(), || {
        call.fail(
            Code::ValueNotNull,
            format!("Value {} is not null, but null value was expected.", describe(call.value)),
            &[],
        )
    })
}

pub fn not_null(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(!call.value.is_null(), || {
        call.fail(
            Code::ValueNull,
            format!("Value {} is null, but non null value was expected.", describe(call.value)),
            &[],
        )
    })
}

pub fn is_true(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value == &Value::Bool(true), || {
        call.fail(
            Code::InvalidTrue,
            format!("Value {} is not TRUE.", describe(call.value)),
            &[],
        )
    })
}

pub fn is_false(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(call.value == &Value::Bool(false), || {
        call.fail(
            Code::InvalidFalse,
            format!("Value {} is not FALSE.", describe(call.value)),
            &[],
        )
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
