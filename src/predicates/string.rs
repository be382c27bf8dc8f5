//! String and emptiness predicates.
//!
//! Lengths count characters, not bytes. A length predicate applied to a
//! non-string fails with its own code.

use regex::Regex;
use serde_json::Value;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::{Error, UsageError};
use crate::message::describe;

use super::{ensure, text};

/// Null, `false`, zero, `""`, `"0"` and empty containers count as empty.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub fn not_empty(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(!is_empty_value(call.value), || {
        call.fail(
            Code::ValueEmpty,
            format!("Value {} is empty, but non empty value was expected.", describe(call.value)),
            &[],
        )
    })
}

pub fn empty(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(is_empty_value(call.value), || {
        call.fail(
            Code::ValueNotEmpty,
            format!("Value {} is not empty.", describe(call.value)),
            &[],
        )
    })
}

pub fn not_blank(call: &Invocation<'_>) -> Result<(), Error> {
    ensure(!is_blank(call.value), || {
        call.fail(
            Code::InvalidNotBlank,
            format!("Value {} is blank, but was expected to contain a value.", describe(call.value)),
            &[],
        )
    })
}

fn char_len(value: &Value) -> Option<usize> {
    text(value).map(|s| s.chars().count())
}

pub fn length(call: &Invocation<'_>) -> Result<(), Error> {
    let expected = call.usize_arg(0, "length")?;
    ensure(char_len(call.value) == Some(expected), || {
        call.fail(
            Code::InvalidLength,
            format!(
                "Value {} has to be {} exactly characters long, but length is {}.",
                describe(call.value),
                expected,
                char_len(call.value).map_or("unknown".to_string(), |n| n.to_string())
            ),
            &[("length", expected.into())],
        )
    })
}

pub fn min_length(call: &Invocation<'_>) -> Result<(), Error> {
    let min = call.usize_arg(0, "min length")?;
    ensure(char_len(call.value).is_some_and(|n| n >= min), || {
        call.fail(
            Code::InvalidMinLength,
            format!(
                "Value {} is too short, it should have at least {} characters.",
                describe(call.value),
                min
            ),
            &[("min_length", min.into())],
        )
    })
}

pub fn max_length(call: &Invocation<'_>) -> Result<(), Error> {
    let max = call.usize_arg(0, "max length")?;
    ensure(char_len(call.value).is_some_and(|n| n <= max), || {
        call.fail(
            Code::InvalidMaxLength,
            format!(
                "Value {} is too long, it should have no more than {} characters.",
                describe(call.value),
                max
            ),
            &[("max_length", max.into())],
        )
    })
}

pub fn between_length(call: &Invocation<'_>) -> Result<(), Error> {
    let min = call.usize_arg(0, "min length")?;
    let max = call.usize_arg(1, "max length")?;
    ensure(
        char_len(call.value).is_some_and(|n| n >= min && n <= max),
        || {
            call.fail(
                Code::InvalidBetweenLength,
                format!(
                    "Value {} should have between {} and {} characters.",
                    describe(call.value),
                    min,
                    max
                ),
                &[("min_length", min.into()), ("max_length", max.into())],
            )
        },
    )
}

fn affix(
    call: &Invocation<'_>,
    code: Code,
    matches: fn(&str, &str) -> bool,
    relation: &str,
) -> Result<(), Error> {
    let needle = call.str_arg(0, "needle")?;
    let holds = text(call.value).is_some_and(|s| matches(s, needle));
    ensure(holds, || {
        call.fail(
            code,
            format!("Value {} {} {}.", describe(call.value), relation, describe(&Value::from(needle))),
            &[("needle", needle.into())],
        )
    })
}

pub fn starts_with(call: &Invocation<'_>) -> Result<(), Error> {
    affix(call, Code::InvalidStringStart, |s, n| s.starts_with(n), "does not start with")
}

pub fn ends_with(call: &Invocation<'_>) -> Result<(), Error> {
    affix(call, Code::InvalidStringEnd, |s, n| s.ends_with(n), "does not end with")
}

pub fn contains(call: &Invocation<'_>) -> Result<(), Error> {
    affix(call, Code::InvalidStringContains, |s, n| s.contains(n), "does not contain")
}

pub fn not_contains(call: &Invocation<'_>) -> Result<(), Error> {
    affix(
        call,
        Code::InvalidStringNotContains,
        |s, n| !s.contains(n),
        "was not expected to contain",
    )
}

fn pattern(call: &Invocation<'_>) -> Result<Regex, Error> {
    let source = call.str_arg(0, "pattern")?;
    Regex::new(source).map_err(|e| UsageError::invalid_argument(call.name, e.to_string()).into())
}

pub fn regex(call: &Invocation<'_>) -> Result<(), Error> {
    let re = pattern(call)?;
    ensure(text(call.value).is_some_and(|s| re.is_match(s)), || {
        call.fail(
            Code::InvalidRegex,
            format!("Value {} does not match expression.", describe(call.value)),
            &[("pattern", re.as_str().into())],
        )
    })
}

pub fn not_regex(call: &Invocation<'_>) -> Result<(), Error> {
    let re = pattern(call)?;
    ensure(text(call.value).is_some_and(|s| !re.is_match(s)), || {
        call.fail(
            Code::InvalidNotRegex,
            format!("Value {} matches expression.", describe(call.value)),
            &[("pattern", re.as_str().into())],
        )
    })
}

/// A letter followed by letters or digits.
pub fn alnum(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = text(call.value).is_some_and(|s| {
        let mut chars = s.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric())
    });
    ensure(holds, || {
        call.fail(
            Code::InvalidAlnum,
            format!(
                "Value {} is not alphanumeric, starting with letters and containing only letters and numbers.",
                describe(call.value)
            ),
            &[],
        )
    })
}

/// Only ASCII digits; non-negative integers qualify as well.
pub fn digit(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = match call.value {
        Value::String(s) => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
        Value::Number(n) => n.is_u64(),
        _ => false,
    };
    ensure(holds, || {
        call.fail(
            Code::InvalidDigit,
            format!("Value {} is not a digit.", describe(call.value)),
            &[],
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::test_support::{code_of, run};
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        for value in [Value::Null, json!(false), json!(0), json!(""), json!("0"), json!([]), json!({})] {
            assert_eq!(code_of(run(not_empty, value.clone(), &[])), Code::ValueEmpty);
            assert!(run(empty, value, &[]).is_ok());
        }
        assert!(run(not_empty, json!("a"), &[]).is_ok());
        assert_eq!(code_of(run(empty, json!([1]), &[])), Code::ValueNotEmpty);
    }

    #[test]
    fn test_not_blank() {
        assert!(run(not_blank, json!("x"), &[]).is_ok());
        assert!(run(not_blank, json!(0), &[]).is_ok());
        assert_eq!(code_of(run(not_blank, json!("   "), &[])), Code::InvalidNotBlank);
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(run(length, json!("héllo"), &[json!(5)]).is_ok());
        assert_eq!(code_of(run(length, json!("abc"), &[json!(5)])), Code::InvalidLength);
        assert!(run(min_length, json!("abc"), &[json!(3)]).is_ok());
        assert_eq!(code_of(run(min_length, json!("ab"), &[json!(3)])), Code::InvalidMinLength);
        assert!(run(max_length, json!("abc"), &[json!(3)]).is_ok());
        assert_eq!(code_of(run(max_length, json!("abcd"), &[json!(3)])), Code::InvalidMaxLength);
        assert!(run(between_length, json!("abc"), &[json!(2), json!(4)]).is_ok());
        assert_eq!(
            code_of(run(between_length, json!("a"), &[json!(2), json!(4)])),
            Code::InvalidBetweenLength
        );
    }

    #[test]
    fn test_length_of_non_string_fails() {
        assert_eq!(code_of(run(min_length, json!(12345), &[json!(3)])), Code::InvalidMinLength);
    }

    #[test]
    fn test_length_argument_must_be_unsigned() {
        assert!(run(min_length, json!("abc"), &[json!(-1)]).unwrap_err().is_usage());
    }

    #[test]
    fn test_affixes() {
        assert!(run(starts_with, json!("tripwire"), &[json!("trip")]).is_ok());
        assert_eq!(code_of(run(starts_with, json!("wire"), &[json!("trip")])), Code::InvalidStringStart);
        assert!(run(ends_with, json!("tripwire"), &[json!("wire")]).is_ok());
        assert_eq!(code_of(run(ends_with, json!("trip"), &[json!("wire")])), Code::InvalidStringEnd);
        assert!(run(contains, json!("tripwire"), &[json!("pw")]).is_ok());
        assert_eq!(code_of(run(contains, json!("trip"), &[json!("x")])), Code::InvalidStringContains);
        assert!(run(not_contains, json!("trip"), &[json!("x")]).is_ok());
        assert_eq!(
            code_of(run(not_contains, json!("trip"), &[json!("ri")])),
            Code::InvalidStringNotContains
        );
    }

    #[test]
    fn test_regex() {
        assert!(run(regex, json!("abc123"), &[json!("^[a-z]+\\d+$")]).is_ok());
        let err = run(regex, json!("123"), &[json!("^[a-z]+$")]).unwrap_err();
        let failure = err.as_failure().unwrap();
        assert_eq!(failure.code(), Code::InvalidRegex);
        assert_eq!(failure.constraints()["pattern"], json!("^[a-z]+$"));

        assert!(run(not_regex, json!("123"), &[json!("^[a-z]+$")]).is_ok());
        assert_eq!(code_of(run(not_regex, json!("abc"), &[json!("^[a-z]+$")])), Code::InvalidNotRegex);
    }

    #[test]
    fn test_invalid_pattern_is_usage_error() {
        assert!(run(regex, json!("x"), &[json!("[unclosed")]).unwrap_err().is_usage());
    }

    #[test]
    fn test_alnum_and_digit() {
        assert!(run(alnum, json!("a1b2"), &[]).is_ok());
        assert_eq!(code_of(run(alnum, json!("1ab"), &[])), Code::InvalidAlnum);
        assert!(run(digit, json!("0123"), &[]).is_ok());
        assert!(run(digit, json!(42), &[]).is_ok());
        assert_eq!(code_of(run(digit, json!("12a"), &[])), Code::InvalidDigit);
        assert_eq!(code_of(run(digit, json!(-1), &[])), Code::InvalidDigit);
    }
}
