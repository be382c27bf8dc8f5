//! Named predicate methods shared by chains and lazy collectors.
//!
//! [`Fluent`] has one required method, [`assert_with`](Fluent::assert_with).
//! Every other method is a typed shorthand for a catalog predicate. A
//! predicate without a shorthand (for example one registered on a custom
//! source) is reached through [`assert`](Fluent::assert) by name.

use serde_json::Value;

use crate::call::CallOptions;

/// Fluent access to predicates by name.
///
/// For an [`AssertionChain`](crate::AssertionChain) the output is
/// `Result<Self, Error>`: each call runs immediately and the first failure
/// ends the chain. For a [`LazyAssertion`](crate::LazyAssertion) the output
/// is `Self`: calls are recorded and run by `verify_now`.
pub trait Fluent: Sized {
    type Output;

    /// Applies the predicate `name` with positional `args` and per-call
    /// options.
    fn assert_with(self, name: &str, args: &[Value], options: CallOptions) -> Self::Output;

    /// Applies the predicate `name` with positional `args`.
    fn assert(self, name: &str, args: &[Value]) -> Self::Output {
        self.assert_with(name, args, CallOptions::default())
    }

    // types

    fn integer(self) -> Self::Output {
        self.assert("integer", &[])
    }

    fn float(self) -> Self::Output {
        self.assert("float", &[])
    }

    fn numeric(self) -> Self::Output {
        self.assert("numeric", &[])
    }

    /// An integer, or a string holding one.
    fn integerish(self) -> Self::Output {
        self.assert("integerish", &[])
    }

    fn boolean(self) -> Self::Output {
        self.assert("boolean", &[])
    }

    fn string(self) -> Self::Output {
        self.assert("string", &[])
    }

    fn scalar(self) -> Self::Output {
        self.assert("scalar", &[])
    }

    fn is_array(self) -> Self::Output {
        self.assert("is_array", &[])
    }

    fn is_object(self) -> Self::Output {
        self.assert("is_object", &[])
    }

    fn null(self) -> Self::Output {
        self.assert("null", &[])
    }

    fn not_null(self) -> Self::Output {
        self.assert("not_null", &[])
    }

    fn true_(self) -> Self::Output {
        self.assert("true", &[])
    }

    fn false_(self) -> Self::Output {
        self.assert("false", &[])
    }

    // comparison

    /// Equal, comparing numbers by value (`1 == 1.0`).
    fn eq(self, expected: impl Into<Value>) -> Self::Output {
        self.assert("eq", &[expected.into()])
    }

    fn not_eq(self, other: impl Into<Value>) -> Self::Output {
        self.assert("not_eq", &[other.into()])
    }

    /// Structurally identical, including number representation.
    fn same(self, expected: impl Into<Value>) -> Self::Output {
        self.assert("same", &[expected.into()])
    }

    fn not_same(self, other: impl Into<Value>) -> Self::Output {
        self.assert("not_same", &[other.into()])
    }

    fn min(self, min: impl Into<Value>) -> Self::Output {
        self.assert("min", &[min.into()])
    }

    fn max(self, max: impl Into<Value>) -> Self::Output {
        self.assert("max", &[max.into()])
    }

    /// Inclusive on both ends.
    fn between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> Self::Output {
        self.assert("between", &[lower.into(), upper.into()])
    }

    fn between_exclusive(self, lower: impl Into<Value>, upper: impl Into<Value>) -> Self::Output {
        self.assert("between_exclusive", &[lower.into(), upper.into()])
    }

    /// A number within `[min, max]`.
    fn range(self, min: impl Into<Value>, max: impl Into<Value>) -> Self::Output {
        self.assert("range", &[min.into(), max.into()])
    }

    fn less_than(self, limit: impl Into<Value>) -> Self::Output {
        self.assert("less_than", &[limit.into()])
    }

    fn less_or_equal(self, limit: impl Into<Value>) -> Self::Output {
        self.assert("less_or_equal", &[limit.into()])
    }

    fn greater_than(self, limit: impl Into<Value>) -> Self::Output {
        self.assert("greater_than", &[limit.into()])
    }

    fn greater_or_equal(self, limit: impl Into<Value>) -> Self::Output {
        self.assert("greater_or_equal", &[limit.into()])
    }

    // strings

    fn not_empty(self) -> Self::Output {
        self.assert("not_empty", &[])
    }

    fn empty(self) -> Self::Output {
        self.assert("empty", &[])
    }

    fn not_blank(self) -> Self::Output {
        self.assert("not_blank", &[])
    }

    fn length(self, length: usize) -> Self::Output {
        self.assert("length", &[length.into()])
    }

    fn min_length(self, min: usize) -> Self::Output {
        self.assert("min_length", &[min.into()])
    }

    fn max_length(self, max: usize) -> Self::Output {
        self.assert("max_length", &[max.into()])
    }

    fn between_length(self, min: usize, max: usize) -> Self::Output {
        self.assert("between_length", &[min.into(), max.into()])
    }

    fn starts_with(self, prefix: &str) -> Self::Output {
        self.assert("starts_with", &[prefix.into()])
    }

    fn ends_with(self, suffix: &str) -> Self::Output {
        self.assert("ends_with", &[suffix.into()])
    }

    fn contains(self, needle: &str) -> Self::Output {
        self.assert("contains", &[needle.into()])
    }

    fn not_contains(self, needle: &str) -> Self::Output {
        self.assert("not_contains", &[needle.into()])
    }

    fn regex(self, pattern: &str) -> Self::Output {
        self.assert("regex", &[pattern.into()])
    }

    fn not_regex(self, pattern: &str) -> Self::Output {
        self.assert("not_regex", &[pattern.into()])
    }

    fn alnum(self) -> Self::Output {
        self.assert("alnum", &[])
    }

    fn digit(self) -> Self::Output {
        self.assert("digit", &[])
    }

    // collections

    /// One of `choices`.
    fn choice(self, choices: Vec<Value>) -> Self::Output {
        self.assert("choice", &[Value::Array(choices)])
    }

    fn not_in_array(self, choices: Vec<Value>) -> Self::Output {
        self.assert("not_in_array", &[Value::Array(choices)])
    }

    fn count(self, count: usize) -> Self::Output {
        self.assert("count", &[count.into()])
    }

    fn min_count(self, min: usize) -> Self::Output {
        self.assert("min_count", &[min.into()])
    }

    fn max_count(self, max: usize) -> Self::Output {
        self.assert("max_count", &[max.into()])
    }

    fn key_exists(self, key: impl Into<Value>) -> Self::Output {
        self.assert("key_exists", &[key.into()])
    }

    fn key_not_exists(self, key: impl Into<Value>) -> Self::Output {
        self.assert("key_not_exists", &[key.into()])
    }

    fn unique_values(self) -> Self::Output {
        self.assert("unique_values", &[])
    }

    // formats

    fn email(self) -> Self::Output {
        self.assert("email", &[])
    }

    fn url(self) -> Self::Output {
        self.assert("url", &[])
    }

    fn uuid(self) -> Self::Output {
        self.assert("uuid", &[])
    }

    fn ipv4(self) -> Self::Output {
        self.assert("ipv4", &[])
    }

    fn e164(self) -> Self::Output {
        self.assert("e164", &[])
    }

    fn base64(self) -> Self::Output {
        self.assert("base64", &[])
    }

    fn json_string(self) -> Self::Output {
        self.assert("json_string", &[])
    }

    // filesystem

    fn file(self) -> Self::Output {
        self.assert("file", &[])
    }

    fn directory(self) -> Self::Output {
        self.assert("directory", &[])
    }

    fn readable(self) -> Self::Output {
        self.assert("readable", &[])
    }

    fn writeable(self) -> Self::Output {
        self.assert("writeable", &[])
    }

    fn file_not_exists(self) -> Self::Output {
        self.assert("file_not_exists", &[])
    }
}
