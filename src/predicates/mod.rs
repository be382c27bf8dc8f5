//! The built-in predicate catalog.
//!
//! Each predicate is a plain function over an [`Invocation`]: it returns
//! `Ok(())` when its condition holds and a [`Failure`](crate::Failure)
//! carrying its own code otherwise. Predicates know nothing about chains,
//! variants or lazy collection.
//!
//! [`CATALOG`] is the compile-time name → predicate table the default
//! registry is built from.

mod collection;
mod comparison;
mod filesystem;
mod format;
mod string;
mod types;

use serde_json::Value;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::Error;

/// Signature shared by every built-in predicate.
pub type Check = fn(&Invocation<'_>) -> Result<(), Error>;

/// Every built-in predicate with the single code it reports.
pub const CATALOG: &[(&str, Code, Check)] = &[
    // types
    ("integer", Code::InvalidInteger, types::integer),
    ("float", Code::InvalidFloat, types::float),
    ("numeric", Code::InvalidNumeric, types::numeric),
    ("integerish", Code::InvalidIntegerish, types::integerish),
    ("boolean", Code::InvalidBoolean, types::boolean),
    ("string", Code::InvalidString, types::string),
    ("scalar", Code::InvalidScalar, types::scalar),
    ("is_array", Code::InvalidArray, types::is_array),
    ("is_object", Code::InvalidObject, types::is_object),
    ("null", Code::ValueNotNull, types::null),
    ("not_null", Code::ValueNull, types::not_null),
    ("true", Code::InvalidTrue, types::is_true),
    ("false", Code::InvalidFalse, types::is_false),
    // comparison
    ("eq", Code::InvalidEq, comparison::eq),
    ("not_eq", Code::InvalidNotEq, comparison::not_eq),
    ("same", Code::InvalidSame, comparison::same),
    ("not_same", Code::InvalidNotSame, comparison::not_same),
    ("min", Code::InvalidMin, comparison::min),
    ("max", Code::InvalidMax, comparison::max),
    ("between", Code::InvalidBetween, comparison::between),
    ("between_exclusive", Code::InvalidBetweenExclusive, comparison::between_exclusive),
    ("range", Code::InvalidRange, comparison::range),
    ("less_than", Code::InvalidLess, comparison::less_than),
    ("less_or_equal", Code::InvalidLessOrEqual, comparison::less_or_equal),
    ("greater_than", Code::InvalidGreater, comparison::greater_than),
    ("greater_or_equal", Code::InvalidGreaterOrEqual, comparison::greater_or_equal),
    // strings
    ("not_empty", Code::ValueEmpty, string::not_empty),
    ("empty", Code::ValueNotEmpty, string::empty),
    ("not_blank", Code::InvalidNotBlank, string::not_blank),
    ("length", Code::InvalidLength, string::length),
    ("min_length", Code::InvalidMinLength, string::min_length),
    ("max_length", Code::InvalidMaxLength, string::max_length),
    ("between_length", Code::InvalidBetweenLength, string::between_length),
    ("starts_with", Code::InvalidStringStart, string::starts_with),
    ("ends_with", Code::InvalidStringEnd, string::ends_with),
    ("contains", Code::InvalidStringContains, string::contains),
    ("not_contains", Code::InvalidStringNotContains, string::not_contains),
    ("regex", Code::InvalidRegex, string::regex),
    ("not_regex", Code::InvalidNotRegex, string::not_regex),
    ("alnum", Code::InvalidAlnum, string::alnum),
    ("digit", Code::InvalidDigit, string::digit),
    // collections
    ("choice", Code::InvalidChoice, collection::choice),
    ("not_in_array", Code::InvalidNotInArray, collection::not_in_array),
    ("count", Code::InvalidCount, collection::count),
    ("min_count", Code::InvalidMinCount, collection::min_count),
    ("max_count", Code::InvalidMaxCount, collection::max_count),
    ("key_exists", Code::InvalidKeyExists, collection::key_exists),
    ("key_not_exists", Code::InvalidKeyNotExists, collection::key_not_exists),
    ("unique_values", Code::InvalidUniqueValues, collection::unique_values),
    // formats
    ("email", Code::InvalidEmail, format::email),
    ("url", Code::InvalidUrl, format::url),
    ("uuid", Code::InvalidUuid, format::uuid),
    ("ipv4", Code::InvalidIp, format::ipv4),
    ("e164", Code::InvalidE164, format::e164),
    ("base64", Code::InvalidBase64, format::base64),
    ("json_string", Code::InvalidJsonString, format::json_string),
    // filesystem
    ("file", Code::InvalidFile, filesystem::file),
    ("directory", Code::InvalidDirectory, filesystem::directory),
    ("readable", Code::InvalidReadable, filesystem::readable),
    ("writeable", Code::InvalidWriteable, filesystem::writeable),
    ("file_not_exists", Code::InvalidFileNotExists, filesystem::file_not_exists),
];

/// `Ok(())` when `holds`, otherwise the error built by `fail`.
fn ensure(holds: bool, fail: impl FnOnce() -> Error) -> Result<(), Error> {
    if holds {
        Ok(())
    } else {
        Err(fail())
    }
}

fn text(value: &Value) -> Option<&str> {
    value.as_str()
}
