//! Format predicates.
//!
//! The patterns are deliberately simple shape checks, not full grammars.

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

use crate::call::Invocation;
use crate::code::Code;
use crate::error::Error;
use crate::message::describe;

use super::{ensure, text};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$";
const URL_PATTERN: &str = r"(?i)^(https?|ftps?)://[^\s/$.?#][^\s]*$";
const UUID_PATTERN: &str =
    r"(?i)^(urn:)?(uuid:)?\{?[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\}?$";
const E164_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";
const BASE64_PATTERN: &str = r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$";

// Only called with the constants above.
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern is valid"))
}

fn matches_format(
    call: &Invocation<'_>,
    code: Code,
    re: &Regex,
    what: &str,
) -> Result<(), Error> {
    ensure(text(call.value).is_some_and(|s| re.is_match(s)), || {
        call.fail(
            code,
            format!("Value {} was expected to be a valid {}.", describe(call.value), what),
            &[],
        )
    })
}

pub fn email(call: &Invocation<'_>) -> Result<(), Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, EMAIL_PATTERN);
    matches_format(call, Code::InvalidEmail, re, "e-mail address")
}

pub fn url(call: &Invocation<'_>) -> Result<(), Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, URL_PATTERN);
    matches_format(call, Code::InvalidUrl, re, "URL")
}

/// Accepts the optional `urn:uuid:` prefix and surrounding braces.
pub fn uuid(call: &Invocation<'_>) -> Result<(), Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, UUID_PATTERN);
    matches_format(call, Code::InvalidUuid, re, "UUID")
}

pub fn ipv4(call: &Invocation<'_>) -> Result<(), Error> {
    let holds = text(call.value).is_some_and(|s| s.parse::<Ipv4Addr>().is_ok());
    ensure(holds, || {
        call.fail(
            Code::InvalidIp,
            format!("Value {} was expected to be a valid IPv4 address.", describe(call.value)),
            &[],
        )
    })
}

pub fn e164(call: &Invocation<'_>) -> Result<(), Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, E164_PATTERN);
    matches_format(call, Code::InvalidE164, re, "E164 phone number")
}

pub fn base64(call: &Invocation<'_>) -> Result<(), Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = compiled(&RE, BASE64_PATTERN);
    matches_format(call, Code::InvalidBase64, re, "base64 string")
}

pub fn json_string(call: &Invocation<'_>) -> Result<(), Error> {
    let holds =
        text(call.value).is_some_and(|s| serde_json::from_str::<serde_json::Value>(s).is_ok());
    ensure(holds, || {
        call.fail(
            Code::InvalidJsonString,
            format!("Value {} is not a valid JSON string.", describe(call.value)),
            &[],
        )
    })
}
