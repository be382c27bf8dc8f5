//! Failure messages.
//!
//! A message is either a static template or a callback. Both receive the
//! [`MessageParams`] the failing predicate built: the assertion name, the
//! offending value and every named constraint it checked against.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Ordered parameters describing one failed predicate call.
pub type MessageParams = IndexMap<String, Value>;

type MessageFn = Arc<dyn Fn(&MessageParams) -> String + Send + Sync>;

/// A caller-supplied failure message.
///
/// Static messages may contain `{name}` placeholders which are filled from
/// the parameter map. Callback messages are evaluated lazily, only when the
/// predicate actually fails.
///
/// # Example
///
/// ```rust
/// use tripwire::Message;
/// use serde_json::json;
///
/// let params = [("min".to_string(), json!(3))].into_iter().collect();
/// let message = Message::from("needs at least {min} characters");
/// assert_eq!(message.render(&params), "needs at least 3 characters");
///
/// let message = Message::callback(|p| format!("{} params", p.len()));
/// assert_eq!(message.render(&params), "1 params");
/// ```
#[derive(Clone)]
pub enum Message {
    /// A template with optional `{name}` placeholders.
    Static(String),
    /// A function of the failure's parameter map.
    Callback(MessageFn),
}

impl Message {
    /// Creates a callback message.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&MessageParams) -> String + Send + Sync + 'static,
    {
        Message::Callback(Arc::new(f))
    }

    /// Resolves the message against the given parameters.
    pub fn render(&self, params: &MessageParams) -> String {
        match self {
            Message::Static(template) => interpolate(template, params),
            Message::Callback(f) => f(params),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Message::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Static(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Static(s)
    }
}

/// Replaces `{name}` placeholders with the matching parameter.
///
/// Placeholders without a matching parameter are kept verbatim.
pub fn interpolate(template: &str, params: &MessageParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.get(key) {
                    Some(value) => out.push_str(&plain(value)),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

const MAX_DESCRIBED_LEN: usize = 100;

/// Renders a value for use inside a default message.
///
/// Strings are quoted and cut at 100 characters, containers are
/// summarised rather than dumped.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "<NULL>".to_string(),
        Value::Bool(true) => "<TRUE>".to_string(),
        Value::Bool(false) => "<FALSE>".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_DESCRIBED_LEN {
                let cut: String = s.chars().take(MAX_DESCRIBED_LEN - 3).collect();
                format!("\"{}...\"", cut)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(_) => "<ARRAY>".to_string(),
        Value::Object(_) => "<OBJECT>".to_string(),
    }
}

// Interpolated parameters read better without JSON string quoting.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => describe(other),
    }
}
