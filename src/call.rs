//! Per-call inputs handed to predicates.
//!
//! A predicate never sees the chain that called it. It receives an
//! [`Invocation`]: its own name, the subject, the positional arguments and
//! the merged [`CallOptions`]. Everything it needs to build a [`Failure`]
//! is local to that value.

use indexmap::IndexMap;
use serde_json::Value;

use crate::code::Code;
use crate::error::{Error, Failure, UsageError};
use crate::message::{Message, MessageParams};

/// Optional per-call overrides.
///
/// Explicit values win over a chain's defaults; missing values are filled
/// from them.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub message: Option<Message>,
    pub property_path: Option<String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    /// Fills any unset field from `defaults`.
    pub fn merged_with(&self, defaults: &CallOptions) -> CallOptions {
        CallOptions {
            message: self.message.clone().or_else(|| defaults.message.clone()),
            property_path: self
                .property_path
                .clone()
                .or_else(|| defaults.property_path.clone()),
        }
    }
}

/// One predicate call: name, subject, arguments and options.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    pub args: &'a [Value],
    pub options: &'a CallOptions,
}

impl<'a> Invocation<'a> {
    pub fn new(name: &'a str, value: &'a Value, args: &'a [Value], options: &'a CallOptions) -> Self {
        Self {
            name,
            value,
            args,
            options,
        }
    }

    /// Same call, different subject. Used when mapping over elements.
    pub fn with_value(&self, value: &'a Value) -> Self {
        Self { value, ..*self }
    }

    /// Same call routed to a different predicate name.
    pub fn renamed(&self, name: &'a str) -> Self {
        Self { name, ..*self }
    }

    /// Builds the failure for this call.
    ///
    /// `constraints` become both the failure's constraints map and, together
    /// with the assertion name and value, the parameters a caller-supplied
    /// message is rendered with. Without a caller message, `default_message`
    /// is used as is.
    pub fn fail(
        &self,
        code: Code,
        default_message: impl Into<String>,
        constraints: &[(&str, Value)],
    ) -> Error {
        let constraints: IndexMap<String, Value> = constraints
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let message = match self.options.message {
            Some(ref message) => message.render(&self.params(&constraints)),
            None => default_message.into(),
        };

        let mut failure = Failure::new(code, message, self.value.clone())
            .with_constraints(constraints)
            .with_assertion(self.name);
        if let Some(ref path) = self.options.property_path {
            failure = failure.with_property_path(path.clone());
        }
        failure.into()
    }

    fn params(&self, constraints: &IndexMap<String, Value>) -> MessageParams {
        let mut params = MessageParams::new();
        params.insert("assertion".to_string(), Value::String(self.name.to_string()));
        params.insert("value".to_string(), self.value.clone());
        if let Some(ref path) = self.options.property_path {
            params.insert("property_path".to_string(), Value::String(path.clone()));
        }
        for (k, v) in constraints {
            params.insert(k.clone(), v.clone());
        }
        params
    }

    /// Positional argument `index`, or an invalid-argument error naming `what`.
    pub fn arg(&self, index: usize, what: &str) -> Result<&'a Value, Error> {
        self.args
            .get(index)
            .ok_or_else(|| UsageError::invalid_argument(self.name, format!("missing {}", what)).into())
    }

    /// Optional positional argument; `None` when absent or null.
    pub fn opt_arg(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index).filter(|v| !v.is_null())
    }

    pub fn number_arg(&self, index: usize, what: &str) -> Result<f64, Error> {
        self.arg(index, what)?.as_f64().ok_or_else(|| {
            UsageError::invalid_argument(self.name, format!("{} must be a number", what)).into()
        })
    }

    pub fn usize_arg(&self, index: usize, what: &str) -> Result<usize, Error> {
        self.arg(index, what)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                UsageError::invalid_argument(
                    self.name,
                    format!("{} must be a non-negative integer", what),
                )
                .into()
            })
    }

    pub fn str_arg(&self, index: usize, what: &str) -> Result<&'a str, Error> {
        self.arg(index, what)?.as_str().ok_or_else(|| {
            UsageError::invalid_argument(self.name, format!("{} must be a string", what)).into()
        })
    }

    pub fn array_arg(&self, index: usize, what: &str) -> Result<&'a Vec<Value>, Error> {
        self.arg(index, what)?.as_array().ok_or_else(|| {
            UsageError::invalid_argument(self.name, format!("{} must be an array", what)).into()
        })
    }
}
