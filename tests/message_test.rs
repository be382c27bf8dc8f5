//! Integration tests for failure messages.

use serde_json::json;
use tripwire::message::{describe, interpolate};
use tripwire::{lazy, that, CallOptions, Fluent, Message, MessageParams};

#[test]
fn test_default_messages_describe_the_value() {
    let err = that(json!(10)).string().unwrap_err();
    assert!(err.to_string().starts_with("Value 10 expected to be string"));

    let err = that(json!([1])).min_length(3).unwrap_err();
    assert!(err.to_string().contains("<ARRAY>"));
}

#[test]
fn test_long_strings_are_truncated() {
    let long = "x".repeat(150);
    let described = describe(&json!(long));
    assert_eq!(described.chars().count(), 102);
    assert!(described.ends_with("...\""));
}

#[test]
fn test_template_placeholders() {
    let mut params = MessageParams::new();
    params.insert("min".into(), json!(3));
    params.insert("name".into(), json!("bob"));

    assert_eq!(interpolate("{name} needs {min}", &params), "bob needs 3");
    assert_eq!(interpolate("{unknown} stays", &params), "{unknown} stays");
    assert_eq!(interpolate("open { brace", &params), "open { brace");
}

#[test]
fn test_callback_runs_only_on_failure() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let message = Message::callback(move |params| {
        counter.fetch_add(1, Ordering::SeqCst);
        format!("bad {}", params["value"])
    });

    let options = CallOptions::new().message(message);
    assert!(that(json!(1))
        .assert_with("integer", &[], options.clone())
        .is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let err = that(json!("a"))
        .assert_with("integer", &[], options)
        .unwrap_err();
    assert_eq!(err.to_string(), "bad \"a\"");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_entry_message_applies_to_every_call() {
    let err = lazy()
        .that_with(json!(""), "username", "{property_path} is required")
        .try_all()
        .not_blank()
        .min_length(3)
        .verify_now()
        .unwrap_err();

    let messages: Vec<_> = err.failures().iter().map(|f| f.message().to_string()).collect();
    assert_eq!(messages, vec!["username is required", "username is required"]);
}
