//! Integration tests for replacement predicate sources.
//!
//! `RecordingSource` wraps the default registry and records every predicate
//! it evaluates, so tests can prove which calls were reached.

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tripwire::{
    default_registry, Assert, AssertionChain, Code, Error, Fluent, Invocation, LazyAssertion,
    PredicateDef, PredicateRegistry, PredicateSource, UsageError,
};

#[derive(Default)]
struct RecordingSource {
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingSource {
    fn names_called(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    fn values_seen(&self) -> Vec<Value> {
        self.calls.lock().iter().map(|(_, value)| value.clone()).collect()
    }
}

impl PredicateSource for RecordingSource {
    fn names(&self) -> Vec<String> {
        default_registry().names()
    }

    fn contains(&self, name: &str) -> bool {
        default_registry().contains(name)
    }

    fn evaluate(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        self.calls
            .lock()
            .push((invocation.name.to_string(), invocation.value.clone()));
        default_registry().evaluate(invocation)
    }
}

fn recording() -> (Arc<RecordingSource>, Assert) {
    let source = Arc::new(RecordingSource::default());
    let assert = Assert::new().with_source(source.clone()).unwrap();
    (source, assert)
}

#[test]
fn test_chain_stops_before_later_predicates() {
    let (source, assert) = recording();

    let result = assert
        .that(json!(10))
        .string()
        .and_then(|c| c.min_length(3))
        .and_then(|c| c.max_length(20));

    assert!(result.is_err());
    assert_eq!(source.names_called(), vec!["string"]);
}

#[test]
fn test_all_stops_at_first_bad_element() {
    let (source, assert) = recording();

    assert!(assert.check("all_integer", &[json!([1, "2", 3])]).is_err());
    assert_eq!(source.values_seen(), vec![json!(1), json!("2")]);
}

#[test]
fn test_null_or_never_reaches_the_source() {
    let (source, assert) = recording();

    assert!(assert
        .that_null_or(Value::Null)
        .integer()
        .and_then(|c| c.eq(10))
        .is_ok());
    assert!(source.names_called().is_empty());
}

#[test]
fn test_lazy_default_mode_skips_rest_of_entry() {
    let (source, assert) = recording();

    let err = assert
        .lazy()
        .that(json!(10), "foo")
        .string()
        .min_length(5)
        .that(json!("abc"), "bar")
        .string()
        .verify_now()
        .unwrap_err();

    assert_eq!(err.failures().len(), 1);
    assert_eq!(source.names_called(), vec!["string", "string"]);
}

#[test]
fn test_lazy_records_nothing_until_verified() {
    let (source, assert) = recording();

    let pending = assert.lazy().that(json!(1), "a").integer().eq(1);
    assert!(source.names_called().is_empty());

    assert!(pending.verify_now().is_ok());
    assert_eq!(source.names_called(), vec!["integer", "eq"]);
}

#[test]
fn test_instances_do_not_share_state() {
    let (first, first_assert) = recording();
    let (second, _) = recording();

    first_assert.that(json!(1)).integer().unwrap();
    assert_eq!(first.names_called().len(), 1);
    assert!(second.names_called().is_empty());
}

#[test]
fn test_incompatible_source_is_rejected_at_assignment() {
    let partial = PredicateRegistry::new();
    partial
        .register("integer", PredicateDef::new(Code::InvalidInteger, |_| Ok(())))
        .unwrap();
    let partial: Arc<dyn PredicateSource> = Arc::new(partial);

    let err = Assert::new().with_source(Arc::clone(&partial)).unwrap_err();
    match err {
        UsageError::IncompatibleSource { ref missing } => {
            assert!(!missing.contains(&"integer".to_string()));
            assert!(missing.contains(&"string".to_string()));
        }
        ref other => panic!("unexpected error: {other}"),
    }

    let mut chain = AssertionChain::new(json!(1));
    assert!(chain.set_predicate_source(Arc::clone(&partial)).is_err());

    let mut collector = LazyAssertion::new();
    assert!(collector.set_predicate_source(partial).is_err());
}

#[test]
fn test_extended_source_adds_predicates() {
    let registry = PredicateRegistry::with_defaults();
    registry
        .register(
            "slug",
            PredicateDef::new(Code::Custom(10), |call| {
                let ok = call.value.as_str().is_some_and(|s| {
                    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
                });
                if ok {
                    Ok(())
                } else {
                    Err(call.fail(Code::Custom(10), "not a slug", &[]))
                }
            }),
        )
        .unwrap();

    let assert = Assert::new().with_source(Arc::new(registry)).unwrap();
    assert!(assert.that(json!("hello-world")).assert("slug", &[]).is_ok());
    assert!(assert.check("all_slug", &[json!(["a", "b-c"])]).is_ok());

    let err = assert
        .lazy()
        .that(json!("Nope"), "slug")
        .assert("slug", &[])
        .verify_now()
        .unwrap_err();
    assert_eq!(err.failures()[0].message(), "not a slug");
    assert_eq!(err.failures()[0].assertion(), Some("slug"));
    assert_eq!(err.failures()[0].code(), Code::Custom(10));

    // the default registry is untouched
    assert!(tripwire::check("slug", &[json!("a")]).unwrap_err().is_usage());
}
