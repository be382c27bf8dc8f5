//! Integration tests for failure codes.

use serde_json::json;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tripwire::predicates::CATALOG;
use tripwire::{check, default_registry, Code, PredicateDef, PredicateRegistry};

#[test]
fn test_defined_codes_are_unique() {
    let mut seen = HashSet::new();
    for code in Code::ALL {
        assert!(seen.insert(code.as_u32()), "{} is defined twice", code);
    }
}

#[test]
fn test_registry_codes_are_unique() {
    let mut seen = HashSet::new();
    for (name, code) in default_registry().codes() {
        assert!(seen.insert(code), "{name} reuses {code}");
    }
    assert!(!seen.contains(&Code::InvalidTraversable));
}

#[test]
fn test_codes_round_trip_through_numbers() {
    for code in Code::ALL {
        assert_eq!(Code::from_u32(code.as_u32()), Some(*code));
    }
    assert_eq!(Code::from_u32(0), None);
}

#[test]
fn test_code_numbers_are_stable() {
    assert_eq!(Code::InvalidInteger.as_u32(), 10);
    assert_eq!(Code::InvalidTraversable.as_u32(), 44);
    assert_eq!(Code::InvalidEmail.as_u32(), 201);
    assert_eq!(Code::InvalidInteger.to_string(), "INVALID_INTEGER (10)");
}

#[test]
fn test_failure_reports_registered_code() {
    for (name, args, code) in [
        ("uuid", vec![json!("nope")], Code::InvalidUuid),
        ("ipv4", vec![json!("1.2.3")], Code::InvalidIp),
        ("choice", vec![json!("c"), json!(["a", "b"])], Code::InvalidChoice),
        ("true", vec![json!(false)], Code::InvalidTrue),
    ] {
        let err = check(name, &args).unwrap_err();
        assert_eq!(err.as_failure().unwrap().code(), code, "{name}");
    }
}

/// Arguments (subject first) that make each built-in predicate fail.
fn failing_calls(dir: &str, missing: &str) -> HashMap<&'static str, Vec<Value>> {
    HashMap::from([
        // types
        ("integer", vec![json!("x")]),
        ("float", vec![json!(1)]),
        ("numeric", vec![json!("x")]),
        ("integerish", vec![json!("x")]),
        ("boolean", vec![json!(1)]),
        ("string", vec![json!(1)]),
        ("scalar", vec![json!([1])]),
        ("is_array", vec![json!(1)]),
        ("is_object", vec![json!(1)]),
        ("null", vec![json!(1)]),
        ("not_null", vec![Value::Null]),
        ("true", vec![json!(false)]),
        ("false", vec![json!(true)]),
        // comparison
        ("eq", vec![json!(1), json!(2)]),
        ("not_eq", vec![json!(1), json!(1)]),
        ("same", vec![json!(1), json!(1.0)]),
        ("not_same", vec![json!(1), json!(1)]),
        ("min", vec![json!(1), json!(5)]),
        ("max", vec![json!(9), json!(5)]),
        ("between", vec![json!(1), json!(5), json!(9)]),
        ("between_exclusive", vec![json!(5), json!(5), json!(9)]),
        ("range", vec![json!(1), json!(5), json!(9)]),
        ("less_than", vec![json!(5), json!(5)]),
        ("less_or_equal", vec![json!(6), json!(5)]),
        ("greater_than", vec![json!(5), json!(5)]),
        ("greater_or_equal", vec![json!(4), json!(5)]),
        // strings
        ("not_empty", vec![json!("")]),
        ("empty", vec![json!("a")]),
        ("not_blank", vec![json!(" ")]),
        ("length", vec![json!("ab"), json!(3)]),
        ("min_length", vec![json!("ab"), json!(3)]),
        ("max_length", vec![json!("abcd"), json!(3)]),
        ("between_length", vec![json!("a"), json!(2), json!(4)]),
        ("starts_with", vec![json!("ab"), json!("x")]),
        ("ends_with", vec![json!("ab"), json!("x")]),
        ("contains", vec![json!("ab"), json!("x")]),
        ("not_contains", vec![json!("ab"), json!("a")]),
        ("regex", vec![json!("ab"), json!("^x")]),
        ("not_regex", vec![json!("ab"), json!("^a")]),
        ("alnum", vec![json!("1a")]),
        ("digit", vec![json!("a")]),
        // collections
        ("choice", vec![json!("c"), json!(["a"])]),
        ("not_in_array", vec![json!("a"), json!(["a"])]),
        ("count", vec![json!([1]), json!(2)]),
        ("min_count", vec![json!([1]), json!(2)]),
        ("max_count", vec![json!([1, 2, 3]), json!(2)]),
        ("key_exists", vec![json!({}), json!("a")]),
        ("key_not_exists", vec![json!({"a": 1}), json!("a")]),
        ("unique_values", vec![json!([1, 1])]),
        // formats
        ("email", vec![json!("x")]),
        ("url", vec![json!("x")]),
        ("uuid", vec![json!("x")]),
        ("ipv4", vec![json!("x")]),
        ("e164", vec![json!("x")]),
        ("base64", vec![json!("!")]),
        ("json_string", vec![json!("{")]),
        // filesystem
        ("file", vec![json!(dir)]),
        ("directory", vec![json!(missing)]),
        ("readable", vec![json!(missing)]),
        ("writeable", vec![json!(missing)]),
        ("file_not_exists", vec![json!(dir)]),
    ])
}

#[test]
fn test_every_catalog_predicate_reports_its_code() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let calls = failing_calls(
        dir.path().to_str().unwrap(),
        missing.to_str().unwrap(),
    );

    for (name, code, _) in CATALOG {
        let args = calls
            .get(name)
            .unwrap_or_else(|| panic!("no failing call for '{name}'"));
        let err = check(name, args).unwrap_err();
        let failure = err
            .as_failure()
            .unwrap_or_else(|| panic!("'{name}' raised {err}"));
        assert_eq!(failure.code(), *code, "{name}");
    }
    assert_eq!(calls.len(), CATALOG.len(), "rows for predicates not in the catalog");
}

#[test]
fn test_extended_registry_codes_stay_unique() {
    let registry = PredicateRegistry::with_defaults();
    registry
        .register("slug", PredicateDef::new(Code::Custom(1), |_| Ok(())))
        .unwrap();
    assert!(registry
        .register("handle", PredicateDef::new(Code::InvalidRegex, |_| Ok(())))
        .is_err());

    let mut seen = HashSet::new();
    for (name, code) in registry.codes() {
        assert!(seen.insert(code), "{name} reuses {code}");
    }
    assert!(seen.contains(&Code::Custom(1)));
}
