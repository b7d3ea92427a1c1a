//! Integration tests for the structural match engine.

use contour::pattern::any as wildcard;
use contour::pattern::{all_of, any_of, array, not, number, optional, select_as, string};
use contour::{is_match, match_pattern, match_select, Pattern, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn json(value: serde_json::Value) -> Value {
    Value::from_json(&value)
}

#[test]
fn test_literal_same_value_nan() {
    let pattern = Pattern::from(f64::NAN);
    assert!(is_match(&pattern, &Value::Float(f64::NAN)));
    assert!(!is_match(&pattern, &Value::Float(0.0)));
}

#[test]
fn test_literal_distinguishes_signed_zero() {
    assert!(!is_match(&Pattern::from(0.0), &Value::Float(-0.0)));
    assert!(!is_match(&Pattern::from(-0.0), &Value::Float(0.0)));
    assert!(is_match(&Pattern::from(-0.0), &Value::Float(-0.0)));
    assert!(!is_match(&Pattern::from(0), &Value::Float(-0.0)));
    assert!(is_match(&Pattern::from(0), &Value::Float(0.0)));
}

#[test]
fn test_tuple_length_exactness() {
    let pattern = Pattern::Seq(vec![Pattern::from(1), Pattern::from(2)]);
    assert!(!is_match(&pattern, &json(serde_json::json!([1, 2, 3]))));
    assert!(is_match(&pattern, &json(serde_json::json!([1, 2]))));
    assert!(!is_match(&pattern, &json(serde_json::json!([1, 3]))));
}

#[test]
fn test_optional_key_relaxation() {
    let pattern = Pattern::record([("x", optional(number()))]);
    assert!(is_match(&pattern, &json(serde_json::json!({}))));
    assert!(is_match(&pattern, &json(serde_json::json!({"x": 5}))));
    assert!(!is_match(&pattern, &json(serde_json::json!({"x": "s"}))));
}

#[test]
fn test_negation_selects_nothing() {
    let pattern = not(select_as("n", string()).expect("name is not reserved"));
    let selections = match_select(&pattern, &Value::Int(3)).expect("inner fails, not matches");
    assert!(selections.get("n").is_none());
    assert!(selections.is_empty());

    // When the inner pattern matches, the negation fails outright.
    assert!(match_select(&pattern, &Value::from("text")).is_none());
}

#[test]
fn test_or_short_circuit_selection() {
    let boom = contour::pattern::when(|_: &Value| panic!("second alternative was attempted"));
    let pattern = any_of(vec![
        select_as("k", string()).expect("name is not reserved"),
        select_as("k", boom).expect("name is not reserved"),
    ]);
    let selections = match_select(&pattern, &Value::from("abc")).expect("first alternative matches");
    assert_eq!(selections.get("k"), Some(&Value::from("abc")));
}

#[test]
fn test_or_falls_through_to_later_alternative() {
    let pattern = any_of(vec![
        select_as("k", string()).expect("name is not reserved"),
        select_as("k", number()).expect("name is not reserved"),
    ]);
    let selections = match_select(&pattern, &Value::Int(4)).expect("second alternative matches");
    assert_eq!(selections.get("k"), Some(&Value::Int(4)));
}

#[test]
fn test_array_selection_accumulation() {
    let pattern = array(select_as("item", wildcard()).expect("name is not reserved"));

    let selections = match_select(&pattern, &json(serde_json::json!([1, 2, 3]))).expect("matches");
    assert_eq!(
        selections.get("item"),
        Some(&Value::Array(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3)
        ]))
    );

    let selections = match_select(&pattern, &json(serde_json::json!([]))).expect("matches");
    assert!(selections.get("item").is_none());
    assert!(selections.is_empty());
}

#[test]
fn test_partial_selection_discard() {
    let pattern = all_of(vec![
        select_as("a", wildcard()).expect("name is not reserved"),
        string(),
    ]);
    // The first branch binds "a" before the second branch fails; the public
    // API must expose none of it.
    assert!(match_select(&pattern, &Value::Int(3)).is_none());
}

#[test]
fn test_nested_structure_selection_order() {
    let pattern = Pattern::record([
        (
            "user",
            Pattern::record([(
                "name",
                select_as("name", string()).expect("name is not reserved"),
            )]),
        ),
        (
            "roles",
            array(select_as("role", string()).expect("name is not reserved")),
        ),
    ]);
    let value = json(serde_json::json!({
        "user": {"name": "ada", "id": 1},
        "roles": ["admin", "ops"]
    }));
    let selections = match_select(&pattern, &value).expect("matches");
    let names: Vec<&str> = selections.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["name", "role"]);
    assert_eq!(selections.get("name"), Some(&Value::from("ada")));
    assert_eq!(
        selections.get("role"),
        Some(&Value::Array(vec![Value::from("admin"), Value::from("ops")]))
    );
}

#[test]
fn test_cyclic_free_termination_on_deep_value() {
    // Recursion is driven by pattern shape, so a value much deeper than the
    // pattern terminates immediately.
    let mut deep = serde_json::json!({"leaf": true});
    for _ in 0..64 {
        deep = serde_json::json!({"next": deep});
    }
    let pattern = Pattern::record([("next", Pattern::record::<String, _>([]))]);
    assert!(is_match(&pattern, &json(deep)));
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        prop_oneof![
            Just(f64::NAN),
            Just(0.0f64),
            Just(-0.0f64),
            proptest::num::f64::ANY,
        ]
        .prop_map(Value::Float),
        "[a-z]{0,8}".prop_map(|s| Value::from(s.as_str())),
    ]
}

fn results_agree(a: &contour::MatchResult, b: &contour::MatchResult) -> bool {
    a.matched == b.matched
        && a.selections.len() == b.selections.len()
        && a.selections.iter().zip(&b.selections).all(|(x, y)| {
            x.name == y.name && x.value.same_value_eq(&y.value)
        })
}

proptest! {
    #[test]
    fn prop_literal_patterns_are_reflexive(value in scalar_value()) {
        let pattern = Pattern::Literal(value.clone());
        prop_assert!(is_match(&pattern, &value));
    }

    #[test]
    fn prop_matching_is_idempotent(value in scalar_value()) {
        let pattern = select_as("v", wildcard()).expect("name is not reserved");
        let first = match_pattern(&pattern, &value);
        let second = match_pattern(&pattern, &value);
        prop_assert!(results_agree(&first, &second));
    }

    #[test]
    fn prop_guard_and_literal_agree_on_ints(i in proptest::num::i64::ANY) {
        let literal = Pattern::from(i);
        let guarded = contour::pattern::when(move |v: &Value| v.as_int() == Some(i));
        let value = Value::Int(i);
        prop_assert_eq!(is_match(&literal, &value), is_match(&guarded, &value));
    }
}
