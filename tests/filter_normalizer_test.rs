// ABOUTME: Unit tests for the default discovery filter normalizer
// ABOUTME: Tests distance aliases, scalar handling, key validation and error keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

use serde_json::json;
use spotter_server::discovery::{
    FilterInput, FilterNormalizer, FilterSyntaxError, FilterValue, NormalizedFilter,
    QueryFilterNormalizer,
};

fn normalize(value: serde_json::Value) -> Result<NormalizedFilter, FilterSyntaxError> {
    let raw: FilterInput = serde_json::from_value(value).unwrap();
    QueryFilterNormalizer.normalize(&raw)
}

fn error_key(value: serde_json::Value) -> String {
    normalize(value).unwrap_err().key
}

#[test]
fn test_empty_filter_has_no_constraints() {
    let filter = normalize(json!({})).unwrap();
    assert_eq!(filter, NormalizedFilter::default());
}

#[test]
fn test_distance_aliases() {
    for key in ["distanceKm", "distance_km", "distance"] {
        let filter = normalize(json!({ key: 12.5 })).unwrap();
        assert_eq!(filter.distance_km, Some(12.5), "alias {key}");
        assert!(filter.equality.is_empty());
    }
}

#[test]
fn test_distance_from_query_string_text() {
    let filter = normalize(json!({"distanceKm": " 7 "})).unwrap();
    assert_eq!(filter.distance_km, Some(7.0));

    let filter = normalize(json!({"distanceKm": ""})).unwrap();
    assert_eq!(filter.distance_km, None);
}

#[test]
fn test_distance_must_be_positive_number() {
    assert_eq!(error_key(json!({"distanceKm": 0})), "distanceKm");
    assert_eq!(error_key(json!({"distanceKm": -3})), "distanceKm");
    assert_eq!(error_key(json!({"distance": "far"})), "distance");
    assert_eq!(error_key(json!({"distance_km": true})), "distance_km");
    assert_eq!(error_key(json!({"distanceKm": null})), "distanceKm");
}

#[test]
fn test_distance_given_twice_is_rejected() {
    let error = normalize(json!({"distance": 5, "distanceKm": 10})).unwrap_err();
    assert!(error.reason.contains("more than once"));
}

#[test]
fn test_scalar_values_become_equality_constraints() {
    let filter = normalize(json!({
        "gym": "gym-1",
        "isPremium": true,
        "trainingExperience": 3,
        "sex": "female"
    }))
    .unwrap();

    assert_eq!(filter.distance_km, None);
    assert_eq!(filter.equality.len(), 4);
    assert_eq!(filter.equality["gym"], FilterValue::Text("gym-1".to_owned()));
    assert_eq!(filter.equality["isPremium"], FilterValue::Boolean(true));
    assert_eq!(filter.equality["trainingExperience"], FilterValue::Integer(3));
}

#[test]
fn test_numeric_and_boolean_text_stay_text() {
    let filter = normalize(json!({"isPremium": "true", "trainingExperience": "2"})).unwrap();

    assert_eq!(
        filter.equality["isPremium"],
        FilterValue::Text("true".to_owned())
    );
    assert_eq!(filter.equality["isPremium"].as_bool(), Some(true));
    assert_eq!(filter.equality["trainingExperience"].as_text(), "2");
}

#[test]
fn test_empty_strings_are_dropped() {
    let filter = normalize(json!({"gym": "", "sex": "male"})).unwrap();
    assert_eq!(filter.equality.len(), 1);
    assert!(filter.equality.contains_key("sex"));
}

#[test]
fn test_unknown_keys_pass_through() {
    let filter = normalize(json!({"favouriteColour": "red"})).unwrap();
    assert!(filter.equality.contains_key("favouriteColour"));
}

#[test]
fn test_non_scalar_values_are_rejected() {
    assert_eq!(error_key(json!({"gym": null})), "gym");
    assert_eq!(error_key(json!({"languages": ["en", "tr"]})), "languages");
    assert_eq!(error_key(json!({"gym": {"$ne": "x"}})), "gym");
    assert_eq!(error_key(json!({"trainingExperience": 2.5})), "trainingExperience");
}

#[test]
fn test_keys_must_be_identifiers() {
    assert_eq!(error_key(json!({"$where": "1"})), "$where");
    assert_eq!(error_key(json!({"gym id": "x"})), "gym id");
    assert_eq!(error_key(json!({"1gym": "x"})), "1gym");
    assert_eq!(error_key(json!({"": "x"})), "");

    let long_key = "k".repeat(65);
    assert_eq!(error_key(json!({ long_key.clone(): "x" })), long_key);
    assert!(normalize(json!({ "k".repeat(64): "x" })).is_ok());
}

#[test]
fn test_filter_value_bool_interpretation() {
    assert_eq!(FilterValue::Integer(1).as_bool(), Some(true));
    assert_eq!(FilterValue::Integer(0).as_bool(), Some(false));
    assert_eq!(FilterValue::Integer(2).as_bool(), None);
    assert_eq!(FilterValue::Text("FALSE".to_owned()).as_bool(), Some(false));
    assert_eq!(FilterValue::Text("yes".to_owned()).as_bool(), None);
}
