// ABOUTME: Structured discovery filters and the normalizer that produces them
// ABOUTME: Turns loosely-typed query maps into equality constraints plus an optional radius
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::discovery::MAX_FILTER_KEY_LEN;

/// Raw filter as received from the caller: arbitrary keys, untyped values
pub type FilterInput = BTreeMap<String, Value>;

/// Keys accepted for the search radius, in kilometers
pub const DISTANCE_KEYS: [&str; 3] = ["distanceKm", "distance_km", "distance"];

/// A scalar value an equality constraint compares against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean flag
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Text
    Text(String),
}

impl FilterValue {
    /// Textual form used when comparing against text columns
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Boolean interpretation, accepting `true`/`false`/`1`/`0` text and integers
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            Self::Integer(0) => Some(false),
            Self::Integer(1) => Some(true),
            Self::Integer(_) => None,
            Self::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Validated filter: equality constraints plus an optional radius
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFilter {
    /// Attribute equality constraints, passed to the store verbatim
    pub equality: BTreeMap<String, FilterValue>,
    /// Search radius around the requester, in kilometers
    pub distance_km: Option<f64>,
}

/// The raw filter could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter `{key}`: {reason}")]
pub struct FilterSyntaxError {
    /// Offending key
    pub key: String,
    /// What is wrong with it
    pub reason: String,
}

impl FilterSyntaxError {
    fn new(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Produces a [`NormalizedFilter`] from caller input.
///
/// Implementations check key and value shapes only; whether a key names a
/// real profile attribute is decided by the store.
pub trait FilterNormalizer: Send + Sync {
    /// Normalize a raw filter
    ///
    /// # Errors
    ///
    /// Returns [`FilterSyntaxError`] naming the first offending key
    fn normalize(&self, raw: &FilterInput) -> Result<NormalizedFilter, FilterSyntaxError>;
}

/// Default normalizer for query-string and JSON-object filters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFilterNormalizer;

impl FilterNormalizer for QueryFilterNormalizer {
    fn normalize(&self, raw: &FilterInput) -> Result<NormalizedFilter, FilterSyntaxError> {
        let mut filter = NormalizedFilter::default();

        for (key, value) in raw {
            if DISTANCE_KEYS.contains(&key.as_str()) {
                if let Some(distance) = parse_distance(key, value)? {
                    if filter.distance_km.is_some() {
                        return Err(FilterSyntaxError::new(key, "distance given more than once"));
                    }
                    filter.distance_km = Some(distance);
                }
                continue;
            }

            validate_key(key)?;
            if let Some(value) = parse_scalar(key, value)? {
                filter.equality.insert(key.clone(), value);
            }
        }

        Ok(filter)
    }
}

fn validate_key(key: &str) -> Result<(), FilterSyntaxError> {
    if key.is_empty() || key.len() > MAX_FILTER_KEY_LEN {
        return Err(FilterSyntaxError::new(
            key,
            format!("key must be 1 to {MAX_FILTER_KEY_LEN} characters"),
        ));
    }

    let mut chars = key.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(FilterSyntaxError::new(
            key,
            "key must be an identifier (letters, digits, underscore)",
        ));
    }
    Ok(())
}

fn parse_scalar(key: &str, value: &Value) -> Result<Option<FilterValue>, FilterSyntaxError> {
    match value {
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(FilterValue::Text(text.clone()))),
        Value::Bool(flag) => Ok(Some(FilterValue::Boolean(*flag))),
        Value::Number(number) => number
            .as_i64()
            .map(|n| Some(FilterValue::Integer(n)))
            .ok_or_else(|| FilterSyntaxError::new(key, "only whole numbers can be matched")),
        Value::Null => Err(FilterSyntaxError::new(key, "null cannot be matched")),
        Value::Array(_) | Value::Object(_) => Err(FilterSyntaxError::new(
            key,
            "only scalar values can be matched",
        )),
    }
}

fn parse_distance(key: &str, value: &Value) -> Result<Option<f64>, FilterSyntaxError> {
    let distance = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| FilterSyntaxError::new(key, "distance is not a number"))?,
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| FilterSyntaxError::new(key, format!("'{text}' is not a number")))?,
        _ => {
            return Err(FilterSyntaxError::new(
                key,
                "distance must be a number of kilometers",
            ))
        }
    };

    if !distance.is_finite() || distance <= 0.0 {
        return Err(FilterSyntaxError::new(
            key,
            "distance must be a positive number of kilometers",
        ));
    }
    Ok(Some(distance))
}
