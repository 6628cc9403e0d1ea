//! Indifferent access over `serde_json` values.
//!
//! Input documents may use plain (`"name"`) or symbolic (`":name"`) keys. [`normalize`]
//! rewrites every object key to its plain form so a single lookup resolves both;
//! when both spellings are present the one appearing last wins.

use h2m_domain::constants::SYMBOL_PREFIX;
use h2m_domain::{FieldPath, Segment};
use serde_json::{Map, Value};

/// Whether `input` counts as a present hash: a non-empty object.
#[must_use]
pub fn is_present(input: &Value) -> bool {
    input.as_object().is_some_and(|map| !map.is_empty())
}

/// Returns a copy of `input` with every object key, at any depth, in plain form.
#[must_use]
pub fn normalize(input: &Value) -> Value {
    match input {
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = key.strip_prefix(SYMBOL_PREFIX).unwrap_or(key);
                normalized.insert(key.to_owned(), normalize(value));
            }
            Value::Object(normalized)
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        other => other.clone(),
    }
}

/// Follows `path` through nested objects and arrays.
///
/// Returns `None` as soon as a level is missing or is a scalar. Key segments index
/// arrays when they parse as a position; index segments look up objects by their
/// decimal spelling.
#[must_use]
pub fn dig<'a>(input: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments().iter().try_fold(input, step)
}

/// Like [`dig`], but yields `null` for a missing value.
#[must_use]
pub fn extract(input: &Value, path: &FieldPath) -> Value {
    dig(input, path).cloned().unwrap_or(Value::Null)
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(&**key),
        (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        (Value::Array(items), Segment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get(index))
        },
        _ => None,
    }
}
