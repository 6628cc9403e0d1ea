//! Unary value transformers and the named catalog used by definition documents.
//!
//! Built-in transformers pass `null` through unchanged and leave values of an
//! unexpected kind untouched, except the numeric and boolean conversions, which
//! yield `null` when the input cannot be converted.

use fxhash::FxHashMap;
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(Value) -> Value + Send + Sync;

/// A shareable unary function applied to an extracted value before assignment.
#[derive(Clone)]
pub struct Transformer {
    name: Cow<'static, str>,
    func: Arc<TransformFn>,
}

impl Transformer {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self { name: name.into(), func: Arc::new(func) }
    }

    /// Wraps a closure declared inline in a definition block.
    pub fn anonymous<F>(func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::new("<closure>", func)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn call(&self, value: Value) -> Value {
        (self.func)(value)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transformer").field(&self.name).finish()
    }
}

/// Named transformers available to definition blocks and documents.
#[derive(Debug, Clone)]
pub struct TransformCatalog {
    entries: FxHashMap<Cow<'static, str>, Transformer>,
}

impl Default for TransformCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TransformCatalog {
    /// A catalog without any transformer.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: FxHashMap::default() }
    }

    /// A catalog holding the built-in transformers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut catalog = Self::empty();
        catalog.register("identity", |value| value);
        catalog.register("upcase", |value| map_str(value, str::to_uppercase));
        catalog.register("downcase", |value| map_str(value, str::to_lowercase));
        catalog.register("trim", |value| map_str(value, |s| s.trim().to_owned()));
        catalog.register("to_string", to_string);
        catalog.register("to_integer", to_integer);
        catalog.register("to_float", to_float);
        catalog.register("to_boolean", to_boolean);
        catalog.register("presence", presence);
        catalog
    }

    /// Adds or replaces the transformer registered under `name`.
    pub fn register<F>(&mut self, name: impl Into<Cow<'static, str>>, func: F) -> &mut Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        self.entries.insert(name.clone(), Transformer::new(name, func));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Transformer> {
        self.entries.get(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn map_str(value: Value, f: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

fn to_string(value: Value) -> Value {
    match value {
        Value::Null | Value::String(_) => value,
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        composite => Value::String(composite.to_string()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_integer(value: Value) -> Value {
    let integer = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        },
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    integer.map_or(Value::Null, Value::from)
}

fn to_float(value: Value) -> Value {
    let float = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    float.and_then(Number::from_f64).map_or(Value::Null, Value::Number)
}

fn to_boolean(value: Value) -> Value {
    let boolean = match &value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    boolean.map_or(Value::Null, Value::Bool)
}

fn presence(value: Value) -> Value {
    let blank = match &value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if blank { Value::Null } else { value }
}
