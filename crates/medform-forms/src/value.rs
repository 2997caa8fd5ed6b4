//! Typed field values and the maps that hold them.
//!
//! A [`FieldValue`] is the tagged union every form value is stored as. The
//! variant in use is decided by the owning field's kind at the boundary (see
//! [`FieldDescriptor::accepts`](crate::fields::FieldDescriptor::accepts)), so
//! the rest of the engine can pattern-match instead of guessing.
//!
//! [`ValueMap`] and [`ErrorMap`] are the two per-form maps keyed by field name.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A caller-owned record, as received from (and sent back to) a backend.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The current value of one form input.
///
/// Serializes to the natural JSON shape (`"text"`, `42`, `true`, `["a","b"]`)
/// because the save payload is handed to hosts that talk JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A checkbox state.
    Bool(bool),
    /// A numeric answer.
    Number(f64),
    /// Free text, a date string, or a single selected option value.
    Text(String),
    /// The selected option values of a multiselect or checkbox group.
    Multi(BTreeSet<String>),
}

impl FieldValue {
    /// An empty text value.
    pub const fn empty_text() -> Self {
        Self::Text(String::new())
    }

    /// An empty multi-valued selection.
    pub const fn empty_multi() -> Self {
        Self::Multi(BTreeSet::new())
    }

    /// Builds a multi-valued selection from any iterator of strings.
    pub fn multi<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(items.into_iter().map(Into::into).collect())
    }

    /// Returns a short name of the variant, used in type-mismatch errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Multi(_) => "selection",
        }
    }

    /// Returns `true` for the empty string and the empty selection.
    ///
    /// `0` and `false` are answers, never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Multi(set) => set.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selection if this is a `Multi` value.
    pub const fn as_multi(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Multi(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the truthiness of a checkbox-like value.
    ///
    /// A non-empty selection counts as checked.
    pub fn is_checked(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Multi(set) => !set.is_empty(),
            Self::Text(s) => matches!(s.as_str(), "true" | "on" | "yes" | "1"),
            Self::Number(n) => *n != 0.0,
        }
    }

    /// Converts a JSON record value into a field value.
    ///
    /// Returns `None` for JSON `null`, which callers treat as absent. When
    /// `multi_valued` is set, a scalar is promoted to a one-element selection.
    pub fn from_json(json: &serde_json::Value, multi_valued: bool) -> Option<Self> {
        let value = match json {
            serde_json::Value::Null => return None,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::Multi(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(_) => Self::Text(json.to_string()),
        };

        if !multi_valued {
            return Some(value);
        }
        Some(match value {
            Self::Text(s) if s.is_empty() => Self::empty_multi(),
            Self::Text(s) => Self::multi([s]),
            other => other,
        })
    }

    /// Converts this value to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Multi(set) => serde_json::Value::Array(
                set.iter().cloned().map(serde_json::Value::String).collect(),
            ),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Multi(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// The in-progress answers of one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(HashMap<String, FieldValue>);

impl ValueMap {
    /// Creates an empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Replaces the value stored under `name`, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(name.into(), value)
    }

    /// Returns `true` if a value is stored under `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Converts the whole map into a JSON record.
    pub fn to_json(&self) -> Record {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

impl FromIterator<(String, FieldValue)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Current validation failures keyed by field name, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(HashMap<String, String>);

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the message recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Records a message for `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.0.insert(name.into(), message.into());
    }

    /// Clears the entry for `name`.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Returns `true` if `name` has an error.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over `(name, message)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Returns the number of fields in error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no field is in error, i.e. the form is valid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}
