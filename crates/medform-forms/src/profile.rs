//! Read-only profile projection for view mode.
//!
//! View mode does not run any of the editing machinery. It projects a fixed
//! list of label/key pairs against the caller's record, optionally picking a
//! title, a subtitle, and a source for a two-letter initials badge.

use serde::Serialize;

use crate::value::Record;

/// One label/key pair shown in view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewField {
    /// Displayed label.
    pub label: String,
    /// Record key; dots address nested objects (`"address.city"`).
    pub key: String,
}

impl ViewField {
    /// Creates a view field.
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// The ordered fields and markers of a profile view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLayout {
    /// Entries, in display order.
    pub fields: Vec<ViewField>,
    /// Key whose value feeds the initials badge.
    pub initials_key: Option<String>,
    /// Key whose value is the heading.
    pub title_key: Option<String>,
    /// Key whose value is shown under the heading.
    pub subtitle_key: Option<String>,
}

impl ViewLayout {
    /// Creates a layout from its entries.
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = ViewField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the initials source key.
    #[must_use]
    pub fn initials_key(mut self, key: impl Into<String>) -> Self {
        self.initials_key = Some(key.into());
        self
    }

    /// Sets the title key.
    #[must_use]
    pub fn title_key(mut self, key: impl Into<String>) -> Self {
        self.title_key = Some(key.into());
        self
    }

    /// Sets the subtitle key.
    #[must_use]
    pub fn subtitle_key(mut self, key: impl Into<String>) -> Self {
        self.subtitle_key = Some(key.into());
        self
    }
}

/// One rendered label/value line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    /// Displayed label.
    pub label: String,
    /// Source key.
    pub key: String,
    /// Display text.
    pub value: String,
}

/// The projected profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    /// Heading, when a title key is set and has a value.
    pub title: Option<String>,
    /// Sub-heading, when a subtitle key is set and has a value.
    pub subtitle: Option<String>,
    /// Up to two uppercase initials.
    pub initials: Option<String>,
    /// Entries, in layout order.
    pub entries: Vec<ProfileEntry>,
}

/// Looks up `key` in `record`, trying the literal key before a dotted path.
pub fn lookup<'a>(record: &'a Record, key: &str) -> Option<&'a serde_json::Value> {
    if let Some(value) = record.get(key) {
        return Some(value);
    }
    let mut parts = key.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Formats a JSON value for display; null, empty strings, and empty arrays
/// show `empty`.
pub fn display_json(value: Option<&serde_json::Value>, empty: &str) -> String {
    match value {
        None | Some(serde_json::Value::Null) => empty.to_string(),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => empty.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Bool(true)) => "Yes".to_string(),
        Some(serde_json::Value::Bool(false)) => "No".to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Array(items)) if items.is_empty() => empty.to_string(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| display_json(Some(item), empty))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other @ serde_json::Value::Object(_)) => other.to_string(),
    }
}

/// Returns the uppercase first letters of the first two words of `text`.
pub fn initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn non_empty_text(record: &Record, key: Option<&str>) -> Option<String> {
    let value = lookup(record, key?)?;
    let text = display_json(Some(value), "");
    (!text.is_empty()).then_some(text)
}

/// Projects `layout` against `record`.
pub fn project(layout: &ViewLayout, record: &Record, empty_display: &str) -> ProfileView {
    let entries = layout
        .fields
        .iter()
        .map(|field| ProfileEntry {
            label: field.label.clone(),
            key: field.key.clone(),
            value: display_json(lookup(record, &field.key), empty_display),
        })
        .collect();

    ProfileView {
        title: non_empty_text(record, layout.title_key.as_deref()),
        subtitle: non_empty_text(record, layout.subtitle_key.as_deref()),
        initials: non_empty_text(record, layout.initials_key.as_deref())
            .map(|text| initials(&text))
            .filter(|letters| !letters.is_empty()),
        entries,
    }
}
