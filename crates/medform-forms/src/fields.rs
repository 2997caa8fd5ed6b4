//! Field descriptors: the declarative contract a host screen provides per input.
//!
//! A [`FieldDescriptor`] carries a field's kind, label, display hints, options,
//! constraints, an optional visibility predicate, and an optional custom
//! validator. Descriptors have no behavior of their own beyond answering
//! questions about themselves (which keys they own, which value shapes they
//! accept, what their empty default is).
//!
//! [`validate_descriptors`] is the boundary check run whenever a field list is
//! accepted from a host.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use medform_core::{FormError, FormResult};

use crate::value::{FieldValue, ValueMap};

/// The kind of a form input.
///
/// Composite kinds carry the name of the companion key they also own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// A numeric input.
    Number,
    /// A date picker (ISO `YYYY-MM-DD` text).
    Date,
    /// A single-choice dropdown.
    Select,
    /// A multiple-choice dropdown.
    MultiSelect,
    /// A single checkbox, or a checkbox group when options are given.
    Checkbox,
    /// A checkbox with an attached free-text input stored under `input_name`.
    CheckboxWithInput {
        /// Key of the companion free-text value.
        input_name: String,
    },
    /// A radio button group.
    Radio,
    /// Multi-line free text.
    Textarea,
    /// Search-as-you-type over the field's options.
    SearchSelect,
    /// An amount plus a unit chosen from the field's options, stored under
    /// `unit_name`.
    Duration {
        /// Key of the companion unit value.
        unit_name: String,
    },
}

impl FieldKind {
    /// A checkbox-with-input kind whose companion key is `<name>Detail`.
    pub fn checkbox_with_input_for(name: &str) -> Self {
        Self::CheckboxWithInput {
            input_name: format!("{name}Detail"),
        }
    }

    /// A duration kind whose companion key is `<name>Unit`.
    pub fn duration_for(name: &str) -> Self {
        Self::Duration {
            unit_name: format!("{name}Unit"),
        }
    }

    /// Returns `true` if a descriptor of this kind must declare options.
    pub const fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect | Self::Radio)
    }

    /// Returns `true` if this kind opens a dropdown with an inline search box.
    pub const fn has_dropdown(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect | Self::SearchSelect)
    }

    /// Returns the companion key owned by composite kinds.
    pub fn companion_name(&self) -> Option<&str> {
        match self {
            Self::CheckboxWithInput { input_name } => Some(input_name),
            Self::Duration { unit_name } => Some(unit_name),
            _ => None,
        }
    }

    /// Returns the kind's canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Checkbox => "checkbox",
            Self::CheckboxWithInput { .. } => "checkbox-with-input",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::SearchSelect => "search-select",
            Self::Duration { .. } => "duration",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable `{value, label}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    /// The stored value.
    pub value: String,
    /// The displayed label.
    pub label: String,
}

impl FieldOption {
    /// Creates an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for FieldOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// A custom per-field validator.
///
/// Receives the field's current value (if any) and the whole value map, and
/// returns an error message when the value is unacceptable. Any closure of the
/// right shape is a validator.
pub trait FieldValidator: Send + Sync {
    /// Returns an error message, or `None` when the value is acceptable.
    fn validate(&self, value: Option<&FieldValue>, values: &ValueMap) -> Option<String>;
}

impl<F> FieldValidator for F
where
    F: Fn(Option<&FieldValue>, &ValueMap) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: Option<&FieldValue>, values: &ValueMap) -> Option<String> {
        self(value, values)
    }
}

/// A cross-field visibility predicate over the current values.
pub type VisibilityPredicate = Arc<dyn Fn(&ValueMap) -> bool + Send + Sync>;

/// Complete description of one form input.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Unique key of the field within the form.
    pub name: String,
    /// The field kind.
    pub kind: FieldKind,
    /// Human-readable label. Empty means "use the name".
    pub label: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Unit hint shown next to the input (e.g. "mg/dL").
    pub unit: Option<String>,
    /// Normal range hint shown next to the input (e.g. "70-99").
    pub normal_range: Option<String>,
    /// Selectable options, in display order.
    pub options: Vec<FieldOption>,
    /// Static suggestion candidates for search-as-you-type text inputs.
    pub suggestions: Vec<FieldOption>,
    /// Width in row units.
    pub width: u8,
    /// Whether an answer is required.
    pub required: bool,
    /// Read-only hint for the rendered control.
    pub readonly: bool,
    /// Lower bound hint.
    pub min: Option<f64>,
    /// Upper bound hint.
    pub max: Option<f64>,
    /// Step hint.
    pub step: Option<f64>,
    /// Optional custom validator.
    pub validator: Option<Arc<dyn FieldValidator>>,
    /// Optional visibility predicate; hidden fields are neither laid out nor
    /// validated.
    pub visible_when: Option<VisibilityPredicate>,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("options", &self.options.len())
            .field("width", &self.width)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .field("visible_when", &self.visible_when.is_some())
            .finish_non_exhaustive()
    }
}

impl FieldDescriptor {
    /// Creates a descriptor with width 1, not required, and no label.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: String::new(),
            placeholder: None,
            unit: None,
            normal_range: None,
            options: Vec::new(),
            suggestions: Vec::new(),
            width: 1,
            required: false,
            readonly: false,
            min: None,
            max: None,
            step: None,
            validator: None,
            visible_when: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the unit hint.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the normal range hint.
    #[must_use]
    pub fn normal_range(mut self, range: impl Into<String>) -> Self {
        self.normal_range = Some(range.into());
        self
    }

    /// Sets the options.
    #[must_use]
    pub fn options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<FieldOption>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the static suggestion candidates.
    #[must_use]
    pub fn suggestions<I, O>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<FieldOption>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the width in row units.
    #[must_use]
    pub const fn width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    /// Sets whether an answer is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the read-only hint.
    #[must_use]
    pub const fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Sets the numeric range and step hints.
    #[must_use]
    pub const fn range(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    /// Sets the custom validator.
    #[must_use]
    pub fn validator(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Sets the visibility predicate.
    #[must_use]
    pub fn visible_when(mut self, predicate: impl Fn(&ValueMap) -> bool + Send + Sync + 'static) -> Self {
        self.visible_when = Some(Arc::new(predicate));
        self
    }

    /// Returns the label, falling back to the name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Returns `true` unless a visibility predicate hides the field.
    pub fn is_visible(&self, values: &ValueMap) -> bool {
        self.visible_when
            .as_ref()
            .map_or(true, |predicate| predicate(values))
    }

    /// Returns `true` if the field's primary value is a selection.
    ///
    /// That is the case for multiselects, checkbox groups, and the checkbox
    /// part of a checkbox-with-input.
    pub fn is_multi_valued(&self) -> bool {
        match self.kind {
            FieldKind::MultiSelect | FieldKind::CheckboxWithInput { .. } => true,
            FieldKind::Checkbox => !self.options.is_empty(),
            _ => false,
        }
    }

    /// Returns the companion key for composite kinds.
    pub fn companion_name(&self) -> Option<&str> {
        self.kind.companion_name()
    }

    /// Returns `true` if `key` is this field's name or its companion key.
    pub fn owns_key(&self, key: &str) -> bool {
        self.name == key || self.companion_name() == Some(key)
    }

    /// Returns the seed value used when the record has no value for the
    /// field's primary key.
    pub fn empty_value(&self) -> FieldValue {
        if self.is_multi_valued() {
            FieldValue::empty_multi()
        } else {
            FieldValue::empty_text()
        }
    }

    /// Returns the candidates used for search-as-you-type suggestions.
    pub fn suggestion_candidates(&self) -> &[FieldOption] {
        if !self.suggestions.is_empty() {
            &self.suggestions
        } else if self.kind == FieldKind::SearchSelect {
            &self.options
        } else {
            &[]
        }
    }

    /// Returns the option whose value is `value`.
    pub fn option(&self, value: &str) -> Option<&FieldOption> {
        self.options
            .iter()
            .chain(&self.suggestions)
            .find(|option| option.value == value)
    }

    /// Returns `true` if `value` is an acceptable shape for `key`.
    ///
    /// `key` must be owned by this descriptor. The empty string is accepted
    /// everywhere a scalar is, because that is how an input is cleared.
    pub fn accepts(&self, key: &str, value: &FieldValue) -> bool {
        if self.companion_name() == Some(key) {
            return matches!(value, FieldValue::Text(_));
        }
        let cleared = matches!(value, FieldValue::Text(s) if s.is_empty());
        match &self.kind {
            FieldKind::Text
            | FieldKind::Textarea
            | FieldKind::Date
            | FieldKind::Select
            | FieldKind::Radio
            | FieldKind::SearchSelect => matches!(value, FieldValue::Text(_)),
            FieldKind::Number | FieldKind::Duration { .. } => {
                matches!(value, FieldValue::Number(_) | FieldValue::Text(_))
            }
            FieldKind::MultiSelect => matches!(value, FieldValue::Multi(_)),
            FieldKind::Checkbox if self.options.is_empty() => {
                matches!(value, FieldValue::Bool(_)) || cleared
            }
            FieldKind::Checkbox => matches!(value, FieldValue::Multi(_)),
            FieldKind::CheckboxWithInput { .. } => {
                matches!(value, FieldValue::Bool(_) | FieldValue::Multi(_))
            }
        }
    }

    /// Converts a seeded record value for `key` into a shape this field
    /// accepts, keeping its content.
    ///
    /// Scalars become text for text-like kinds, truthy strings and numbers
    /// become booleans for a single checkbox, and scalars become one-element
    /// selections for multi-valued kinds.
    pub fn fit(&self, key: &str, value: FieldValue) -> FieldValue {
        if self.accepts(key, &value) {
            return value;
        }
        if self.companion_name() == Some(key) {
            return FieldValue::Text(value.to_string());
        }
        match &self.kind {
            FieldKind::Checkbox if self.options.is_empty() => FieldValue::Bool(value.is_checked()),
            _ if self.is_multi_valued() => match value.to_string() {
                text if text.is_empty() => FieldValue::empty_multi(),
                text => FieldValue::multi([text]),
            },
            _ => FieldValue::Text(value.to_string()),
        }
    }

    /// Describes the value shape accepted for `key`, for error messages.
    pub fn expected_shape(&self, key: &str) -> &'static str {
        if self.companion_name() == Some(key) {
            return "text";
        }
        match &self.kind {
            FieldKind::Number | FieldKind::Duration { .. } => "number or text",
            FieldKind::MultiSelect => "selection",
            FieldKind::Checkbox if self.options.is_empty() => "boolean",
            FieldKind::Checkbox => "selection",
            FieldKind::CheckboxWithInput { .. } => "boolean or selection",
            _ => "text",
        }
    }
}

/// Checks a field list at the boundary where a host hands it to the engine.
///
/// Names (including companion keys) must be unique, option-bearing kinds must
/// declare options, and widths must be at least 1. Widths above the row
/// capacity are accepted; the row packer gives such fields a row of their own.
pub fn validate_descriptors(fields: &[FieldDescriptor]) -> FormResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for field in fields {
        if field.width == 0 {
            return Err(FormError::InvalidWidth {
                field: field.name.clone(),
                width: field.width,
            });
        }
        if field.kind.requires_options() && field.options.is_empty() {
            return Err(FormError::MissingOptions(field.name.clone()));
        }
        for key in std::iter::once(field.name.as_str()).chain(field.companion_name()) {
            if !seen.insert(key) {
                return Err(FormError::DuplicateField(key.to_string()));
            }
        }
    }
    Ok(())
}

/// Finds the descriptor that owns `key` (its name or companion key).
pub fn find_owner<'a>(fields: &'a [FieldDescriptor], key: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|field| field.owns_key(key))
}
