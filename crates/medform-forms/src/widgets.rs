//! Widget mapping for field descriptors.
//!
//! Each field kind is presented by one control type. The engine does not
//! draw anything; it tells the host which control to use and which constraint
//! hints to pass through to it.

use std::collections::BTreeMap;
use std::fmt;

use crate::fields::{FieldDescriptor, FieldKind};

/// Enumerates the control types a host needs to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// A single-line text input.
    TextInput,
    /// A numeric input.
    NumberInput,
    /// A date picker.
    DateInput,
    /// A dropdown with an inline search box.
    Select,
    /// A multi-choice dropdown with an inline search box.
    SelectMultiple,
    /// A single checkbox.
    CheckboxInput,
    /// A group of checkboxes.
    CheckboxSelectMultiple,
    /// A checkbox with an attached text input.
    CheckboxWithText,
    /// A group of radio buttons.
    RadioSelect,
    /// A multi-line text input.
    Textarea,
    /// A text input with a suggestion list.
    SearchInput,
    /// An amount input with a unit dropdown.
    DurationInput,
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::DateInput => "DateInput",
            Self::Select => "Select",
            Self::SelectMultiple => "SelectMultiple",
            Self::CheckboxInput => "CheckboxInput",
            Self::CheckboxSelectMultiple => "CheckboxSelectMultiple",
            Self::CheckboxWithText => "CheckboxWithText",
            Self::RadioSelect => "RadioSelect",
            Self::Textarea => "Textarea",
            Self::SearchInput => "SearchInput",
            Self::DurationInput => "DurationInput",
        };
        write!(f, "{name}")
    }
}

/// Returns the control used for a descriptor.
///
/// Text fields that declare suggestions become search inputs; checkboxes
/// that declare options become checkbox groups.
pub fn widget_for(field: &FieldDescriptor) -> WidgetType {
    match field.kind {
        FieldKind::Text if !field.suggestions.is_empty() => WidgetType::SearchInput,
        FieldKind::Text => WidgetType::TextInput,
        FieldKind::Number => WidgetType::NumberInput,
        FieldKind::Date => WidgetType::DateInput,
        FieldKind::Select => WidgetType::Select,
        FieldKind::MultiSelect => WidgetType::SelectMultiple,
        FieldKind::Checkbox if field.options.is_empty() => WidgetType::CheckboxInput,
        FieldKind::Checkbox => WidgetType::CheckboxSelectMultiple,
        FieldKind::CheckboxWithInput { .. } => WidgetType::CheckboxWithText,
        FieldKind::Radio => WidgetType::RadioSelect,
        FieldKind::Textarea => WidgetType::Textarea,
        FieldKind::SearchSelect => WidgetType::SearchInput,
        FieldKind::Duration { .. } => WidgetType::DurationInput,
    }
}

/// Collects the constraint and display hints passed through to the control.
///
/// Keys follow HTML attribute names where one exists.
pub fn widget_attrs(field: &FieldDescriptor) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    if let Some(placeholder) = &field.placeholder {
        attrs.insert("placeholder".to_string(), placeholder.clone());
    }
    if let Some(unit) = &field.unit {
        attrs.insert("unit".to_string(), unit.clone());
    }
    if let Some(range) = &field.normal_range {
        attrs.insert("normalRange".to_string(), range.clone());
    }
    if let Some(min) = field.min {
        attrs.insert("min".to_string(), min.to_string());
    }
    if let Some(max) = field.max {
        attrs.insert("max".to_string(), max.to_string());
    }
    if let Some(step) = field.step {
        attrs.insert("step".to_string(), step.to_string());
    }
    if field.readonly {
        attrs.insert("readonly".to_string(), "readonly".to_string());
    }
    if field.required {
        attrs.insert("required".to_string(), "required".to_string());
    }
    attrs
}
