//! Bound fields: descriptors paired with their current value, error, and
//! interaction state.
//!
//! A [`BoundField`] is an owned snapshot produced when a form is presented. It
//! carries everything a host needs to draw one control without reaching back
//! into the engine: the widget to use, its hints, the value and companion
//! value, the error message, and the dropdown or suggestion state.

use std::collections::BTreeMap;

use crate::fields::{FieldDescriptor, FieldOption};
use crate::interaction::{filter_options, InteractionState};
use crate::state::FormState;
use crate::value::FieldValue;
use crate::widgets::{widget_attrs, widget_for, WidgetType};

/// A field descriptor bound to form state.
#[derive(Debug, Clone)]
pub struct BoundField {
    /// The field name.
    pub name: String,
    /// Snapshot of the descriptor.
    pub field: FieldDescriptor,
    /// Current value of the primary key.
    pub value: FieldValue,
    /// Current value of the companion key, for composite kinds.
    pub companion_value: Option<FieldValue>,
    /// Current error message.
    pub error: Option<String>,
    /// The control used to present the field.
    pub widget: WidgetType,
    /// Constraint and display hints for the control.
    pub attrs: BTreeMap<String, String>,
    /// Whether the field's dropdown is expanded.
    pub dropdown_open: bool,
    /// The inline search query of the dropdown.
    pub search_query: String,
    /// Options left after applying the inline search query.
    pub visible_options: Vec<FieldOption>,
    /// Currently shown suggestions.
    pub suggestions: Vec<FieldOption>,
}

impl BoundField {
    /// Binds `field` to the given state.
    pub fn new(field: &FieldDescriptor, state: &FormState, interaction: &InteractionState) -> Self {
        let value = state
            .values()
            .get(&field.name)
            .cloned()
            .unwrap_or_else(|| field.empty_value());
        let companion_value = field
            .companion_name()
            .map(|key| {
                state
                    .values()
                    .get(key)
                    .cloned()
                    .unwrap_or_else(FieldValue::empty_text)
            });
        let search_query = interaction.search(&field.name).to_string();

        Self {
            name: field.name.clone(),
            value,
            companion_value,
            error: state.errors().get(&field.name).map(str::to_string),
            widget: widget_for(field),
            attrs: widget_attrs(field),
            dropdown_open: interaction.is_open(&field.name),
            visible_options: filter_options(&field.options, &search_query),
            search_query,
            suggestions: interaction.suggestions(&field.name).to_vec(),
            field: field.clone(),
        }
    }

    /// Returns the control id, `id_<name>`.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.name)
    }

    /// Returns the label text.
    pub fn label_text(&self) -> &str {
        self.field.display_label()
    }

    /// Returns `true` if the field has an error.
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns `true` if `option` is part of the current value.
    pub fn is_selected(&self, option: &str) -> bool {
        match &self.value {
            FieldValue::Multi(set) => set.contains(option),
            FieldValue::Text(text) => text == option,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;
    use crate::value::{ErrorMap, Record};

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("bloodType", FieldKind::Select)
                .label("Blood type")
                .options([("A+", "A positive"), ("B+", "B positive"), ("O-", "O negative")]),
            FieldDescriptor::new("hasAllergy", FieldKind::checkbox_with_input_for("hasAllergy")),
        ]
    }

    #[test]
    fn test_bound_field_snapshot() {
        let fields = fields();
        let mut state = FormState::new();
        let mut record = Record::new();
        record.insert("bloodType".into(), "B+".into());
        state.initialize(&fields, &record);
        let mut errors = ErrorMap::new();
        errors.insert("bloodType", "Blood type is required");
        state.replace_errors(errors);

        let bound = BoundField::new(&fields[0], &state, &InteractionState::new());
        assert_eq!(bound.auto_id(), "id_bloodType");
        assert_eq!(bound.label_text(), "Blood type");
        assert_eq!(bound.widget, WidgetType::Select);
        assert!(bound.has_error());
        assert!(bound.is_selected("B+"));
        assert!(!bound.dropdown_open);
        assert_eq!(bound.visible_options.len(), 3);
        assert!(bound.companion_value.is_none());
    }

    #[test]
    fn test_bound_field_search_filters_options() {
        let fields = fields();
        let state = FormState::new();
        let mut interaction = InteractionState::new();
        interaction.toggle("bloodType");
        interaction.set_search("bloodType", "pos");

        let bound = BoundField::new(&fields[0], &state, &interaction);
        assert!(bound.dropdown_open);
        assert_eq!(bound.search_query, "pos");
        let values: Vec<_> = bound.visible_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["A+", "B+"]);
    }

    #[test]
    fn test_bound_field_companion_value() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());
        state
            .set_value(&fields, "hasAllergyDetail", "penicillin".into())
            .unwrap();

        let bound = BoundField::new(&fields[1], &state, &InteractionState::new());
        assert_eq!(bound.widget, WidgetType::CheckboxWithText);
        assert_eq!(bound.value, FieldValue::empty_multi());
        assert_eq!(bound.companion_value, Some(FieldValue::Text("penicillin".into())));
        assert!(!bound.has_error());
    }
}
