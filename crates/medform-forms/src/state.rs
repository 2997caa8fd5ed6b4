//! Form state controller.
//!
//! [`FormState`] owns the value map and the error map of one open form. It
//! seeds values from a caller's record, applies single-field edits, and keeps
//! the invariant that editing a field clears that field's error.

use medform_core::{FormError, FormResult};

use crate::fields::{find_owner, FieldDescriptor};
use crate::value::{ErrorMap, FieldValue, Record, ValueMap};

/// Value map plus error map for one form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: ValueMap,
    errors: ErrorMap,
}

impl FormState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seeds the whole value map from `record` and clears all errors.
    ///
    /// Every field in `fields` gets an entry: the record's value when present
    /// and non-null, fitted to the field's kind by [`FieldDescriptor::fit`],
    /// otherwise the field's empty default. Composite fields also seed their
    /// companion key, defaulting to the empty string. Nothing from a previous
    /// seeding or edit survives.
    pub fn initialize(&mut self, fields: &[FieldDescriptor], record: &Record) {
        self.values.clear();
        self.errors.clear();

        for field in fields {
            let seeded = record
                .get(&field.name)
                .and_then(|json| FieldValue::from_json(json, field.is_multi_valued()))
                .map_or_else(|| field.empty_value(), |value| field.fit(&field.name, value));
            self.values.insert(field.name.clone(), seeded);

            if let Some(companion) = field.companion_name() {
                let seeded = record
                    .get(companion)
                    .and_then(|json| FieldValue::from_json(json, false))
                    .map_or_else(FieldValue::empty_text, |value| field.fit(companion, value));
                self.values.insert(companion.to_string(), seeded);
            }
        }

        tracing::debug!(fields = fields.len(), "form state initialized");
    }

    /// Seeds empty defaults for fields that have no entry yet.
    ///
    /// Used after recomputation introduces new fields; existing entries,
    /// including stale ones of removed fields, are left untouched.
    pub fn seed_missing(&mut self, fields: &[FieldDescriptor]) {
        for field in fields {
            if !self.values.contains_key(&field.name) {
                self.values.insert(field.name.clone(), field.empty_value());
            }
            if let Some(companion) = field.companion_name() {
                if !self.values.contains_key(companion) {
                    self.values.insert(companion, FieldValue::empty_text());
                }
            }
        }
    }

    /// Replaces exactly one entry of the value map and clears its error.
    ///
    /// `name` must be owned by a field in `fields` (as its name or companion
    /// key) and `value` must fit that field's kind.
    pub fn set_value(
        &mut self,
        fields: &[FieldDescriptor],
        name: &str,
        value: FieldValue,
    ) -> FormResult<()> {
        let owner =
            find_owner(fields, name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !owner.accepts(name, &value) {
            return Err(FormError::TypeMismatch {
                field: name.to_string(),
                expected: owner.expected_shape(name),
                found: value.type_name(),
            });
        }

        self.values.insert(name, value);
        self.errors.remove(name);
        Ok(())
    }

    /// Returns the selection that results from toggling `option` in the
    /// multi-valued field `name`, without applying it.
    ///
    /// A field that currently holds a non-selection value (such as a
    /// checkbox-with-input set to `true`) is treated as an empty selection.
    pub fn toggled_selection(&self, name: &str, option: &str) -> FieldValue {
        let mut selection = self
            .values
            .get(name)
            .and_then(FieldValue::as_multi)
            .cloned()
            .unwrap_or_default();
        if !selection.remove(option) {
            selection.insert(option.to_string());
        }
        FieldValue::Multi(selection)
    }

    /// Returns the current value map.
    pub const fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Returns the current error map.
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Replaces the error map wholesale.
    pub fn replace_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    /// Discards all values and errors.
    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", FieldKind::Text),
            FieldDescriptor::new("age", FieldKind::Number),
            FieldDescriptor::new("tests", FieldKind::MultiSelect)
                .options([("cbc", "CBC"), ("lft", "LFT")]),
            FieldDescriptor::new(
                "hasAllergy",
                FieldKind::CheckboxWithInput {
                    input_name: "allergyDetail".into(),
                },
            ),
            FieldDescriptor::new("fasting", FieldKind::duration_for("fasting"))
                .options([("h", "hours"), ("d", "days")]),
        ]
    }

    fn record(json: serde_json::Value) -> Record {
        match json {
            serde_json::Value::Object(map) => map,
            _ => panic!("record must be an object"),
        }
    }

    #[test]
    fn test_initialize_empty_record_seeds_defaults() {
        let mut state = FormState::new();
        state.initialize(&fields(), &Record::new());

        let values = state.values();
        assert_eq!(values.get("name"), Some(&FieldValue::empty_text()));
        assert_eq!(values.get("age"), Some(&FieldValue::empty_text()));
        assert_eq!(values.get("tests"), Some(&FieldValue::empty_multi()));
        assert_eq!(values.get("hasAllergy"), Some(&FieldValue::empty_multi()));
        assert_eq!(values.get("allergyDetail"), Some(&FieldValue::empty_text()));
        assert_eq!(values.get("fasting"), Some(&FieldValue::empty_text()));
        assert_eq!(values.get("fastingUnit"), Some(&FieldValue::empty_text()));
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn test_initialize_from_record() {
        let mut state = FormState::new();
        state.initialize(
            &fields(),
            &record(serde_json::json!({
                "name": "Ann",
                "age": 0,
                "tests": ["cbc"],
                "hasAllergy": true,
                "allergyDetail": "penicillin",
                "fasting": 12,
                "fastingUnit": "h",
                "unrelated": "ignored"
            })),
        );

        let values = state.values();
        assert_eq!(values.get("name"), Some(&FieldValue::from("Ann")));
        assert_eq!(values.get("age"), Some(&FieldValue::Number(0.0)));
        assert_eq!(values.get("tests"), Some(&FieldValue::multi(["cbc"])));
        assert_eq!(values.get("hasAllergy"), Some(&FieldValue::Bool(true)));
        assert_eq!(values.get("allergyDetail"), Some(&FieldValue::from("penicillin")));
        assert_eq!(values.get("fasting"), Some(&FieldValue::Number(12.0)));
        assert_eq!(values.get("fastingUnit"), Some(&FieldValue::from("h")));
        assert!(!values.contains_key("unrelated"));
    }

    #[test]
    fn test_initialize_null_uses_default_mismatch_is_kept() {
        let mut state = FormState::new();
        state.initialize(
            &fields(),
            &record(serde_json::json!({"name": null, "age": true})),
        );
        assert_eq!(state.values().get("name"), Some(&FieldValue::empty_text()));
        assert_eq!(state.values().get("age"), Some(&FieldValue::from("true")));
    }

    #[test]
    fn test_initialize_keeps_numeric_ids_and_text_flags() {
        let fields = vec![
            FieldDescriptor::new("doctorId", FieldKind::Select)
                .options([("12", "Dr. Grey"), ("14", "Dr. House")]),
            FieldDescriptor::new("phone", FieldKind::Text),
            FieldDescriptor::new("consent", FieldKind::Checkbox),
        ];
        let mut state = FormState::new();
        state.initialize(
            &fields,
            &record(serde_json::json!({"doctorId": 12, "phone": 5551234, "consent": "true"})),
        );

        let values = state.values();
        assert_eq!(values.get("doctorId"), Some(&FieldValue::from("12")));
        assert_eq!(values.get("phone"), Some(&FieldValue::from("5551234")));
        assert_eq!(values.get("consent"), Some(&FieldValue::Bool(true)));

        let payload = values.to_json();
        assert_eq!(payload["doctorId"], serde_json::json!("12"));
        assert_eq!(payload["phone"], serde_json::json!("5551234"));
        assert_eq!(payload["consent"], serde_json::json!(true));
    }

    #[test]
    fn test_initialize_discards_previous_edits() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());
        state.set_value(&fields, "name", "Bob".into()).unwrap();
        state.initialize(&fields, &Record::new());
        assert_eq!(state.values().get("name"), Some(&FieldValue::empty_text()));
    }

    #[test]
    fn test_set_value_clears_only_that_error() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());

        let mut errors = ErrorMap::new();
        errors.insert("name", "name is required");
        errors.insert("age", "age is required");
        state.replace_errors(errors);

        state.set_value(&fields, "name", "Ann".into()).unwrap();
        assert!(!state.errors().contains_key("name"));
        assert!(state.errors().contains_key("age"));
        assert_eq!(state.values().get("age"), Some(&FieldValue::empty_text()));
    }

    #[test]
    fn test_back_to_back_updates_are_kept() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());
        state.set_value(&fields, "name", "Ann".into()).unwrap();
        state.set_value(&fields, "age", FieldValue::Number(41.0)).unwrap();
        assert_eq!(state.values().get("name"), Some(&FieldValue::from("Ann")));
        assert_eq!(state.values().get("age"), Some(&FieldValue::Number(41.0)));
    }

    #[test]
    fn test_set_value_companion_key() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());
        state
            .set_value(&fields, "allergyDetail", "latex".into())
            .unwrap();
        assert_eq!(state.values().get("allergyDetail"), Some(&FieldValue::from("latex")));
    }

    #[test]
    fn test_set_value_unknown_field() {
        let fields = fields();
        let mut state = FormState::new();
        let err = state.set_value(&fields, "ghost", "x".into()).unwrap_err();
        assert!(matches!(err, FormError::UnknownField(name) if name == "ghost"));
    }

    #[test]
    fn test_set_value_type_mismatch() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());
        let err = state
            .set_value(&fields, "tests", "cbc".into())
            .unwrap_err();
        assert!(matches!(err, FormError::TypeMismatch { expected: "selection", .. }));
        assert_eq!(state.values().get("tests"), Some(&FieldValue::empty_multi()));
    }

    #[test]
    fn test_toggled_selection() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields, &Record::new());

        let added = state.toggled_selection("tests", "cbc");
        assert_eq!(added, FieldValue::multi(["cbc"]));
        state.set_value(&fields, "tests", added).unwrap();

        let removed = state.toggled_selection("tests", "cbc");
        assert_eq!(removed, FieldValue::empty_multi());
    }

    #[test]
    fn test_seed_missing_keeps_existing_entries() {
        let fields = fields();
        let mut state = FormState::new();
        state.initialize(&fields[..1], &Record::new());
        state.set_value(&fields, "name", "Ada".into()).unwrap();

        state.seed_missing(&fields[3..]);
        assert_eq!(state.values().get("name"), Some(&FieldValue::Text("Ada".into())));
        assert_eq!(state.values().get("hasAllergy"), Some(&FieldValue::empty_multi()));
        assert_eq!(state.values().get("allergyDetail"), Some(&FieldValue::empty_text()));
        assert_eq!(state.values().get("fastingUnit"), Some(&FieldValue::empty_text()));
        assert!(!state.values().contains_key("age"));
    }
}
