//! Submit-time validation.
//!
//! Re-evaluates every visible field of the active list against the current
//! values and produces a complete error map. A field passes the required check
//! unless its value is absent or empty; `0` and `false` are answers. A custom
//! validator's message replaces the required message when both apply.

use crate::fields::FieldDescriptor;
use crate::value::{ErrorMap, FieldValue, ValueMap};

/// Returns `true` for an absent value, the empty string, or an empty selection.
pub fn is_empty_value(value: Option<&FieldValue>) -> bool {
    value.map_or(true, FieldValue::is_empty)
}

/// Returns the message recorded for a missing required field.
pub fn required_message(field: &FieldDescriptor) -> String {
    format!("{} is required", field.display_label())
}

/// Validates one field, returning its error message if any.
pub fn validate_field(field: &FieldDescriptor, values: &ValueMap) -> Option<String> {
    let value = values.get(&field.name);

    let custom = field
        .validator
        .as_ref()
        .and_then(|validator| validator.validate(value, values))
        .filter(|message| !message.is_empty());
    if custom.is_some() {
        return custom;
    }

    if field.required && is_empty_value(value) {
        return Some(required_message(field));
    }
    None
}

/// Validates every visible field and returns the complete error map.
///
/// Fields hidden by their visibility predicate, and values left behind by
/// fields no longer in `fields`, are ignored. The form is valid exactly when
/// the returned map is empty.
pub fn validate<'a, I>(fields: I, values: &ValueMap) -> ErrorMap
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let mut errors = ErrorMap::new();
    for field in fields {
        if !field.is_visible(values) {
            continue;
        }
        if let Some(message) = validate_field(field, values) {
            errors.insert(field.name.clone(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    fn required(name: &str, kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor::new(name, kind).required(true)
    }

    #[test]
    fn test_missing_required_uses_name() {
        let fields = vec![required("age", FieldKind::Number)];
        let errors = validate(&fields, &ValueMap::new());
        assert_eq!(errors.get("age"), Some("age is required"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_missing_required_uses_label() {
        let fields = vec![required("dob", FieldKind::Date).label("Date of Birth")];
        let errors = validate(&fields, &ValueMap::new());
        assert_eq!(errors.get("dob"), Some("Date of Birth is required"));
    }

    #[test]
    fn test_zero_and_false_are_answers() {
        let fields = vec![
            required("age", FieldKind::Number),
            required("consent", FieldKind::Checkbox),
        ];
        let mut values = ValueMap::new();
        values.insert("age", FieldValue::Number(0.0));
        values.insert("consent", FieldValue::Bool(false));
        assert!(validate(&fields, &values).is_empty());
    }

    #[test]
    fn test_empty_string_is_missing() {
        let fields = vec![required("age", FieldKind::Number)];
        let mut values = ValueMap::new();
        values.insert("age", FieldValue::empty_text());
        assert!(validate(&fields, &values).contains_key("age"));
    }

    #[test]
    fn test_empty_selection_is_missing() {
        let fields = vec![required("tests", FieldKind::MultiSelect).options([("a", "A")])];
        let mut values = ValueMap::new();
        values.insert("tests", FieldValue::empty_multi());
        assert!(validate(&fields, &values).contains_key("tests"));
    }

    #[test]
    fn test_custom_validator_overrides_required() {
        let fields = vec![required("phone", FieldKind::Text).validator(
            |_: Option<&FieldValue>, _: &ValueMap| Some("Enter a 10-digit phone number".to_string()),
        )];
        let errors = validate(&fields, &ValueMap::new());
        assert_eq!(errors.get("phone"), Some("Enter a 10-digit phone number"));
    }

    #[test]
    fn test_custom_validator_sees_all_values() {
        let fields = vec![FieldDescriptor::new("end", FieldKind::Date).validator(
            |value: Option<&FieldValue>, values: &ValueMap| {
                let start = values.get("start").and_then(FieldValue::as_text)?;
                let end = value.and_then(FieldValue::as_text)?;
                (end < start).then(|| "End date must follow start date".to_string())
            },
        )];
        let mut values = ValueMap::new();
        values.insert("start", FieldValue::from("2024-05-02"));
        values.insert("end", FieldValue::from("2024-05-01"));
        assert_eq!(
            validate(&fields, &values).get("end"),
            Some("End date must follow start date")
        );

        values.insert("end", FieldValue::from("2024-05-03"));
        assert!(validate(&fields, &values).is_empty());
    }

    #[test]
    fn test_empty_custom_message_is_ignored() {
        let fields = vec![FieldDescriptor::new("x", FieldKind::Text)
            .validator(|_: Option<&FieldValue>, _: &ValueMap| Some(String::new()))];
        assert!(validate(&fields, &ValueMap::new()).is_empty());
    }

    #[test]
    fn test_hidden_fields_are_skipped() {
        let fields = vec![required("allergyDetail", FieldKind::Text).visible_when(|values| {
            values
                .get("hasAllergy")
                .is_some_and(FieldValue::is_checked)
        })];
        let mut values = ValueMap::new();
        assert!(validate(&fields, &values).is_empty());

        values.insert("hasAllergy", FieldValue::Bool(true));
        assert!(validate(&fields, &values).contains_key("allergyDetail"));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let fields = vec![
            required("name", FieldKind::Text),
            required("age", FieldKind::Number),
        ];
        let mut values = ValueMap::new();
        values.insert("name", FieldValue::from("Ann"));
        let first = validate(&fields, &values);
        let second = validate(&fields, &values);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
