//! Settings loading from configuration files.
//!
//! Loads [`EngineSettings`] from TOML or JSON and applies environment variable
//! overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `MEDFORM_DEBUG` | `debug` |
//! | `MEDFORM_LOG_LEVEL` | `log_level` |
//! | `MEDFORM_ROW_CAPACITY` | `row_capacity` |
//! | `MEDFORM_SIGNATURE_KEY` | `signature_key` |
//! | `MEDFORM_EMPTY_DISPLAY` | `empty_display` |

use std::path::Path;

use crate::error::FormError;
use crate::settings::EngineSettings;

/// Loads settings from a TOML string.
///
/// Keys not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<EngineSettings, FormError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<EngineSettings, FormError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<EngineSettings, FormError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<EngineSettings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> EngineSettings {
    let mut settings = EngineSettings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `MEDFORM_*` environment variable overrides to a settings struct.
///
/// Unparseable numeric values are ignored.
pub fn apply_env_overrides(settings: &mut EngineSettings) {
    if let Ok(val) = std::env::var("MEDFORM_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("MEDFORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("MEDFORM_ROW_CAPACITY") {
        if let Ok(capacity) = val.parse::<u8>() {
            if capacity > 0 {
                settings.row_capacity = capacity;
            }
        }
    }

    if let Ok(val) = std::env::var("MEDFORM_SIGNATURE_KEY") {
        settings.signature_key = val;
    }

    if let Ok(val) = std::env::var("MEDFORM_EMPTY_DISPLAY") {
        settings.empty_display = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn merge_over_defaults(
    value: serde_json::Value,
    source: &str,
) -> Result<EngineSettings, FormError> {
    let default_json = serde_json::to_value(EngineSettings::default()).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    let settings: EngineSettings = serde_json::from_value(merged).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to deserialize settings from {source}: {e}"))
    })?;

    if settings.row_capacity == 0 {
        return Err(FormError::ConfigurationError(
            "row_capacity must be at least 1".to_string(),
        ));
    }
    Ok(settings)
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            create_label = "Add Patient"
            row_capacity = 4
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.create_label, "Add Patient");
        assert_eq!(settings.row_capacity, 4);
        // Defaults preserved
        assert_eq!(settings.edit_label, "Update");
        assert_eq!(settings.signature_key, "signature");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("this is not = = toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str_zero_capacity_rejected() {
        let result = from_toml_str("row_capacity = 0");
        assert!(matches!(result, Err(FormError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str(r#"row_capacity = "three""#);
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"signature_key": "consent_signature", "debug": false}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.signature_key, "consent_signature");
        assert!(!settings.debug);
        assert_eq!(settings.row_capacity, 3);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("medform_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_settings.toml");

        std::fs::write(&path, "delete_label = \"Remove\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.delete_label, "Remove");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/path/settings.toml");
        assert!(result.is_err());
    }

    // ── Environment variable overrides ──────────────────────────────

    #[test]
    fn test_apply_env_overrides_row_capacity() {
        let mut settings = EngineSettings::default();
        std::env::set_var("MEDFORM_ROW_CAPACITY", "6");
        apply_env_overrides(&mut settings);
        std::env::remove_var("MEDFORM_ROW_CAPACITY");
        assert_eq!(settings.row_capacity, 6);
    }

    #[test]
    fn test_apply_env_overrides_signature_key() {
        let mut settings = EngineSettings::default();
        std::env::set_var("MEDFORM_SIGNATURE_KEY", "sig");
        apply_env_overrides(&mut settings);
        std::env::remove_var("MEDFORM_SIGNATURE_KEY");
        assert_eq!(settings.signature_key, "sig");
    }

    #[test]
    fn test_apply_env_overrides_empty_display() {
        std::env::set_var("MEDFORM_EMPTY_DISPLAY", "-");
        let settings = from_env();
        std::env::remove_var("MEDFORM_EMPTY_DISPLAY");
        assert_eq!(settings.empty_display, "-");
    }

    // ── merge_json helper ───────────────────────────────────────────

    #[test]
    fn test_merge_json_basic() {
        let base = serde_json::json!({"a": 1, "b": 2});
        let over = serde_json::json!({"b": 3, "c": 4});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_toml_to_json() {
        let value: toml::Value = toml::from_str("a = 1\nb = [true, false]").unwrap();
        let json = toml_to_json(value);
        assert_eq!(json, serde_json::json!({"a": 1, "b": [true, false]}));
    }
}
