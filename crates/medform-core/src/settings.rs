//! Engine settings.
//!
//! [`EngineSettings`] holds the defaults every form engine instance falls back
//! on: row capacity, button labels, notification texts, and the key under which
//! a captured signature is merged into the saved payload. [`SETTINGS`] is a
//! process-wide, configure-once instance for hosts that prefer global config.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use medform_core::settings::EngineSettings;
///
/// let settings = EngineSettings::default();
/// assert_eq!(settings.row_capacity, 3);
/// assert_eq!(settings.signature_key, "signature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    // ── Logging ──────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level filter (e.g. "info", "medform_forms=debug").
    pub log_level: String,

    // ── Layout ───────────────────────────────────────────────────────

    /// Width units available per display row.
    pub row_capacity: u8,

    // ── Attachments ──────────────────────────────────────────────────

    /// Key under which a captured signature is merged into saved values.
    pub signature_key: String,

    // ── Labels ───────────────────────────────────────────────────────

    /// Save button label in create mode.
    pub create_label: String,
    /// Save button label in edit mode.
    pub edit_label: String,
    /// Cancel button label.
    pub cancel_label: String,
    /// Confirmation button label in delete mode.
    pub delete_label: String,

    // ── Messages ─────────────────────────────────────────────────────

    /// Success notification after a create-mode save.
    pub created_message: String,
    /// Success notification after an edit-mode save.
    pub updated_message: String,
    /// Success notification after a confirmed delete.
    pub deleted_message: String,
    /// Error notification when submission is blocked by validation.
    pub invalid_message: String,
    /// Prompt shown in delete-confirmation mode.
    pub delete_prompt: String,
    /// Placeholder shown in profile view for absent values.
    pub empty_display: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            row_capacity: 3,
            signature_key: "signature".to_string(),
            create_label: "Save".to_string(),
            edit_label: "Update".to_string(),
            cancel_label: "Cancel".to_string(),
            delete_label: "Delete".to_string(),
            created_message: "Record created successfully".to_string(),
            updated_message: "Record updated successfully".to_string(),
            deleted_message: "Record deleted successfully".to_string(),
            invalid_message: "Please correct the highlighted fields".to_string(),
            delete_prompt: "Are you sure you want to delete this record? This action cannot be undone."
                .to_string(),
            empty_display: "N/A".to_string(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Unlike a panicking accessor, [`get`](LazySettings::get) falls back to
/// [`EngineSettings::default`] when nothing was configured, so the engine
/// works out of the box in tests and small hosts.
pub struct LazySettings {
    inner: OnceLock<EngineSettings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings.
    ///
    /// Returns the rejected settings if they were already configured (or
    /// already defaulted by an earlier [`get`](LazySettings::get)).
    pub fn configure(&self, settings: EngineSettings) -> Result<(), EngineSettings> {
        self.inner.set(settings)
    }

    /// Returns the configured settings, initializing defaults on first use.
    pub fn get(&self) -> &EngineSettings {
        self.inner.get_or_init(EngineSettings::default)
    }

    /// Returns `true` if settings have been configured or defaulted.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = EngineSettings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.row_capacity, 3);
        assert_eq!(s.signature_key, "signature");
        assert_eq!(s.create_label, "Save");
        assert_eq!(s.edit_label, "Update");
        assert_eq!(s.cancel_label, "Cancel");
        assert_eq!(s.delete_label, "Delete");
        assert_eq!(s.empty_display, "N/A");
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());

        let settings = EngineSettings {
            row_capacity: 4,
            ..EngineSettings::default()
        };
        assert!(lazy.configure(settings).is_ok());
        assert!(lazy.is_configured());
        assert_eq!(lazy.get().row_capacity, 4);
    }

    #[test]
    fn test_lazy_settings_double_configure_rejected() {
        let lazy = LazySettings::new();
        assert!(lazy.configure(EngineSettings::default()).is_ok());
        let second = EngineSettings {
            debug: false,
            ..EngineSettings::default()
        };
        let rejected = lazy.configure(second).unwrap_err();
        assert!(!rejected.debug);
        assert!(lazy.get().debug);
    }

    #[test]
    fn test_lazy_settings_get_defaults_when_unconfigured() {
        let lazy = LazySettings::new();
        assert_eq!(lazy.get(), &EngineSettings::default());
        assert!(lazy.is_configured());
    }
}
