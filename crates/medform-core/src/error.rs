//! Core error types for the medform engine.
//!
//! [`FormError`] covers descriptor misconfiguration, type mismatches at the
//! value boundary, operations attempted in the wrong modal mode, and failures
//! reported by the host's persistence collaborators.
//!
//! Per-field validation failures are not represented here: they
//! are data, carried in the error map of a form, and never abort an operation.

use thiserror::Error;

/// The primary error type for the medform engine.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Descriptors ──────────────────────────────────────────────────

    /// A value was addressed to a name that no active field owns.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Two descriptors in the same field list share a name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A select, multiselect, or radio descriptor was given no options.
    #[error("Field '{0}' requires at least one option")]
    MissingOptions(String),

    /// A descriptor declared a width of zero.
    #[error("Field '{field}' has invalid width {width}")]
    InvalidWidth {
        /// The offending field.
        field: String,
        /// The declared width.
        width: u8,
    },

    // ── Values ───────────────────────────────────────────────────────

    /// A value's shape does not fit the field kind.
    #[error("Field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        /// The field being written.
        field: String,
        /// What the field kind accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },

    // ── Modes ────────────────────────────────────────────────────────

    /// The operation is not available in the current modal mode.
    #[error("Operation '{operation}' is not available in {mode} mode")]
    InvalidMode {
        /// The attempted operation.
        operation: &'static str,
        /// The mode the engine was in.
        mode: String,
    },

    // ── Host collaborators ───────────────────────────────────────────

    /// The host's persist operation rejected the save.
    #[error("Save failed: {0}")]
    Persist(String),

    /// The host's delete operation failed.
    #[error("Delete failed: {0}")]
    Delete(String),

    // ── Attachments ──────────────────────────────────────────────────

    /// A signature or attachment could not be captured.
    #[error("Signature error: {0}")]
    Signature(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns `true` when the form can stay open and the user can correct
    /// the problem.
    ///
    /// Host failures and attachment failures are recoverable. Descriptor and
    /// configuration errors indicate a misconfigured host screen.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Persist(_)
            | Self::Delete(_)
            | Self::Signature(_)
            | Self::TypeMismatch { .. }
            | Self::IoError(_) => true,
            Self::UnknownField(_)
            | Self::DuplicateField(_)
            | Self::MissingOptions(_)
            | Self::InvalidWidth { .. }
            | Self::InvalidMode { .. }
            | Self::ConfigurationError(_) => false,
        }
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
