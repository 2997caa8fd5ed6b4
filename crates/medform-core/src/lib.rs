//! # medform-core
//!
//! Core types, settings, and error types for the medform engine.
//! This crate has no engine dependencies and provides the foundation for the
//! forms crate.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Engine settings (labels, messages, layout capacity)
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
pub use settings::{EngineSettings, SETTINGS};
