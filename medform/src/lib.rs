//! # medform
//!
//! Schema-driven form and modal engine for clinical admin consoles.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient access.
//! Depend on `medform` to get the whole engine, or on the individual crates
//! for finer-grained control.

/// Error types, settings, and logging.
pub use medform_core as core;

/// Field descriptors, form state, validation, and the modal engine.
pub use medform_forms as forms;

pub use async_trait::async_trait;
pub use serde_json;
pub use tracing;
