//! The capability interface a host screen implements.
//!
//! The engine never talks to a backend or a notification system directly.
//! Everything outward-facing goes through [`FormHost`]: persisting a record,
//! deleting it, deriving a new field list from the current values, and being
//! told about value changes. Tests implement it with recording fakes.

use async_trait::async_trait;

use medform_core::{FormError, FormResult};

use crate::fields::FieldDescriptor;
use crate::value::{Record, ValueMap};

/// Operations the engine needs from the screen that hosts it.
#[async_trait]
pub trait FormHost: Send + Sync {
    /// Persists the submitted values.
    ///
    /// `values` is the full value map, plus the captured signature when the
    /// form has signature capture enabled. An `Err` keeps the form open.
    async fn persist(&self, values: Record) -> FormResult<()>;

    /// Deletes the record shown in delete-confirmation mode.
    ///
    /// The default implementation reports a misconfigured host.
    async fn delete(&self) -> FormResult<()> {
        Err(FormError::ConfigurationError(
            "host does not support deletion".to_string(),
        ))
    }

    /// Derives the active field list from the current values.
    ///
    /// Returning `None` keeps the current list. Implementations must be pure
    /// functions of `values`.
    fn recompute_fields(&self, values: &ValueMap) -> Option<Vec<FieldDescriptor>> {
        let _ = values;
        None
    }

    /// Called when the user dismisses the form without saving.
    fn cancelled(&self) {}

    /// Called with the full value map after every applied change.
    fn notify_change(&self, values: &ValueMap) {
        let _ = values;
    }
}
