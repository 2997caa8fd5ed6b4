//! Dynamic field recomputation.
//!
//! [`ActiveFields`] tracks the field list a host supplied on open and the list
//! currently in effect after recomputation. Every other component (row
//! packing, validation, value ownership checks) reads the active list.
//!
//! Recomputation runs once per applied change and never feeds back into the
//! value map, so a host function that is not a fixed point cannot loop.

use medform_core::FormResult;

use crate::fields::{validate_descriptors, FieldDescriptor};
use crate::host::FormHost;
use crate::value::ValueMap;

/// The supplied and the active field lists of one form.
#[derive(Debug, Clone, Default)]
pub struct ActiveFields {
    supplied: Vec<FieldDescriptor>,
    active: Vec<FieldDescriptor>,
    generation: u64,
}

impl ActiveFields {
    /// Starts from a freshly supplied list; it is also the active list.
    pub fn new(supplied: Vec<FieldDescriptor>) -> Self {
        Self {
            active: supplied.clone(),
            supplied,
            generation: 0,
        }
    }

    /// Returns the list currently in effect.
    pub fn active(&self) -> &[FieldDescriptor] {
        &self.active
    }

    /// Returns the list originally supplied by the host.
    pub fn supplied(&self) -> &[FieldDescriptor] {
        &self.supplied
    }

    /// Returns how many times the active list has been replaced.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the active fields whose visibility predicate passes.
    pub fn visible<'a>(&'a self, values: &'a ValueMap) -> impl Iterator<Item = &'a FieldDescriptor> + 'a {
        self.active.iter().filter(move |field| field.is_visible(values))
    }

    /// Asks the host for a new active list and installs it.
    ///
    /// Returns `Ok(true)` when the list was replaced. A list that fails the
    /// descriptor checks is rejected and the current list stays in effect.
    pub fn recompute<H>(&mut self, host: &H, values: &ValueMap) -> FormResult<bool>
    where
        H: FormHost + ?Sized,
    {
        let Some(next) = host.recompute_fields(values) else {
            return Ok(false);
        };
        if let Err(err) = validate_descriptors(&next) {
            tracing::warn!(error = %err, "recomputed field list rejected");
            return Err(err);
        }

        tracing::debug!(
            before = self.active.len(),
            after = next.len(),
            "active field list recomputed"
        );
        self.active = next;
        self.generation += 1;
        Ok(true)
    }

    /// Forgets both lists.
    pub fn clear(&mut self) {
        self.supplied.clear();
        self.active.clear();
        self.generation = 0;
    }
}
