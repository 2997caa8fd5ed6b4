//! # medform-forms
//!
//! Schema-driven form and modal engine. A host screen describes its inputs
//! as a list of [`FieldDescriptor`]s and drives a [`FormEngine`] through the
//! create, edit, view, and delete-confirmation modes; the engine derives the
//! row layout, keeps typed form state, validates on submit, and hands the
//! finished values to the host through the [`FormHost`] capability trait.
//!
//! ## Modules
//!
//! - [`fields`] - Field descriptors, kinds, options, and custom validators
//! - [`value`] - Typed field values, the value map, and the error map
//! - [`layout`] - Row packing
//! - [`state`] - The form state controller
//! - [`validation`] - Submit-time validation
//! - [`recompute`] - Dynamic recomputation of the active field list
//! - [`interaction`] - Dropdowns, suggestions, and outside-interaction dismissal
//! - [`widgets`] - Widget mapping and control hints
//! - [`bound_field`] - Descriptors bound to state for presentation
//! - [`profile`] - Read-only profile projection for view mode
//! - [`signature`] - Signature and attachment capture
//! - [`messages`] - One-time notifications
//! - [`host`] - The host capability trait
//! - [`modal`] - The engine and its mode dispatcher

pub mod bound_field;
pub mod fields;
pub mod host;
pub mod interaction;
pub mod layout;
pub mod messages;
pub mod modal;
pub mod profile;
pub mod recompute;
pub mod signature;
pub mod state;
pub mod validation;
pub mod value;
pub mod widgets;

pub use bound_field::BoundField;
pub use fields::{FieldDescriptor, FieldKind, FieldOption, FieldValidator};
pub use host::FormHost;
pub use interaction::{Point, Region};
pub use messages::{Notification, NotificationLevel};
pub use modal::{
    FormEngine, ModalMode, ModalOptions, OpenRequest, Presentation, SaveTicket, SubmitOutcome,
    SubmitStart,
};
pub use profile::{ViewField, ViewLayout};
pub use value::{ErrorMap, FieldValue, Record, ValueMap};
