//! The modal form engine and its mode dispatcher.
//!
//! [`FormEngine`] is the single object a host screen instantiates. It is driven
//! entirely by the host: [`open`](FormEngine::open) moves it into one of the
//! four visible modes, user events are forwarded as method calls, and
//! [`present`](FormEngine::present) describes what to draw right now.
//!
//! | Mode | Active machinery |
//! |---|---|
//! | `Create`, `Edit` | state, validation, recomputation, interaction, row packing |
//! | `View` | profile projection only |
//! | `ConfirmDelete` | the delete prompt and its one action |
//! | `Closed` | nothing; all transient state is discarded |
//!
//! Saving is split into [`begin_submit`](FormEngine::begin_submit) and
//! [`finish_submit`](FormEngine::finish_submit) so that a host which awaits
//! persistence outside the engine can still close the form meanwhile. Every
//! close bumps a generation counter and results stamped with an older
//! generation are ignored. [`submit`](FormEngine::submit) composes both halves
//! for hosts that simply await.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use medform_core::logging::form_span;
use medform_core::{EngineSettings, FormError, FormResult, SETTINGS};

use crate::bound_field::BoundField;
use crate::fields::{find_owner, validate_descriptors, FieldDescriptor, FieldOption};
use crate::host::FormHost;
use crate::interaction::{InteractionState, Point, Region};
use crate::layout::{pack_rows, Row};
use crate::messages::{Notification, Notifications};
use crate::profile::{project, ProfileView, ViewLayout};
use crate::recompute::ActiveFields;
use crate::signature::SignatureCapture;
use crate::state::FormState;
use crate::validation;
use crate::value::{ErrorMap, FieldValue, Record, ValueMap};

/// The five mutually exclusive presentation modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalMode {
    /// Nothing is shown.
    #[default]
    Closed,
    /// An empty form for a new record.
    Create,
    /// A form pre-filled from an existing record.
    Edit,
    /// A read-only profile of a record.
    View,
    /// A destructive confirmation prompt.
    ConfirmDelete,
}

impl ModalMode {
    /// Returns the mode name as used in logs and serialized options.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
            Self::ConfirmDelete => "confirm-delete",
        }
    }

    /// Returns `true` for the modes that run the editing machinery.
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Create | Self::Edit)
    }
}

impl fmt::Display for ModalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialog size hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    /// Narrow dialog for short forms.
    Small,
    /// Standard dialog.
    #[default]
    Medium,
    /// Wide dialog.
    Large,
    /// Widest dialog, for dense multi-column forms.
    ExtraLarge,
}

/// Where host-supplied extra content sits relative to the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPosition {
    /// Above the first row.
    Top,
    /// Below the last row.
    #[default]
    Bottom,
}

/// Per-open presentation and behavior options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
    /// Dialog size hint.
    pub size: ModalSize,
    /// Overrides the save button label.
    pub save_label: Option<String>,
    /// Overrides the cancel button label.
    pub cancel_label: Option<String>,
    /// Overrides the delete button label.
    pub delete_label: Option<String>,
    /// Enables signature capture and merges its payload into saved values.
    pub show_signature: bool,
    /// Opaque host content drawn alongside the rows.
    pub extra_content: Option<String>,
    /// Placement of `extra_content`.
    pub extra_content_position: ContentPosition,
    /// Keeps the form open after a successful save.
    pub prevent_close_on_save: bool,
    /// Queues a success notification after a successful save.
    pub show_success_toast: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            size: ModalSize::default(),
            save_label: None,
            cancel_label: None,
            delete_label: None,
            show_signature: false,
            extra_content: None,
            extra_content_position: ContentPosition::default(),
            prevent_close_on_save: false,
            show_success_toast: true,
        }
    }
}

/// Everything a host supplies when opening the engine.
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    /// Dialog title.
    pub title: String,
    /// The record being edited, viewed, or deleted.
    pub data: Record,
    /// The field list for create and edit.
    pub fields: Vec<FieldDescriptor>,
    /// The read-only layout for view.
    pub view: ViewLayout,
    /// Presentation and behavior options.
    pub options: ModalOptions,
}

impl OpenRequest {
    /// Starts a request with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the record.
    #[must_use]
    pub fn data(mut self, data: Record) -> Self {
        self.data = data;
        self
    }

    /// Sets the field list.
    #[must_use]
    pub fn fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the view layout.
    #[must_use]
    pub fn view(mut self, view: ViewLayout) -> Self {
        self.view = view;
        self
    }

    /// Sets the options.
    #[must_use]
    pub fn options(mut self, options: ModalOptions) -> Self {
        self.options = options;
        self
    }
}

/// A validated save payload waiting for the host's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    generation: u64,
    mode: ModalMode,
    payload: Record,
}

impl SaveTicket {
    /// Returns the open/close generation the ticket was issued in.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the mode the ticket was issued in.
    pub const fn mode(&self) -> ModalMode {
        self.mode
    }

    /// Returns the payload to persist.
    pub const fn payload(&self) -> &Record {
        &self.payload
    }

    /// Moves the payload out, leaving an empty record behind.
    pub fn take_payload(&mut self) -> Record {
        std::mem::take(&mut self.payload)
    }
}

/// The result of the first submit phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation passed; persist the ticket's payload.
    Ready(SaveTicket),
    /// Validation failed; nothing should be persisted.
    Invalid(ErrorMap),
}

/// The result of a completed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The host persisted the payload.
    Saved {
        /// Whether the form closed afterwards.
        closed: bool,
    },
    /// Validation failed and the host was not called.
    Invalid(ErrorMap),
    /// The form was closed or reopened before the result arrived.
    Detached,
}

/// What the host should draw for create and edit.
#[derive(Debug, Clone)]
pub struct FormPresentation {
    /// Dialog title.
    pub title: String,
    /// Either create or edit.
    pub mode: ModalMode,
    /// Dialog size hint.
    pub size: ModalSize,
    /// Visible active fields, packed into rows.
    pub rows: Vec<Vec<BoundField>>,
    /// Label of the save button.
    pub save_label: String,
    /// Label of the cancel button.
    pub cancel_label: String,
    /// Whether to draw the signature pad.
    pub show_signature: bool,
    /// The captured signature as a `data:` URL.
    pub signature: Option<String>,
    /// Opaque host content drawn alongside the rows.
    pub extra_content: Option<String>,
    /// Placement of `extra_content`.
    pub extra_content_position: ContentPosition,
    /// `true` while the error map is non-empty.
    pub has_errors: bool,
}

/// What the host should draw for view.
#[derive(Debug, Clone)]
pub struct ProfilePresentation {
    /// Dialog title.
    pub title: String,
    /// Dialog size hint.
    pub size: ModalSize,
    /// The record projected through the view layout.
    pub profile: ProfileView,
    /// Label of the close button.
    pub cancel_label: String,
}

/// What the host should draw for delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    /// Dialog title.
    pub title: String,
    /// Confirmation question.
    pub message: String,
    /// Label of the destructive button.
    pub confirm_label: String,
    /// Label of the cancel button.
    pub cancel_label: String,
}

/// The current presentation, one variant per mode.
#[derive(Debug, Clone)]
pub enum Presentation {
    /// Nothing to draw.
    Closed,
    /// An editable form (create or edit).
    Form(FormPresentation),
    /// A read-only profile (view).
    Profile(ProfilePresentation),
    /// A delete confirmation.
    ConfirmDelete(DeletePrompt),
}

/// A schema-driven modal form.
#[derive(Debug)]
pub struct FormEngine {
    settings: EngineSettings,
    mode: ModalMode,
    title: String,
    options: ModalOptions,
    record: Record,
    view: ViewLayout,
    fields: ActiveFields,
    state: FormState,
    interaction: InteractionState,
    signature: SignatureCapture,
    notifications: Notifications,
    generation: u64,
    span: tracing::Span,
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEngine {
    /// Creates a closed engine using the global settings.
    pub fn new() -> Self {
        Self::with_settings(SETTINGS.get().clone())
    }

    /// Creates a closed engine with explicit settings.
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            mode: ModalMode::Closed,
            title: String::new(),
            options: ModalOptions::default(),
            record: Record::new(),
            view: ViewLayout::default(),
            fields: ActiveFields::default(),
            state: FormState::new(),
            interaction: InteractionState::new(),
            signature: SignatureCapture::new(),
            notifications: Notifications::new(),
            generation: 0,
            span: tracing::Span::none(),
        }
    }

    // ── Mode transitions ─────────────────────────────────────────────

    /// Opens the engine in `mode`, replacing whatever was open before.
    ///
    /// Create and edit validate the field list, seed the value map (create
    /// from an empty record, edit from `request.data`), and run one
    /// recomputation against the seeded values.
    pub fn open<H>(&mut self, mode: ModalMode, request: OpenRequest, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        if mode == ModalMode::Closed {
            return Err(FormError::InvalidMode {
                operation: "open",
                mode: mode.to_string(),
            });
        }
        if mode.is_editable() {
            validate_descriptors(&request.fields)?;
        }

        self.discard();
        self.mode = mode;
        self.title = request.title;
        self.options = request.options;
        self.record = request.data;
        self.view = request.view;
        self.fields = ActiveFields::new(request.fields);
        self.span = form_span(&self.title, mode.as_str());
        tracing::info!(parent: &self.span, "form opened");

        if mode.is_editable() {
            if let Err(err) = self.seed(host) {
                tracing::warn!(parent: &self.span, error = %err, "form failed to open");
                self.discard();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Re-seeds an open form from a changed field list or record.
    ///
    /// The value map is rebuilt from scratch; in-progress edits are dropped.
    pub fn reload<H>(
        &mut self,
        fields: Vec<FieldDescriptor>,
        record: Record,
        host: &H,
    ) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        self.ensure_editable("reload")?;
        validate_descriptors(&fields)?;
        self.fields = ActiveFields::new(fields);
        self.record = record;
        self.interaction.close_all();
        tracing::debug!(parent: &self.span, "form reloaded");
        self.seed(host)
    }

    /// Closes the form and discards all transient state.
    ///
    /// Nothing is persisted. Notifications already queued survive.
    pub fn close(&mut self) {
        if self.mode != ModalMode::Closed {
            tracing::info!(parent: &self.span, "form closed");
        }
        self.discard();
    }

    /// Closes the form on user dismissal and tells the host.
    pub fn cancel<H>(&mut self, host: &H)
    where
        H: FormHost + ?Sized,
    {
        self.close();
        host.cancelled();
    }

    fn discard(&mut self) {
        self.mode = ModalMode::Closed;
        self.title.clear();
        self.options = ModalOptions::default();
        self.record.clear();
        self.view = ViewLayout::default();
        self.fields.clear();
        self.state.clear();
        self.interaction.reset();
        self.signature.clear();
        self.generation += 1;
        self.span = tracing::Span::none();
    }

    fn seed<H>(&mut self, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        if self.mode == ModalMode::Create {
            self.state.initialize(self.fields.active(), &Record::new());
        } else {
            self.state.initialize(self.fields.active(), &self.record);
        }
        self.recompute(host)
    }

    fn recompute<H>(&mut self, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        if self.fields.recompute(host, self.state.values())? {
            self.state.seed_missing(self.fields.active());
        }
        Ok(())
    }

    fn ensure_editable(&self, operation: &'static str) -> FormResult<()> {
        if self.mode.is_editable() {
            Ok(())
        } else {
            Err(FormError::InvalidMode {
                operation,
                mode: self.mode.to_string(),
            })
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Returns the current mode.
    pub const fn mode(&self) -> ModalMode {
        self.mode
    }

    /// Returns the title supplied on open.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the options supplied on open.
    pub const fn options(&self) -> &ModalOptions {
        &self.options
    }

    /// Returns the engine settings.
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the record supplied on open.
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// Returns the current value map.
    pub const fn values(&self) -> &ValueMap {
        self.state.values()
    }

    /// Returns the current error map.
    pub const fn errors(&self) -> &ErrorMap {
        self.state.errors()
    }

    /// Returns the field list currently in effect.
    pub fn active_fields(&self) -> &[FieldDescriptor] {
        self.fields.active()
    }

    /// Returns the open/close generation counter.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Applies one field edit.
    ///
    /// The edit is applied against the latest value map and clears that
    /// field's error. The host is then notified and asked to recompute the
    /// field list. A rejected recomputation is reported as an error, but the
    /// edit itself stays applied.
    pub fn set_value<H>(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
        host: &H,
    ) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        self.ensure_editable("set_value")?;
        self.state.set_value(self.fields.active(), name, value.into())?;
        tracing::debug!(parent: &self.span, field = name, "value changed");
        host.notify_change(self.state.values());
        self.recompute(host)
    }

    /// Adds or removes `option` in the multi-valued field `name`.
    pub fn toggle_option<H>(&mut self, name: &str, option: &str, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        let next = self.state.toggled_selection(name, option);
        self.set_value(name, next, host)
    }

    /// Picks `option` in a single-choice dropdown and collapses it.
    pub fn select_option<H>(&mut self, name: &str, option: &str, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        self.set_value(name, option, host)?;
        if self.interaction.is_open(name) {
            self.interaction.toggle(name);
        }
        Ok(())
    }

    /// Takes a suggestion into the text field `name` and hides the list.
    pub fn select_suggestion<H>(&mut self, name: &str, value: &str, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        self.set_value(name, value, host)?;
        self.interaction.clear_suggestions(name);
        Ok(())
    }

    /// Re-evaluates every visible active field and replaces the error map.
    ///
    /// Returns `true` if the form is valid.
    pub fn validate(&mut self) -> bool {
        let errors = validation::validate(self.fields.active(), self.state.values());
        let valid = errors.is_empty();
        self.state.replace_errors(errors);
        valid
    }

    /// Packs the visible active fields into rows.
    ///
    /// Empty outside create and edit.
    pub fn rows(&self) -> Vec<Row<'_>> {
        if !self.mode.is_editable() {
            return Vec::new();
        }
        pack_rows(
            self.fields.visible(self.state.values()),
            self.settings.row_capacity,
        )
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Expands or collapses the dropdown of `name`; returns the new state.
    pub fn toggle_dropdown(&mut self, name: &str) -> FormResult<bool> {
        self.ensure_editable("toggle_dropdown")?;
        let field = find_owner(self.fields.active(), name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !field.kind.has_dropdown() {
            return Err(FormError::ConfigurationError(format!(
                "field '{name}' has no dropdown"
            )));
        }
        Ok(self.interaction.toggle(name))
    }

    /// Updates the inline search of an open dropdown.
    pub fn set_search(&mut self, name: &str, query: &str) -> bool {
        self.interaction.set_search(name, query)
    }

    /// Recomputes the suggestion list of `name` for `query`.
    pub fn filter_suggestions(&mut self, name: &str, query: &str) -> FormResult<&[FieldOption]> {
        self.ensure_editable("filter_suggestions")?;
        let field = find_owner(self.fields.active(), name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        Ok(self
            .interaction
            .filter_suggestions(name, query, field.suggestion_candidates()))
    }

    /// Registers the on-screen region of an open dropdown or suggestion list.
    pub fn register_region(&mut self, name: impl Into<String>, region: Region) {
        self.interaction.register_region(name, region);
    }

    /// Removes a previously registered region.
    pub fn deregister_region(&mut self, name: &str) -> Option<Region> {
        self.interaction.deregister_region(name)
    }

    /// Forwards a pointer press; returns `true` if overlays were dismissed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.interaction.pointer_down(point)
    }

    /// Forwards a focus change; returns `true` if overlays were dismissed.
    pub fn focus_moved(&mut self, name: Option<&str>) -> bool {
        self.interaction.focus_moved(name)
    }

    /// Closes every dropdown and suggestion list.
    pub fn close_overlays(&mut self) {
        self.interaction.close_all();
    }

    /// Returns dropdown and suggestion state.
    pub const fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    // ── Signature ────────────────────────────────────────────────────

    /// Returns the signature capture.
    pub const fn signature(&self) -> &SignatureCapture {
        &self.signature
    }

    /// Returns the signature capture for drawing or uploading.
    pub fn signature_mut(&mut self) -> &mut SignatureCapture {
        &mut self.signature
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validates and, on success, issues a ticket carrying the save payload.
    ///
    /// The payload is the full value map. With signature capture enabled it
    /// also carries the signature under the configured key, `null` when
    /// nothing was captured. A blocked submission queues an error
    /// notification and returns the error map.
    pub fn begin_submit(&mut self) -> FormResult<SubmitStart> {
        self.ensure_editable("submit")?;
        if !self.validate() {
            tracing::warn!(
                parent: &self.span,
                errors = self.state.errors().len(),
                "submission blocked by validation"
            );
            self.notifications.error(&self.settings.invalid_message);
            return Ok(SubmitStart::Invalid(self.state.errors().clone()));
        }

        let mut payload = self.state.values().to_json();
        if self.options.show_signature {
            let signature = self
                .signature
                .payload()
                .map_or(serde_json::Value::Null, |url| {
                    serde_json::Value::String(url.to_string())
                });
            payload.insert(self.settings.signature_key.clone(), signature);
        }

        Ok(SubmitStart::Ready(SaveTicket {
            generation: self.generation,
            mode: self.mode,
            payload,
        }))
    }

    /// Applies the host's answer to a ticket.
    ///
    /// A ticket from an earlier open/close cycle is ignored. A failed save
    /// keeps the form open and returns the host's error. A successful save
    /// queues the success notification (unless suppressed) and closes the
    /// form (unless `prevent_close_on_save` is set).
    pub fn finish_submit(
        &mut self,
        ticket: SaveTicket,
        result: FormResult<()>,
    ) -> FormResult<SubmitOutcome> {
        if ticket.generation != self.generation || !self.mode.is_editable() {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "save result ignored after close"
            );
            return Ok(SubmitOutcome::Detached);
        }
        if let Err(err) = result {
            tracing::warn!(parent: &self.span, error = %err, "save failed; form stays open");
            return Err(err);
        }

        tracing::info!(parent: &self.span, "record saved");
        if self.options.show_success_toast {
            let message = if ticket.mode == ModalMode::Create {
                &self.settings.created_message
            } else {
                &self.settings.updated_message
            };
            self.notifications.success(message);
        }

        let closed = !self.options.prevent_close_on_save;
        if closed {
            self.close();
        }
        Ok(SubmitOutcome::Saved { closed })
    }

    /// Validates, persists through the host, and applies the outcome.
    pub async fn submit<H>(&mut self, host: &H) -> FormResult<SubmitOutcome>
    where
        H: FormHost + ?Sized,
    {
        let mut ticket = match self.begin_submit()? {
            SubmitStart::Ready(ticket) => ticket,
            SubmitStart::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
        };
        let result = host
            .persist(ticket.take_payload())
            .instrument(self.span.clone())
            .await;
        self.finish_submit(ticket, result)
    }

    /// Runs the destructive action of the delete prompt.
    ///
    /// On success a notification is queued and the engine closes. On failure
    /// the prompt stays open.
    pub async fn confirm_delete<H>(&mut self, host: &H) -> FormResult<()>
    where
        H: FormHost + ?Sized,
    {
        if self.mode != ModalMode::ConfirmDelete {
            return Err(FormError::InvalidMode {
                operation: "delete",
                mode: self.mode.to_string(),
            });
        }
        if let Err(err) = host.delete().instrument(self.span.clone()).await {
            tracing::warn!(parent: &self.span, error = %err, "delete failed");
            return Err(err);
        }

        tracing::info!(parent: &self.span, "record deleted");
        self.notifications.success(&self.settings.deleted_message);
        self.close();
        Ok(())
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Returns the queued notifications without draining them.
    pub const fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Drains the queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ── Presentation ─────────────────────────────────────────────────

    /// Describes what the host should draw in the current mode.
    pub fn present(&self) -> Presentation {
        let cancel_label = self
            .options
            .cancel_label
            .clone()
            .unwrap_or_else(|| self.settings.cancel_label.clone());

        match self.mode {
            ModalMode::Closed => Presentation::Closed,
            ModalMode::Create | ModalMode::Edit => {
                let default_save = if self.mode == ModalMode::Create {
                    &self.settings.create_label
                } else {
                    &self.settings.edit_label
                };
                let rows: Vec<Vec<BoundField>> = self
                    .rows()
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|field| BoundField::new(field, &self.state, &self.interaction))
                            .collect()
                    })
                    .collect();
                Presentation::Form(FormPresentation {
                    title: self.title.clone(),
                    mode: self.mode,
                    size: self.options.size,
                    rows,
                    save_label: self
                        .options
                        .save_label
                        .clone()
                        .unwrap_or_else(|| default_save.clone()),
                    cancel_label,
                    show_signature: self.options.show_signature,
                    signature: self.signature.payload().map(str::to_string),
                    extra_content: self.options.extra_content.clone(),
                    extra_content_position: self.options.extra_content_position,
                    has_errors: !self.state.errors().is_empty(),
                })
            }
            ModalMode::View => Presentation::Profile(ProfilePresentation {
                title: self.title.clone(),
                size: self.options.size,
                profile: project(&self.view, &self.record, &self.settings.empty_display),
                cancel_label,
            }),
            ModalMode::ConfirmDelete => Presentation::ConfirmDelete(DeletePrompt {
                title: self.title.clone(),
                message: self.settings.delete_prompt.clone(),
                confirm_label: self
                    .options
                    .delete_label
                    .clone()
                    .unwrap_or_else(|| self.settings.delete_label.clone()),
                cancel_label,
            }),
        }
    }
}
