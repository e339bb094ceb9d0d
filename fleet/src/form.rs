//! Generic create/edit/delete/list form over one REST resource.
//!
//! DESIGN
//! ======
//! `EntityForm` is a plain state machine:
//!
//! ```text
//! Idle --edit/type--> Editing --begin_submit--> Submitting --ok--> Idle
//!                        ^                          |
//!                        +----------err-------------+
//! ```
//!
//! The synchronous transitions are what the Leptos components drive (they hold
//! the form in a signal and cannot keep `&mut` across an await). The async
//! `refresh` / `submit` / `delete` helpers chain those transitions with
//! [`ApiClient`] calls for hosts that can, such as the CLI and tests.
//!
//! Every successful write is followed by a full list refetch; the local cache
//! is only ever replaced wholesale from server responses.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiError, Transport};
use crate::session::TokenStorage;

/// A REST collection the admin UI manages.
pub trait Resource: Clone + Debug + DeserializeOwned + 'static {
    /// Editable fields bound to the form inputs.
    type Draft: Clone + Debug + Default + PartialEq + Serialize;

    /// Collection path with trailing slash, e.g. `/materiels/`.
    const COLLECTION: &'static str;
    /// Human-readable singular used in logs.
    const NOUN: &'static str;
    /// Confirmation question shown before a delete.
    const DELETE_PROMPT: &'static str;

    fn id(&self) -> u32;

    fn to_draft(&self) -> Self::Draft;

    /// Client-side checks run before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns the message to show the operator.
    fn validate(_draft: &Self::Draft) -> Result<(), &'static str> {
        Ok(())
    }

    /// Wire body for create/update.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the draft cannot be encoded.
    fn payload(draft: &Self::Draft) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(draft)
    }
}

/// Path of a single record, e.g. `/materiels/7`.
#[must_use]
pub fn item_path<R: Resource>(id: u32) -> String {
    format!("{}{id}", R::COLLECTION)
}

/// Where the form is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

/// Error returned by [`EntityForm`] submissions.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Rejected before sending anything.
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Interactive yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator said no; no request was sent.
    Declined,
}

/// Snapshot of what a submit should send.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission<D> {
    /// `Some` for an update, `None` for a create.
    pub target_id: Option<u32>,
    pub draft: D,
}

/// Alert text for a failed create/update.
#[must_use]
pub fn failure_message(error: &ApiError) -> String {
    match error.detail() {
        Some(detail) => format!("Erreur lors de l'enregistrement : {detail}"),
        None => "Erreur lors de l'enregistrement. Veuillez vérifier les données saisies.".to_owned(),
    }
}

/// Local state of one mounted entity form.
#[derive(Clone, Debug)]
pub struct EntityForm<R: Resource> {
    records: Vec<R>,
    draft: R::Draft,
    target_id: Option<u32>,
    phase: FormPhase,
    error: Option<String>,
}

impl<R: Resource> Default for EntityForm<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> EntityForm<R> {
    #[must_use]
    pub fn new() -> Self {
        Self { records: Vec::new(), draft: R::Draft::default(), target_id: None, phase: FormPhase::Idle, error: None }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn target_id(&self) -> Option<u32> {
        self.target_id
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Last validation or submission failure, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the cached list. Last fetch wins.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Load `record` into the draft and switch to edit mode.
    pub fn edit(&mut self, record: &R) {
        self.draft = record.to_draft();
        self.target_id = Some(record.id());
        self.phase = FormPhase::Editing;
        self.error = None;
    }

    /// Mutate the draft in place, as a form input does.
    pub fn edit_draft(&mut self, change: impl FnOnce(&mut R::Draft)) {
        change(&mut self.draft);
        if self.phase == FormPhase::Idle {
            self.phase = FormPhase::Editing;
        }
    }

    /// Discard the draft and return to create mode.
    pub fn cancel(&mut self) {
        self.draft = R::Draft::default();
        self.target_id = None;
        self.phase = FormPhase::Idle;
        self.error = None;
    }

    /// Validate and enter `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] without changing the draft when a
    /// client-side check fails.
    pub fn begin_submit(&mut self) -> Result<Submission<R::Draft>, FormError> {
        if let Err(message) = R::validate(&self.draft) {
            tracing::debug!(resource = R::NOUN, message, "draft rejected client-side");
            self.phase = FormPhase::Editing;
            self.error = Some(message.to_owned());
            return Err(FormError::Invalid(message));
        }
        self.phase = FormPhase::Submitting;
        Ok(Submission { target_id: self.target_id, draft: self.draft.clone() })
    }

    /// Leave `Submitting`: reset on success, keep the draft on failure.
    pub fn finish_submit(&mut self, outcome: &Result<(), ApiError>) {
        match outcome {
            Ok(()) => self.cancel(),
            Err(error) => {
                tracing::warn!(resource = R::NOUN, %error, "save failed");
                self.phase = FormPhase::Editing;
                self.error = Some(failure_message(error));
            }
        }
    }

    /// Refetch the full list.
    ///
    /// # Errors
    ///
    /// Propagates the list failure; the cached list is left untouched.
    pub async fn refresh<T: Transport, S: TokenStorage>(&mut self, api: &ApiClient<T, S>) -> Result<(), ApiError> {
        match api.list::<R>().await {
            Ok(records) => {
                self.replace_records(records);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(resource = R::NOUN, %error, "list fetch failed");
                Err(error)
            }
        }
    }

    /// Validate, create or update, then refetch.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] with zero requests sent, or the API
    /// failure with the draft preserved. A refetch failure after a successful
    /// write is only logged.
    pub async fn submit<T: Transport, S: TokenStorage>(&mut self, api: &ApiClient<T, S>) -> Result<(), FormError> {
        let submission = self.begin_submit()?;
        let outcome = api.submit::<R>(&submission).await;
        self.finish_submit(&outcome);
        outcome?;
        let _ = self.refresh(api).await;
        Ok(())
    }

    /// Ask `confirm`, then delete `id` and refetch.
    ///
    /// # Errors
    ///
    /// Propagates the delete failure. A refetch failure is only logged.
    pub async fn delete<T: Transport, S: TokenStorage>(
        &mut self,
        api: &ApiClient<T, S>,
        id: u32,
        confirm: &impl Confirm,
    ) -> Result<DeleteOutcome, ApiError> {
        if !confirm.confirm(R::DELETE_PROMPT) {
            return Ok(DeleteOutcome::Declined);
        }
        if let Err(error) = api.delete::<R>(id).await {
            tracing::warn!(resource = R::NOUN, id, %error, "delete failed");
            return Err(error);
        }
        let _ = self.refresh(api).await;
        Ok(DeleteOutcome::Deleted)
    }
}
