//! Async list / submit / delete glue between a form signal and the backend.
//!
//! DESIGN
//! ======
//! A signal cannot lend `&mut EntityForm` across an await, so each action
//! runs the synchronous transition in `update`, awaits the request on a
//! fresh client, then applies the outcome in a second `update`.
//!
//! ERROR HANDLING
//! ==============
//! List failures are logged only. Validation and save failures raise a
//! blocking alert and keep the draft. A 401 raises nothing: the client has
//! already cleared the token and is navigating to the login view.

use fleet::{ApiError, EntityForm, Resource};
use leptos::prelude::*;

use crate::net::api::{BrowserApi, browser_api};
use crate::util::dialog;

pub const DELETE_FAILED: &str = "Erreur lors de la suppression.";

/// Bounds a [`Resource`] needs to sit in a Leptos signal.
pub trait SignalResource: Resource<Draft: Send + Sync> + PartialEq + Send + Sync {}

impl<R> SignalResource for R where R: Resource<Draft: Send + Sync> + PartialEq + Send + Sync {}

/// Replace the cached list with a fresh fetch.
pub async fn reload<R: SignalResource>(api: &BrowserApi, form: RwSignal<EntityForm<R>>) {
    match api.list::<R>().await {
        Ok(records) => form.update(|f| f.replace_records(records)),
        Err(error) => tracing::warn!(resource = R::NOUN, %error, "list fetch failed"),
    }
}

/// Fire-and-forget [`reload`] for mount time.
pub fn load<R: SignalResource>(base_url: &str, form: RwSignal<EntityForm<R>>) {
    let api = browser_api(base_url);
    leptos::task::spawn_local(async move { reload(&api, form).await });
}

/// Validate, create or update, then reload on success.
///
/// The submit button is disabled while `Submitting`; a submit that still
/// arrives sends its own request.
pub fn submit<R: SignalResource>(base_url: &str, form: RwSignal<EntityForm<R>>) {
    let submission = match form.try_update(|f| f.begin_submit()) {
        Some(Ok(submission)) => submission,
        Some(Err(invalid)) => {
            dialog::alert(&invalid.to_string());
            return;
        }
        None => return,
    };

    let api = browser_api(base_url);
    leptos::task::spawn_local(async move {
        let outcome = api.submit::<R>(&submission).await;
        form.update(|f| f.finish_submit(&outcome));
        match outcome {
            Ok(()) => reload(&api, form).await,
            Err(ApiError::Unauthorized) => {}
            Err(error) => dialog::alert(&fleet::form::failure_message(&error)),
        }
    });
}

/// Confirm, delete `id`, then reload. Declining sends nothing.
pub fn delete<R: SignalResource>(base_url: &str, form: RwSignal<EntityForm<R>>, id: u32) {
    if !dialog::confirm(R::DELETE_PROMPT) {
        return;
    }
    let api = browser_api(base_url);
    leptos::task::spawn_local(async move {
        match api.delete::<R>(id).await {
            Ok(()) => reload(&api, form).await,
            Err(ApiError::Unauthorized) => {}
            Err(error) => {
                tracing::warn!(resource = R::NOUN, id, %error, "delete failed");
                dialog::alert(DELETE_FAILED);
            }
        }
    });
}

/// Apply an input change to the draft.
pub fn set_draft<R: SignalResource>(form: RwSignal<EntityForm<R>>, change: impl FnOnce(&mut R::Draft)) {
    form.update(|f| f.edit_draft(change));
}
