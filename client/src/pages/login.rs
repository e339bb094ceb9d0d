//! Login page: email + password exchanged for a bearer token.
//!
//! ERROR HANDLING
//! ==============
//! Any login failure (bad credentials, network, server) shows the same inline
//! banner and keeps the typed email. The API client does not redirect on a
//! rejected login, so the page stays put.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use fleet::ClientConfig;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::browser_api;
use crate::util::auth::{DASHBOARD_ROUTE, signed_in};
use crate::util::storage::BrowserStorage;

pub const LOGIN_FAILED: &str = "Erreur de connexion. Vérifiez vos identifiants.";
const MISSING_FIELDS: &str = "Veuillez saisir votre email et votre mot de passe.";

/// Trim the email and require both fields. The password is sent verbatim.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let base_url = use_context::<ClientConfig>().unwrap_or_default().api_base_url;
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let navigate_signed_in = navigate.clone();
    Effect::new(move || {
        if signed_in(BrowserStorage) {
            navigate_signed_in(DASHBOARD_ROUTE, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        let api = browser_api(&base_url);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.login(&email_value, &password_value).await {
                Ok(()) => navigate(DASHBOARD_ROUTE, NavigateOptions::default()),
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    error.set(LOGIN_FAILED.to_owned());
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Billun"</h1>
                <p class="login-card__subtitle">"Connexion à votre espace"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Adresse email"
                        required
                        disabled=move || busy.get()
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Mot de passe"
                        required
                        disabled=move || busy.get()
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error">{move || error.get()}</p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Connexion..." } else { "Se connecter" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
