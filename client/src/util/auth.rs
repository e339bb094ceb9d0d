//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated routes apply identical unauthenticated redirect behavior;
//! the login page applies the mirror rule for operators already signed in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use fleet::{Session, TokenStorage};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::LOGIN_ROUTE;
use crate::util::storage::BrowserStorage;

/// Landing route for signed-in operators.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Token presence check. Expiry is the server's call.
pub fn signed_in<S: TokenStorage>(storage: S) -> bool {
    Session::new(storage).is_authenticated()
}

/// Redirect to the login view once, on mount, when no token is stored.
pub fn install_unauth_redirect<F>(navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if !signed_in(BrowserStorage) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}
