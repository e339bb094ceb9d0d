//! Root application component with routing and context providers.

use fleet::ClientConfig;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, login::LoginPage};

/// Root application component.
///
/// Provides the build-time [`ClientConfig`] as context and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "invalid build configuration; using defaults");
        ClientConfig::default()
    });
    tracing::debug!(api = %config.api_base_url, "client configured");
    provide_context(config);

    view! {
        <Title text="Billun - Gestion de flotte"/>

        <Router>
            <Routes fallback=|| "Page introuvable.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
