//! Tabbed dashboard composing the entity forms and the APK section.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. The active tab comes from the
//! `?tab=` query so sidebar links, reloads and the back button agree. Each
//! tab's component mounts when selected and unmounts when left, which is what
//! starts and stops the Materials poller.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::apk_section::ApkSection;
use crate::components::material_form::MaterialForm;
use crate::components::profile_panel::ProfilePanel;
use crate::components::sidebar::Sidebar;
use crate::components::signal_form::SignalForm;
use crate::components::user_form::UserForm;
use crate::util::auth::{DASHBOARD_ROUTE, install_unauth_redirect, signed_in};
use crate::util::storage::BrowserStorage;

/// Dashboard sections, in sidebar order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Users,
    Materials,
    Signals,
    Apk,
    Profile,
}

impl Tab {
    pub const ALL: [Self; 5] = [Self::Users, Self::Materials, Self::Signals, Self::Apk, Self::Profile];

    /// Resolve the `tab` query value. Missing or unknown values select users.
    pub fn from_query(raw: Option<&str>) -> Self {
        Self::ALL.into_iter().find(|tab| Some(tab.slug()) == raw).unwrap_or_default()
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Materials => "materials",
            Self::Signals => "signals",
            Self::Apk => "apk",
            Self::Profile => "profile",
        }
    }

    /// Sidebar entry text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Utilisateurs",
            Self::Materials => "Matériel",
            Self::Signals => "Signalements",
            Self::Apk => "APK",
            Self::Profile => "Profil",
        }
    }

    /// Page header text.
    pub fn title(self) -> &'static str {
        match self {
            Self::Users => "Gestion des Utilisateurs",
            Self::Materials => "Gestion du Matériel",
            Self::Signals => "Gestion des Signalements",
            Self::Apk => "Application Mobile",
            Self::Profile => "Mon Profil",
        }
    }

    pub fn href(self) -> String {
        format!("{DASHBOARD_ROUTE}?tab={}", self.slug())
    }
}

/// Dashboard page. Redirects to `/` when no token is stored.
#[component]
pub fn DashboardPage() -> impl IntoView {
    install_unauth_redirect(use_navigate());
    let authenticated = signed_in(BrowserStorage);

    let query = use_query_map();
    let tab = Memo::new(move |_| query.with(|q| Tab::from_query(q.get("tab").as_deref())));

    view! {
        <Show
            when=move || authenticated
            fallback=|| view! { <div class="dashboard-page"><p>"Redirection vers la connexion..."</p></div> }
        >
            <div class="dashboard-page">
                <Sidebar active=tab/>
                <div class="dashboard-page__main">
                    <header class="dashboard-page__header">
                        <h1>{move || tab.get().title()}</h1>
                    </header>
                    <main class="dashboard-page__content">
                        {move || match tab.get() {
                            Tab::Users => view! { <UserForm/> }.into_any(),
                            Tab::Materials => view! { <MaterialForm/> }.into_any(),
                            Tab::Signals => view! { <SignalForm/> }.into_any(),
                            Tab::Apk => view! { <ApkSection/> }.into_any(),
                            Tab::Profile => view! { <ProfilePanel/> }.into_any(),
                        }}
                    </main>
                </div>
            </div>
        </Show>
    }
}
