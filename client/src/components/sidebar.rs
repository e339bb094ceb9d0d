//! Dashboard navigation rail with the logout action.

use fleet::ClientConfig;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::browser_api;
use crate::pages::dashboard::Tab;
use crate::util::dialog;

pub const LOGOUT_PROMPT: &str = "Êtes-vous sûr de vouloir vous déconnecter ?";

#[component]
pub fn Sidebar(active: Memo<Tab>) -> impl IntoView {
    let base_url = use_context::<ClientConfig>().unwrap_or_default().api_base_url;
    let navigate = use_navigate();

    let on_logout = move |_| {
        if dialog::confirm(LOGOUT_PROMPT) {
            browser_api(&base_url).logout();
        }
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">
                <h1>"Billun"</h1>
                <p>"Gestion de flotte"</p>
            </div>
            <div class="sidebar__menu">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        let navigate = navigate.clone();
                        view! {
                            <button
                                class=move || {
                                    if active.get() == tab { "sidebar__item sidebar__item--active" } else { "sidebar__item" }
                                }
                                on:click=move |_| navigate(&tab.href(), NavigateOptions::default())
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <button class="sidebar__logout" on:click=on_logout>
                "Déconnexion"
            </button>
        </nav>
    }
}
