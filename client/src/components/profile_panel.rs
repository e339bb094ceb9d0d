//! Profile tab placeholder.

use leptos::prelude::*;

#[component]
pub fn ProfilePanel() -> impl IntoView {
    view! {
        <section class="panel">
            <h2>"Mon profil"</h2>
            <p class="panel__muted">"Fonctionnalité de modification de profil à venir..."</p>
        </section>
    }
}
