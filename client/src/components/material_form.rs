//! Materials CRUD form and list, kept fresh by the marker poller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounting this component starts one `FreshnessPoller`; unmounting (leaving
//! the tab) clears its alive flag so the loop exits at its next wake-up and
//! never writes into a disposed signal. Poll refreshes and user-initiated
//! reloads race freely; whichever response lands last is what renders.

use fleet::model::date_part;
use fleet::{ClientConfig, EntityForm, Material, MaterialKind, MaterialStatus};
use leptos::prelude::*;

use crate::components::crud;
use crate::components::fields::{number_text, optional_number, status_badge_class, submit_label};

#[component]
pub fn MaterialForm() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let base_url = StoredValue::new(config.api_base_url.clone());
    let form = RwSignal::new(EntityForm::<Material>::new());

    crud::load(&config.api_base_url, form);
    start_poller(&config, form);

    let records = Memo::new(move |_| form.with(|f| f.records().to_vec()));
    let editing = Memo::new(move |_| form.with(|f| f.target_id().is_some()));
    let submitting = Memo::new(move |_| form.with(EntityForm::is_submitting));
    let kind = Memo::new(move |_| form.with(|f| f.draft().type_materiel));
    let status = Memo::new(move |_| form.with(|f| f.draft().statut));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        base_url.with_value(|url| crud::submit(url, form));
    };

    view! {
        <div class="entity">
            <section class="panel">
                <h2>{move || if editing.get() { "Modifier le matériel" } else { "Nouveau matériel" }}</h2>
                <form class="entity-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Identifiant"</span>
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.draft().identifiant.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.identifiant = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Plaque"</span>
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.draft().plaque.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.plaque = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Type de matériel"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            crud::set_draft(form, |d| d.type_materiel = MaterialKind::parse(&value));
                        }>
                            <option value="" selected=move || kind.get().is_none()>"Sélectionner un type"</option>
                            {MaterialKind::ALL
                                .into_iter()
                                .map(|k| {
                                    view! {
                                        <option value=k.as_str() selected=move || kind.get() == Some(k)>
                                            {k.label()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="field">
                        <span>"Statut"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            crud::set_draft(form, |d| d.statut = MaterialStatus::parse(&value));
                        }>
                            {MaterialStatus::ALL
                                .into_iter()
                                .map(|s| {
                                    view! {
                                        <option value=s.as_str() selected=move || status.get() == s>
                                            {s.label()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="field">
                        <span>"Kilométrage"</span>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || form.with(|f| number_text(f.draft().kilometrage))
                            on:input=move |ev| {
                                let value = optional_number(&event_target_value(&ev));
                                crud::set_draft(form, |d| d.kilometrage = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Contrôle technique"</span>
                        <input
                            type="date"
                            prop:value=move || form.with(|f| f.draft().date_controle_technique.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.date_controle_technique = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"ID responsable"</span>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || form.with(|f| number_text(f.draft().responsable_id))
                            on:input=move |ev| {
                                let value = optional_number(&event_target_value(&ev));
                                crud::set_draft(form, |d| d.responsable_id = value);
                            }
                        />
                    </label>
                    <label class="field field--wide">
                        <span>"Options"</span>
                        <textarea
                            rows="3"
                            prop:value=move || form.with(|f| f.draft().options.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.options = value);
                            }
                        ></textarea>
                    </label>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || submitting.get()>
                            {move || submit_label(submitting.get(), editing.get())}
                        </button>
                        <Show when=move || editing.get()>
                            <button class="btn" type="button" on:click=move |_| form.update(EntityForm::cancel)>
                                "Annuler"
                            </button>
                        </Show>
                    </div>
                </form>
            </section>

            <section class="panel">
                <h3>"Liste du matériel"</h3>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Identifiant"</th>
                            <th>"Plaque"</th>
                            <th>"Type"</th>
                            <th>"Statut"</th>
                            <th>"Kilométrage"</th>
                            <th>"Contrôle technique"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            records
                                .get()
                                .into_iter()
                                .map(|m| {
                                    let id = m.id;
                                    let mileage = m.kilometrage.map_or_else(|| "-".to_owned(), |km| format!("{km} km"));
                                    let inspection = m.date_controle_technique.as_deref().map_or("-", date_part).to_owned();
                                    let kind_label = m.type_materiel.label();
                                    let row_status = m.statut;
                                    let identifiant = m.identifiant.clone();
                                    let plaque = m.plaque.clone();
                                    view! {
                                        <tr>
                                            <td class="table__strong">{identifiant}</td>
                                            <td>{plaque}</td>
                                            <td>{kind_label}</td>
                                            <td>
                                                <span class=status_badge_class(row_status)>{row_status.label()}</span>
                                            </td>
                                            <td>{mileage}</td>
                                            <td>{inspection}</td>
                                            <td class="table__actions">
                                                <button class="link" on:click=move |_| form.update(|f| f.edit(&m))>
                                                    "Modifier"
                                                </button>
                                                <button
                                                    class="link link--danger"
                                                    on:click=move |_| {
                                                        base_url.with_value(|url| crud::delete(url, form, id));
                                                    }
                                                >
                                                    "Supprimer"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </section>
        </div>
    }
}

/// Spawn the marker poller for this mount and stop it on cleanup.
fn start_poller(config: &ClientConfig, form: RwSignal<EntityForm<Material>>) {
    #[cfg(feature = "csr")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        let api = crate::net::api::browser_api(&config.api_base_url);
        let poller = fleet::FreshnessPoller::new(config.poll_interval);
        leptos::task::spawn_local(async move {
            poller
                .run(
                    &api,
                    gloo_timers::future::sleep,
                    || alive_task.load(Ordering::Relaxed),
                    |materials| form.update(|f| f.replace_records(materials)),
                )
                .await;
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, form);
    }
}
