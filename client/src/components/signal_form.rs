//! Anomaly reports CRUD form and list.
//!
//! The material picker is filled from `/materiels/` once on mount. Reports
//! pointing at a material that is not in that list render as `ID: <n>`.

#[cfg(test)]
#[path = "signal_form_test.rs"]
mod signal_form_test;

use fleet::model::{date_part, material_label};
use fleet::{ClientConfig, EntityForm, Material, Signal};
use leptos::prelude::*;

use crate::components::crud;
use crate::components::fields::submit_label;
use crate::net::api::browser_api;

#[component]
pub fn SignalForm() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let base_url = StoredValue::new(config.api_base_url.clone());
    let form = RwSignal::new(EntityForm::<Signal>::new());
    let materials = RwSignal::new(Vec::<Material>::new());

    crud::load(&config.api_base_url, form);
    let api = browser_api(&config.api_base_url);
    leptos::task::spawn_local(async move {
        match api.list::<Material>().await {
            Ok(list) => materials.set(list),
            Err(error) => tracing::warn!(%error, "material picker fetch failed"),
        }
    });

    let records = Memo::new(move |_| form.with(|f| f.records().to_vec()));
    let editing = Memo::new(move |_| form.with(|f| f.target_id().is_some()));
    let submitting = Memo::new(move |_| form.with(EntityForm::is_submitting));
    let selected = Memo::new(move |_| form.with(|f| f.draft().materiel_id));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        base_url.with_value(|url| crud::submit(url, form));
    };

    view! {
        <div class="entity">
            <section class="panel">
                <h2>{move || if editing.get() { "Modifier le signalement" } else { "Nouveau signalement" }}</h2>
                <form class="entity-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Matériel"</span>
                        <select on:change=move |ev| {
                            let id = event_target_value(&ev).parse().unwrap_or(0);
                            crud::set_draft(form, |d| d.materiel_id = id);
                        }>
                            <option value="0" selected=move || selected.get() == 0>"Sélectionner un matériel"</option>
                            {move || {
                                materials
                                    .get()
                                    .into_iter()
                                    .map(|m| {
                                        let id = m.id;
                                        view! {
                                            <option value=id.to_string() selected=move || selected.get() == id>
                                                {m.picker_label()}
                                            </option>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </label>
                    <label class="field">
                        <span>"URL de la photo"</span>
                        <input
                            type="url"
                            placeholder="https://..."
                            prop:value=move || form.with(|f| f.draft().photo_url.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.photo_url = value);
                            }
                        />
                    </label>
                    <label class="field field--wide">
                        <span>"Description"</span>
                        <textarea
                            rows="3"
                            required
                            prop:value=move || form.with(|f| f.draft().description.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.description = value);
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
                <h3>"Liste des signalements"</h3>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Matériel"</th>
                            <th>"Description"</th>
                            <th>"Photo"</th>
                            <th>"Date"</th>
                            <th>"Détails"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let known = materials.get();
                            records
                                .get()
                                .into_iter()
                                .map(|s| {
                                    let id = s.id;
                                    let material = material_label(&known, s.materiel_id);
                                    let description = s.description.clone();
                                    let photo = s.photo_url.clone();
                                    let date = s.date_signalement.as_deref().map_or("-", date_part).to_owned();
                                    let details = legacy_details(&s);
                                    view! {
                                        <tr>
                                            <td class="table__strong">{material}</td>
                                            <td>{description}</td>
                                            <td>
                                                {photo.map(|url| view! { <a href=url target="_blank">"Voir"</a> })}
                                            </td>
                                            <td>{date}</td>
                                            <td class="table__muted">{details}</td>
                                            <td class="table__actions">
                                                <button class="link" on:click=move |_| form.update(|f| f.edit(&s))>
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

/// Title, kind, priority and status carried by older report records.
fn legacy_details(signal: &Signal) -> String {
    [&signal.titre, &signal.type_signal, &signal.priorite, &signal.statut]
        .into_iter()
        .filter_map(Option::as_deref)
        .collect::<Vec<_>>()
        .join(" · ")
}
