//! Staff accounts CRUD form and list.

use fleet::{ClientConfig, EntityForm, User, UserRole};
use leptos::prelude::*;

use crate::components::crud;
use crate::components::fields::submit_label;

#[component]
pub fn UserForm() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let base_url = StoredValue::new(config.api_base_url.clone());
    let form = RwSignal::new(EntityForm::<User>::new());

    crud::load(&config.api_base_url, form);

    let records = Memo::new(move |_| form.with(|f| f.records().to_vec()));
    let editing = Memo::new(move |_| form.with(|f| f.target_id().is_some()));
    let submitting = Memo::new(move |_| form.with(EntityForm::is_submitting));
    let role = Memo::new(move |_| form.with(|f| f.draft().role));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        base_url.with_value(|url| crud::submit(url, form));
    };

    view! {
        <div class="entity">
            <section class="panel">
                <h2>{move || if editing.get() { "Modifier l'utilisateur" } else { "Nouvel utilisateur" }}</h2>
                <form class="entity-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Nom"</span>
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.draft().nom.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.nom = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Prénom"</span>
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.draft().prenom.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.prenom = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Email"</span>
                        <input
                            type="email"
                            required
                            prop:value=move || form.with(|f| f.draft().email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.email = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Société"</span>
                        <input
                            type="text"
                            prop:value=move || form.with(|f| f.draft().societe.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.societe = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Téléphone"</span>
                        <input
                            type="tel"
                            prop:value=move || form.with(|f| f.draft().telephone.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.telephone = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Rôle"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            crud::set_draft(form, |d| d.role = UserRole::parse(&value));
                        }>
                            {UserRole::ALL
                                .into_iter()
                                .map(|r| {
                                    view! {
                                        <option value=r.as_str() selected=move || role.get() == r>
                                            {r.label()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="field">
                        <span>
                            {move || if editing.get() { "Mot de passe (laisser vide pour conserver)" } else { "Mot de passe" }}
                        </span>
                        <input
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.draft().password.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                crud::set_draft(form, |d| d.password = value);
                            }
                        />
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
                <h3>"Liste des utilisateurs"</h3>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Nom"</th>
                            <th>"Email"</th>
                            <th>"Société"</th>
                            <th>"Téléphone"</th>
                            <th>"Rôle"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            records
                                .get()
                                .into_iter()
                                .map(|u| {
                                    let id = u.id;
                                    let name = u.full_name();
                                    let email = u.email.clone();
                                    let company = u.societe.clone().unwrap_or_else(|| "-".to_owned());
                                    let phone = u.telephone.clone().unwrap_or_else(|| "-".to_owned());
                                    let role_label = u.role.label();
                                    view! {
                                        <tr>
                                            <td class="table__strong">{name}</td>
                                            <td>{email}</td>
                                            <td>{company}</td>
                                            <td>{phone}</td>
                                            <td>{role_label}</td>
                                            <td class="table__actions">
                                                <button class="link" on:click=move |_| form.update(|f| f.edit(&u))>
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
