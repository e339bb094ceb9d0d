//! Android app download page with an "email me the link" action.
//!
//! ERROR HANDLING
//! ==============
//! The mail request reports through an inline banner, never an alert. A
//! cancelled or blank prompt sends nothing and leaves the banner as it was.

#[cfg(test)]
#[path = "apk_section_test.rs"]
mod apk_section_test;

use fleet::ClientConfig;
use leptos::prelude::*;

use crate::net::api::browser_api;
use crate::util::dialog;

/// File name offered to the browser's download dialog.
pub const APK_FILE_NAME: &str = "billun-app.apk";
const EMAIL_PROMPT: &str = "Entrer l'adresse email pour envoyer le lien de téléchargement APK :";

const INSTALL_STEPS: [(&str, &str); 4] = [
    (
        "Autoriser les sources inconnues",
        "Allez dans Paramètres → Sécurité → Autoriser l'installation d'applications de sources inconnues",
    ),
    ("Télécharger l'APK", "Cliquez sur le bouton \"Télécharger APK\" ci-dessus ou recevez le lien par email"),
    ("Installer l'application", "Ouvrez le fichier APK téléchargé et suivez les instructions d'installation"),
    ("Se connecter", "Utilisez vos identifiants de connexion web pour accéder à l'application"),
];

/// Outcome of the last mail request, shown as a banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Sent(String),
    Failed,
}

impl Banner {
    pub fn text(&self) -> String {
        match self {
            Self::Sent(email) => format!("Lien de téléchargement envoyé avec succès à {email}"),
            Self::Failed => "Erreur lors de l'envoi de l'email".to_owned(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Sent(_) => "banner banner--ok",
            Self::Failed => "banner banner--error",
        }
    }
}

#[component]
pub fn ApkSection() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let apk_link = config.apk_link.clone();
    let base_url = config.api_base_url;

    let busy = RwSignal::new(false);
    let banner = RwSignal::new(None::<Banner>);

    let link_for_mail = apk_link.clone();
    let on_send = move |_| {
        if busy.get() {
            return;
        }
        let Some(email) = dialog::prompt(EMAIL_PROMPT) else {
            return;
        };
        busy.set(true);
        banner.set(None);

        let api = browser_api(&base_url);
        let link = link_for_mail.clone();
        leptos::task::spawn_local(async move {
            let outcome = match api.send_apk_link(&email, &link).await {
                Ok(()) => Banner::Sent(email),
                Err(error) => {
                    tracing::warn!(%error, "apk link mail failed");
                    Banner::Failed
                }
            };
            banner.set(Some(outcome));
            busy.set(false);
        });
    };

    view! {
        <div class="entity">
            <section class="panel panel--centered">
                <h2>"Application Mobile Billun"</h2>
                <div class="callout">
                    <h3>"Application Android disponible"</h3>
                    <p>
                        "Téléchargez l'application mobile Billun pour gérer votre flotte depuis votre smartphone ou tablette."
                    </p>
                </div>
                <div class="apk-actions">
                    <a class="btn btn--primary btn--large" href=apk_link download=APK_FILE_NAME target="_blank">
                        "Télécharger APK"
                    </a>
                    <button class="btn btn--success btn--large" on:click=on_send disabled=move || busy.get()>
                        {move || if busy.get() { "Envoi..." } else { "Envoyer par email" }}
                    </button>
                </div>
                {move || banner.get().map(|b| view! { <div class=b.class()>{b.text()}</div> })}
            </section>

            <section class="panel">
                <h3>"Instructions d'installation"</h3>
                <ol class="steps">
                    {INSTALL_STEPS
                        .into_iter()
                        .map(|(title, detail)| {
                            view! {
                                <li>
                                    <h4>{title}</h4>
                                    <p class="panel__muted">{detail}</p>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ol>
            </section>
        </div>
    }
}
