use super::*;

#[test]
fn sent_banner_names_recipient() {
    let banner = Banner::Sent("chauffeur@billun.fr".to_owned());
    assert_eq!(banner.text(), "Lien de téléchargement envoyé avec succès à chauffeur@billun.fr");
    assert_eq!(banner.class(), "banner banner--ok");
}

#[test]
fn failed_banner_is_error_styled() {
    assert_eq!(Banner::Failed.class(), "banner banner--error");
    assert_eq!(Banner::Failed.text(), "Erreur lors de l'envoi de l'email");
}

#[test]
fn download_name_matches_published_file() {
    assert!(fleet::config::DEFAULT_APK_LINK.ends_with(APK_FILE_NAME));
}
