use super::*;

#[test]
fn optional_number_ignores_blank_and_garbage() {
    assert_eq!(optional_number(" 15000 "), Some(15000));
    assert_eq!(optional_number(""), None);
    assert_eq!(optional_number("12 km"), None);
    assert_eq!(optional_number("-3"), None);
}

#[test]
fn number_text_is_empty_when_unset() {
    assert_eq!(number_text(None), "");
    assert_eq!(number_text(Some(7)), "7");
}

#[test]
fn submit_label_prefers_in_flight_state() {
    assert_eq!(submit_label(true, true), "Enregistrement...");
    assert_eq!(submit_label(false, true), "Modifier");
    assert_eq!(submit_label(false, false), "Créer");
}

#[test]
fn maintenance_gets_warning_badge() {
    assert_eq!(status_badge_class(MaterialStatus::Maintenance), "badge badge--warn");
}
