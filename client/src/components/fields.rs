//! Input parsing and label helpers shared by the entity forms.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use fleet::MaterialStatus;

/// Parse a numeric input. Blank or malformed input means unset.
pub fn optional_number(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Text for a numeric input bound to an optional value.
pub fn number_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Submit button text for the current form state.
pub fn submit_label(submitting: bool, editing: bool) -> &'static str {
    match (submitting, editing) {
        (true, _) => "Enregistrement...",
        (false, true) => "Modifier",
        (false, false) => "Créer",
    }
}

/// Badge modifier class for a material status.
pub fn status_badge_class(status: MaterialStatus) -> &'static str {
    match status {
        MaterialStatus::Disponible | MaterialStatus::Actif => "badge badge--ok",
        MaterialStatus::Maintenance => "badge badge--warn",
        MaterialStatus::Retire | MaterialStatus::Autre => "badge badge--off",
    }
}
