use super::*;

#[test]
fn legacy_details_joins_present_fields() {
    let signal: Signal = serde_json::from_value(serde_json::json!({
        "id": 1, "materiel_id": 2, "description": "x", "titre": "Crevaison", "priorite": "haute"
    }))
    .unwrap();
    assert_eq!(legacy_details(&signal), "Crevaison · haute");
}

#[test]
fn legacy_details_empty_for_current_shape() {
    let signal: Signal =
        serde_json::from_value(serde_json::json!({ "id": 1, "materiel_id": 2, "description": "x" })).unwrap();
    assert_eq!(legacy_details(&signal), "");
}
