use clap::CommandFactory;
use fleet::{MaterialDraft, UserDraft, UserRole};
use serde_json::json;

use super::*;

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parses_global_base_url() {
    let cli = Cli::try_parse_from(["fleet", "--base-url", "http://fleet.local", "ping"]).unwrap();
    assert_eq!(cli.base_url.as_deref(), Some("http://fleet.local"));
    assert!(matches!(cli.command, Command::Ping));
}

#[test]
fn parses_login_credentials() {
    let cli = Cli::try_parse_from(["fleet", "login", "--email", "admin@billun.fr", "--password", "secret"]).unwrap();
    match cli.command {
        Command::Login { email, password } => {
            assert_eq!(email, "admin@billun.fr");
            assert_eq!(password, "secret");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn materiels_accepts_shared_entity_commands() {
    let cli = Cli::try_parse_from(["fleet", "materiels", "delete", "7", "--yes"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Materiels { command: MaterielsCommand::Entity(EntityCommand::Delete { id: 7, yes: true }) }
    ));
}

#[test]
fn parses_watch_interval() {
    let cli = Cli::try_parse_from(["fleet", "materiels", "watch", "--interval-ms", "500"]).unwrap();
    match cli.command {
        Command::Materiels { command: MaterielsCommand::Watch(args) } => assert_eq!(args.interval_ms, Some(500)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn watch_rejects_zero_interval() {
    assert!(Cli::try_parse_from(["fleet", "materiels", "watch", "--interval-ms", "0"]).is_err());
}

#[test]
fn update_requires_data() {
    assert!(Cli::try_parse_from(["fleet", "users", "update", "3"]).is_err());
}

#[test]
fn anomalies_watch_is_not_a_command() {
    assert!(Cli::try_parse_from(["fleet", "anomalies", "watch"]).is_err());
}

// =============================================================================
// CONFIG OVERLAY
// =============================================================================

#[test]
fn base_url_flag_overrides_environment() {
    let config = resolve_config(Some("https://api.billun.fr/"), |key| {
        (key == "FLEET_API_URL").then(|| "http://ignored:1".to_owned())
    })
    .unwrap();
    assert_eq!(config.api_base_url, "https://api.billun.fr");
}

#[test]
fn environment_applies_without_flag() {
    let config = resolve_config(None, |key| match key {
        "FLEET_API_URL" => Some("http://10.0.0.2:8000".to_owned()),
        "FLEET_POLL_INTERVAL_MS" => Some("750".to_owned()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.api_base_url, "http://10.0.0.2:8000");
    assert_eq!(config.poll_interval, Duration::from_millis(750));
}

#[test]
fn invalid_base_url_flag_is_rejected() {
    assert!(resolve_config(Some("fleet.local"), |_| None).is_err());
}

// =============================================================================
// DRAFT MERGE
// =============================================================================

#[test]
fn merge_keeps_fields_not_in_patch() {
    let draft = MaterialDraft { identifiant: "TR-01".to_owned(), plaque: "AB-123-CD".to_owned(), ..Default::default() };
    let merged = merge_draft(&draft, &json!({ "plaque": "ZZ-999-ZZ", "kilometrage": 1200 })).unwrap();
    assert_eq!(merged.identifiant, "TR-01");
    assert_eq!(merged.plaque, "ZZ-999-ZZ");
    assert_eq!(merged.kilometrage, Some(1200));
}

#[test]
fn merge_uses_wire_field_names() {
    let draft = UserDraft { email: "a@b.fr".to_owned(), role: UserRole::User, ..Default::default() };
    let merged = merge_draft(&draft, &json!({ "société": "Billun", "role": "admin" })).unwrap();
    assert_eq!(merged.societe, "Billun");
    assert_eq!(merged.role, UserRole::Admin);
    assert_eq!(merged.email, "a@b.fr");
}

#[test]
fn merge_rejects_non_object_patch() {
    let draft = UserDraft::default();
    assert!(matches!(merge_draft(&draft, &json!(["nom"])), Err(CliError::InvalidPatch)));
}

// =============================================================================
// CONFIRMATION
// =============================================================================

#[test]
fn affirmative_answers() {
    for answer in ["o", "oui\n", " Y ", "yes", "OUI"] {
        assert!(is_affirmative(answer), "{answer:?}");
    }
}

#[test]
fn anything_else_declines() {
    for answer in ["", "\n", "n", "non", "ok"] {
        assert!(!is_affirmative(answer), "{answer:?}");
    }
}
