use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_nothing_is_set() {
    let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.poll_interval, Duration::from_secs(2));
    assert_eq!(cfg.apk_link, DEFAULT_APK_LINK);
}

#[test]
fn from_lookup_parses_overrides_and_trims_trailing_slash() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("FLEET_API_URL", "https://api.billun.test/"),
        ("FLEET_POLL_INTERVAL_MS", "500"),
        ("FLEET_APK_LINK", "https://cdn.billun.test/app.apk"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base_url, "https://api.billun.test");
    assert_eq!(cfg.poll_interval, Duration::from_millis(500));
    assert_eq!(cfg.apk_link, "https://cdn.billun.test/app.apk");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ClientConfig::from_lookup(lookup(&[("FLEET_API_URL", "  "), ("FLEET_POLL_INTERVAL_MS", "")])).unwrap();
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.poll_interval, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
}

#[test]
fn non_http_base_url_errors() {
    let err = ClientConfig::from_lookup(lookup(&[("FLEET_API_URL", "ftp://nope")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidUrl { var: "FLEET_API_URL", value: "ftp://nope".to_owned() });
}

#[test]
fn zero_or_garbage_interval_errors() {
    for raw in ["0", "-5", "soon"] {
        let err = ClientConfig::from_lookup(lookup(&[("FLEET_POLL_INTERVAL_MS", raw)])).unwrap_err();
        assert!(err.to_string().contains("FLEET_POLL_INTERVAL_MS"), "{raw}: {err}");
    }
}
