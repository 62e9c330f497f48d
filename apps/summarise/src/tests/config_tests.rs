use super::{resolve_settings, timeout_from_secs, Settings};

use std::{collections::HashMap, time::Duration};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_service_without_timeout() {
    let settings = resolve_settings(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_url, "http://127.0.0.1:8000");
    assert_eq!(settings.request_timeout, None);
}

#[test]
fn file_overrides_defaults() {
    let raw = r#"
server_url = "http://summarise.internal:9000"
request_timeout_secs = 30
"#;
    let settings = resolve_settings(Some(raw), env_from(&[])).expect("settings");
    assert_eq!(settings.server_url, "http://summarise.internal:9000");
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
}

#[test]
fn environment_overrides_file() {
    let raw = r#"server_url = "http://from-file:9000""#;
    let settings = resolve_settings(
        Some(raw),
        env_from(&[
            ("SUMMARISE_SERVER_URL", "http://from-env:1"),
            ("APP__SERVER_URL", "http://from-app-env:2"),
            ("APP__REQUEST_TIMEOUT_SECS", " 5 "),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.server_url, "http://from-app-env:2");
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));
}

#[test]
fn zero_timeout_disables_it() {
    let raw = "request_timeout_secs = 10";
    let settings = resolve_settings(Some(raw), env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]))
        .expect("settings");
    assert_eq!(settings.request_timeout, None);
    assert_eq!(timeout_from_secs(0), None);
}

#[test]
fn rejects_malformed_inputs() {
    assert!(resolve_settings(Some("server_url = 8000"), env_from(&[])).is_err());
    assert!(resolve_settings(Some("servr_url = \"typo\""), env_from(&[])).is_err());
    assert!(resolve_settings(None, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")])).is_err());
}
