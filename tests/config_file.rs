//! Config file parsing tests

use pixfind::config::{load_config_from, Config};
use pixfind::search::ProviderId;
use tempfile::TempDir;

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        default_provider = "freepik"
        debug = true

        [keys]
        freepik = "fp-123"
        pixabay = "px-456"
        "#,
    )
    .expect("Failed to write test config");

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.startup_provider(), ProviderId::Freepik);
    assert!(config.debug);
    assert_eq!(config.api_key(ProviderId::Freepik).as_deref(), Some("fp-123"));
    assert_eq!(config.api_key(ProviderId::Pixabay).as_deref(), Some("px-456"));
    assert_eq!(config.api_key(ProviderId::Unsplash), None);
}

#[test]
fn test_default_config_round_trips() {
    let serialized = toml::to_string_pretty(&Config::default()).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();

    assert_eq!(parsed.startup_provider(), ProviderId::Unsplash);
    // Freshly generated keys are placeholders, i.e. unset.
    for id in ProviderId::ALL {
        assert_eq!(parsed.api_key(id), None);
    }
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_provider = [not toml").expect("Failed to write test config");

    assert!(load_config_from(&path).is_err());
}
