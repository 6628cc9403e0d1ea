use h2m_kernel::config::{ConfigError, load_config};
use h2m_kernel::domain::config::H2mConfig;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
#[serial]
fn loads_sections_from_an_explicit_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("h2m.toml");
    fs::write(
        &file,
        r#"
[logging]
level = "debug"
json = true

[mapping]
definitions = ["defs/users", "defs/accounts.json"]
strict = false
"#,
    )
    .unwrap();

    let cfg: H2mConfig = load_config(Some(&file)).unwrap();
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console);
    assert!(!cfg.mapping.strict);
    assert_eq!(
        cfg.mapping.definitions,
        vec![PathBuf::from("defs/users"), PathBuf::from("defs/accounts.json")]
    );
}

#[test]
#[serial]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = load_config::<H2mConfig>(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
#[serial]
fn defaults_apply_without_a_file() {
    let cfg: H2mConfig = load_config(None::<&Path>).unwrap();
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.mapping.strict);
    assert_eq!(cfg.mapping.definitions, vec![PathBuf::from("mappings")]);
}

#[test]
#[serial]
fn malformed_values_are_reported_with_context() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("h2m.toml");
    fs::write(&file, "[mapping]\nstrict = \"sometimes\"\n").unwrap();

    let err = load_config::<H2mConfig>(Some(&file)).unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"));
}
