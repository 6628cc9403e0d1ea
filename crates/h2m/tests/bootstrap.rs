use h2m::config::H2mConfig;
use h2m::mapping::{MappingError, Mappings, Record};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

const USERS: &str = r#"
[[mapper]]
model = "user"

[mapper.fields]
name = { path = "profile.name", transform = "trim" }
email = "contact.email"
"#;

#[test]
fn loads_configured_sources() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("users.toml"), USERS).unwrap();

    let mut config = H2mConfig::default();
    config.mapping.definitions = vec![dir.path().to_path_buf()];

    let mappings = h2m::bootstrap(&config, Mappings::builder().records(true)).unwrap();
    assert!(mappings.is_strict());

    let input = json!({ "profile": { "name": "  Ada " }, "contact": { "email": "ada@example.com" } });
    let record: Record = mappings.apply_as("user", None::<&str>, &input).unwrap();
    assert_eq!(record.get("name"), Some(&json!("Ada")));
    assert_eq!(record.get("email"), Some(&json!("ada@example.com")));
}

#[test]
fn lenient_configuration_drops_invalid_fields() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("users.json");
    fs::write(
        &file,
        r#"{ "mapper": [{ "model": "user", "fields": { "name": "name", "age": { "path": "age", "transform": "nope" }, "email": "contact..email" } }] }"#,
    )
    .unwrap();

    let mut config = H2mConfig::default();
    config.mapping.definitions = vec![file];
    config.mapping.strict = false;

    let mappings = h2m::bootstrap(&config, Mappings::builder().records(true)).unwrap();
    let fields = mappings.defined_fields_for("user");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].as_str(), "name");
}

#[test]
fn missing_definition_path_is_reported() {
    let dir = tempdir().unwrap();
    let mut config = H2mConfig::default();
    config.mapping.definitions = vec![dir.path().join("nowhere")];

    let err = h2m::bootstrap(&config, Mappings::builder()).unwrap_err();
    assert!(matches!(err, MappingError::Io { .. }));
    assert!(err.to_string().contains("nowhere"));
}
