pub mod fixtures;

use fixtures::*;
use h2m_mapping::{MappingError, MappingType, Model, Record, Value};
use serde_json::json;

#[test]
fn test_flat_path_extraction() {
    let user: User = user_engine().apply_as("user", MappingType::None, &json!({ "name": "Alice" })).unwrap();
    assert_eq!(user.name.as_deref(), Some("Alice"));
    assert_eq!(user.email, None);
}

#[test]
fn test_nested_path_extraction() {
    let mappings = user_engine();

    let user: User = mappings.apply_as("user", None::<&str>, &json!({ "user": { "email": "a@b.com" } })).unwrap();
    assert_eq!(user.email.as_deref(), Some("a@b.com"));

    let user: User = mappings.apply_as("user", None::<&str>, &json!({ "user": {} })).unwrap();
    assert_eq!(user.email, None);
}

#[test]
fn test_transformer_is_applied() {
    let user: User = user_engine().apply_as("user", "github", &json!({ "login": "bob" })).unwrap();
    assert_eq!(user.name.as_deref(), Some("BOB"));
}

#[test]
fn test_transformer_receives_null_for_missing_values() {
    let mappings = engine();
    mappings
        .define(|d| {
            d.mapper("user", |m| {
                m.field("name", "missing").transform(|value| {
                    assert_eq!(value, Value::Null);
                    json!("fallback")
                });
                m.field("email", "email").transform(|_| Value::Null);
            });
        })
        .unwrap();

    let user: User = mappings.apply_as("user", None::<&str>, &json!({ "email": "x@y.z" })).unwrap();
    assert_eq!(user.name.as_deref(), Some("fallback"));
    assert_eq!(user.email, None);
}

#[test]
fn test_indifferent_key_access() {
    let mappings = user_engine();
    let plain = json!({ "login": "bob", "contact": { "email": "b@c.d" } });
    let symbolic = json!({ ":login": "bob", ":contact": { ":email": "b@c.d" } });

    let a: User = mappings.apply_as("user", "github", &plain).unwrap();
    let b: User = mappings.apply_as(":user", ":github", &symbolic).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_input_is_rejected() {
    let mappings = user_engine();
    for input in [json!({}), Value::Null, json!([]), json!("text")] {
        let result = mappings.apply_default("user", &input);
        assert!(matches!(result, Err(MappingError::EmptyInput { .. })), "input {input}");
    }
}

#[test]
fn test_unknown_mapper_is_rejected() {
    match user_engine().apply("user", "gitlab", &json!({ "name": "x" })) {
        Err(MappingError::UnknownMapper { model, mapping_type, .. }) => {
            assert_eq!(model.as_str(), "user");
            assert_eq!(mapping_type.as_str(), "gitlab");
        },
        other => panic!("expected UnknownMapper, got {other:?}"),
    }
}

#[test]
fn test_unresolvable_model_fails_before_mapper_lookup() {
    let result = user_engine().apply_default("ghost", &json!({ "name": "x" }));
    assert!(matches!(result, Err(MappingError::ModelResolution { .. })));
}

#[test]
fn test_empty_input_is_checked_before_model_resolution() {
    let result = user_engine().apply_default("ghost", &json!({}));
    assert!(matches!(result, Err(MappingError::EmptyInput { .. })));
}

#[test]
fn test_instances_are_read_only() {
    let mappings = engine();
    mappings.define(|d| {
        d.mapper("account", |_| {});
    })
    .unwrap();

    let account = mappings.apply_default("account", &json!({ "ignored": true })).unwrap();
    assert!(account.is_read_only());
    assert_eq!(account.model_name(), "Account");
}

#[test]
fn test_field_assignment_failure_is_wrapped() {
    let mappings = engine();
    mappings
        .define(|d| {
            d.mapper("account", |m| {
                m.field("balance", "balance");
            });
            d.mapper("person", |m| {
                m.field("age", "age");
            });
        })
        .unwrap();

    match mappings.apply_default("account", &json!({ "balance": "lots" })) {
        Err(MappingError::FieldAssignment { field, source, .. }) => {
            assert_eq!(field.as_str(), "balance");
            assert!(matches!(source, h2m_mapping::FieldError::InvalidValue { .. }));
        },
        other => panic!("expected FieldAssignment, got {other:?}"),
    }

    let result = mappings.apply_default("person", &json!({ "age": -3 }));
    assert!(matches!(
        result,
        Err(MappingError::FieldAssignment { source: h2m_mapping::FieldError::Rejected { .. }, .. })
    ));
}

#[test]
fn test_undeclared_model_field_is_reported() {
    let mappings = engine();
    mappings.define(|d| {
        d.mapper("account", |m| {
            m.field("owner", "owner");
        });
    })
    .unwrap();

    let result = mappings.apply_default("account", &json!({ "owner": "x" }));
    assert!(matches!(
        result,
        Err(MappingError::FieldAssignment { source: h2m_mapping::FieldError::UnknownField { .. }, .. })
    ));
}

#[test]
fn test_renamed_field_and_array_index() {
    let mappings = engine();
    mappings
        .define(|d| {
            d.mapper("user", |m| {
                m.field("login_count", "stats.logins").transform_named("to_integer");
                m.field("email", "emails.1");
            });
        })
        .unwrap();

    let input = json!({ "stats": { "logins": "12" }, "emails": ["a@b.c", "d@e.f"] });
    let user: User = mappings.apply_as("user", None::<&str>, &input).unwrap();
    assert_eq!(user.logins, Some(12));
    assert_eq!(user.email.as_deref(), Some("d@e.f"));
}

#[test]
fn test_apply_as_with_wrong_type() {
    let result = user_engine().apply_as::<Account>("user", None::<&str>, &json!({ "name": "x" }));
    assert!(matches!(result, Err(MappingError::ModelResolution { .. })));
}

#[test]
fn test_records_map_any_declared_model() {
    let mappings = h2m_mapping::Mappings::builder().records(true).build();
    mappings
        .define(|d| {
            d.mapper("invoice", |m| {
                m.field("total", "amount.total").transform_named("to_float");
                m.field("customer", "customer.name");
            });
        })
        .unwrap();

    let record: Record = mappings
        .apply_as("invoice", None::<&str>, &json!({ "amount": { "total": "9.5" } }))
        .unwrap();
    assert_eq!(record.get("total"), Some(&json!(9.5)));
    assert_eq!(record.get("customer"), Some(&Value::Null));
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({ "model": "invoice", "readonly": true, "fields": { "total": 9.5, "customer": null } })
    );
}
