pub mod fixtures;

use fixtures::*;
use h2m_mapping::{FieldName, MappingError, MappingType, Mappings, ModelId, TransformCatalog};
use serde_json::json;

fn names(fields: &[FieldName]) -> Vec<&str> {
    fields.iter().map(FieldName::as_str).collect()
}

#[test]
fn test_registration_overwrite() {
    let mappings = engine();
    mappings.define(|d| {
        d.mapper("user", |m| {
            m.field("name", "first");
        });
    })
    .unwrap();
    mappings.define(|d| {
        d.mapper("user", |m| {
            m.field("name", "second");
        });
    })
    .unwrap();

    let user: User = mappings
        .apply_as("user", MappingType::None, &json!({ "first": "a", "second": "b" }))
        .unwrap();
    assert_eq!(user.name.as_deref(), Some("b"));
    assert_eq!(mappings.registry().len(), 1);
}

#[test]
fn test_default_type_isolation() {
    let mappings = engine();
    mappings.define(|d| {
        d.mapper("user", |m| {
            m.field("name", "name");
        });
        d.typed_mapper("account", "bank", |m| {
            m.field("number", "iban");
        });
    })
    .unwrap();

    assert!(mappings.registry().lookup(&"user".into(), &"github".into()).is_none());
    assert!(mappings.registry().lookup(&"account".into(), &MappingType::None).is_none());
    assert!(matches!(
        mappings.apply_default("account", &json!({ "iban": "x" })),
        Err(MappingError::UnknownMapper { .. })
    ));
}

#[test]
fn test_field_listing_is_deduplicated() {
    let mappings = user_engine();
    let fields = mappings.defined_fields_for("user");
    assert_eq!(names(&fields), ["name", "email", "login_count"]);
    assert!(mappings.defined_fields_for("nobody").is_empty());
}

#[test]
fn test_defined_mappings_for_lists_types_in_registration_order() {
    let mappings = user_engine();
    let typed = mappings.defined_mappings_for(":user").unwrap();
    let types: Vec<&str> = typed.keys().map(MappingType::as_str).collect();
    assert_eq!(types, ["none", "github"]);
    assert_eq!(typed[&MappingType::from("github")].len(), 3);
    assert!(mappings.defined_mappings_for("account").is_none());
}

#[test]
fn test_invalid_block_registers_nothing() {
    let mappings = engine();
    let result = mappings.define(|d| {
        d.mapper("user", |m| {
            m.field("name", "name");
        });
        d.mapper("account", |m| {
            m.field("number", "").transform_named("upcase");
        });
    });

    assert!(matches!(result, Err(MappingError::InvalidDefinition { .. })));
    assert!(mappings.registry().is_empty());
}

#[test]
fn test_lenient_engine_keeps_valid_fields() {
    let mappings = Mappings::builder().model::<User>("user").strict(false).build();
    let count = mappings
        .define(|d| {
            d.mapper("user", |m| {
                m.field("name", "name");
                m.field("email", "email").transform_named("no_such_transform");
            });
        })
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(names(&mappings.defined_fields_for("user")), ["name"]);
}

#[test]
fn test_custom_transforms_are_resolvable_by_name() {
    let mappings = Mappings::builder()
        .model::<User>("user")
        .transforms(TransformCatalog::empty())
        .transform("obfuscate", |_| json!("***"))
        .build();
    mappings.define(|d| {
        d.mapper("user", |m| {
            m.field("email", "email").transform_named("obfuscate");
        });
    })
    .unwrap();

    let user: User = mappings.apply_as("user", None::<&str>, &json!({ "email": "a@b.c" })).unwrap();
    assert_eq!(user.email.as_deref(), Some("***"));
    assert!(mappings.transforms().get("upcase").is_none());
}

#[test]
fn test_engines_can_share_a_registry() {
    let shared = user_engine();
    let other = Mappings::builder().registry(shared.registry().clone()).records(true).build();
    assert_eq!(other.registry().models(), vec![ModelId::from("user")]);
    assert_eq!(other.defined_fields_for("user").len(), 3);
}
