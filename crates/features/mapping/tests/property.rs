use h2m_mapping::value::{dig, extract, normalize};
use h2m_mapping::{FieldPath, MappingType, Mappings, Record, Value};
use proptest::prelude::*;
use serde_json::{Map, json};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map(":?[a-z]{1,4}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_path() -> impl Strategy<Value = FieldPath> {
    proptest::collection::vec("[a-z0-9]{1,4}", 1..5).prop_map(|parts| FieldPath::new(parts).unwrap())
}

proptest! {
    #[test]
    fn extraction_never_panics(input in arb_json(), path in arb_path()) {
        let value = extract(&input, &path);
        prop_assert_eq!(dig(&input, &path).cloned().unwrap_or(Value::Null), value);
    }

    #[test]
    fn normalization_is_idempotent(input in arb_json()) {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn symbolic_and_plain_keys_map_identically(key in "[a-z]{1,6}", text in "[a-z]{0,6}") {
        let mappings = Mappings::builder().records(true).build();
        mappings.define(|d| {
            d.mapper("thing", |m| {
                m.field("value", key.clone());
            });
        }).unwrap();

        let plain = json!({ key.clone(): text.clone() });
        let symbolic = json!({ format!(":{key}"): text });
        let a: Record = mappings.apply_as("thing", MappingType::None, &plain).unwrap();
        let b: Record = mappings.apply_as("thing", MappingType::None, &symbolic).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn field_listing_has_no_duplicates(types in proptest::collection::vec(proptest::collection::vec("[a-c]{1,2}", 0..5), 1..5)) {
        let mappings = Mappings::builder().records(true).build();
        mappings.define(|d| {
            for (i, fields) in types.iter().enumerate() {
                d.typed_mapper("thing", format!("t{i}"), |m| {
                    for field in fields {
                        m.field(field.clone(), field.clone());
                    }
                });
            }
        }).unwrap();

        let listed = mappings.defined_fields_for("thing");
        let mut unique = listed.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(listed.len(), unique.len());

        let expected: std::collections::BTreeSet<&String> = types.iter().flatten().collect();
        prop_assert_eq!(listed.len(), expected.len());
    }
}
