use h2m_domain::{FieldName, FieldPath, MappingType, ModelId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn symbolic_prefix_is_stripped_once(name in "[a-z_][a-z0-9_]{0,12}") {
        prop_assert_eq!(ModelId::from(format!(":{name}")), ModelId::from(name.clone()));
        let field = FieldName::from(format!(":{name}"));
        prop_assert_eq!(field.as_str(), name.as_str());
        let model = ModelId::from(format!("::{name}"));
        prop_assert_eq!(model.as_str(), format!(":{name}"));
    }

    #[test]
    fn mapping_type_text_survives_serialization(name in "[a-z][a-z0-9]{0,8}") {
        let ty = MappingType::from(name.clone());
        let encoded = serde_json::to_string(&ty).unwrap();
        let decoded: MappingType = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded.as_str(), ty.as_str());
        prop_assert_eq!(ty.is_none(), name == "none");
    }

    #[test]
    fn dotted_paths_render_back_to_their_source(parts in proptest::collection::vec("[a-z0-9]{1,6}", 1..6)) {
        let dotted = parts.join(".");
        let path = FieldPath::parse(&dotted).unwrap();
        prop_assert_eq!(path.len(), parts.len());
        prop_assert_eq!(path.to_string(), dotted);
    }
}
