use h2m_domain::constants::{ENV_PREFIX, NONE_TYPE, PATH_SEPARATOR, SYMBOL_PREFIX};

#[test]
fn constants_match_external_notation() {
    assert_eq!(NONE_TYPE, "none");
    assert_eq!(SYMBOL_PREFIX, ':');
    assert_eq!(PATH_SEPARATOR, '.');
    assert_eq!(ENV_PREFIX, "H2M");
}
