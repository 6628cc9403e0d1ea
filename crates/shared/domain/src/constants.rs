/// External name of the "no type" mapping sentinel.
pub const NONE_TYPE: &str = "none";
/// Prefix marking the symbolic form of an identifier (`:user` ≡ `user`).
pub const SYMBOL_PREFIX: char = ':';
/// Separator used by dotted path notation (`user.email`).
pub const PATH_SEPARATOR: char = '.';
/// Environment prefix for configuration overrides (`H2M__MAPPING__STRICT`).
pub const ENV_PREFIX: &str = "H2M";
/// Default location of definition documents.
pub const DEFAULT_DEFINITIONS: &str = "mappings";
