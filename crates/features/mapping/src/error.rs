use crate::model::FieldError;
use h2m_domain::{FieldName, MappingType, ModelId, PathError};
use std::borrow::Cow;

/// Errors surfaced by registration, document loading and the mapping engine.
#[h2m_derive::h2m_error]
pub enum MappingError {
    /// The input hash is absent, empty or not a hash at all. No instance is constructed.
    #[error("Input for `{model}` must be a non-empty hash{}", format_context(.context))]
    EmptyInput { model: ModelId, context: Option<Cow<'static, str>> },

    /// No definition is registered for the `(model, type)` pair.
    #[error("Mapper not defined for {model} -> {mapping_type}{}", format_context(.context))]
    UnknownMapper {
        model: ModelId,
        mapping_type: MappingType,
        context: Option<Cow<'static, str>>,
    },

    /// The model identifier does not resolve to a constructible model.
    #[error("Cannot resolve model `{model}`{}: {message}", format_context(.context))]
    ModelResolution {
        model: ModelId,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The model rejected a (possibly transformed) value.
    #[error("Cannot assign `{model}.{field}`{}: {source}", format_context(.context))]
    FieldAssignment {
        model: ModelId,
        field: FieldName,
        source: FieldError,
        context: Option<Cow<'static, str>>,
    },

    /// A declared definition is malformed; nothing from its block was registered.
    #[error(
        "Invalid definition for {model} -> {mapping_type}{}: {}",
        format_context(.context),
        format_issues(.issues)
    )]
    InvalidDefinition {
        model: ModelId,
        mapping_type: MappingType,
        issues: Vec<DefinitionIssue>,
        context: Option<Cow<'static, str>>,
    },

    /// A definition document has an extension other than `toml` or `json`.
    #[error("Unsupported document format{}: {message}", format_context(.context))]
    UnsupportedFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("JSON document error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("TOML document error{}: {source}", format_context(.context))]
    Toml { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

/// One problem found while validating a field declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionIssue {
    #[error("field `{field}`: {error}")]
    InvalidPath { field: FieldName, error: PathError },
    #[error("field `{field}`: unknown transformer `{name}`")]
    UnknownTransform { field: FieldName, name: String },
}

impl DefinitionIssue {
    #[must_use]
    pub const fn field(&self) -> &FieldName {
        match self {
            Self::InvalidPath { field, .. } | Self::UnknownTransform { field, .. } => field,
        }
    }
}

fn format_issues(issues: &[DefinitionIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
