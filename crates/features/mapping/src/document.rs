//! Mapper definitions declared in TOML or JSON documents.
//!
//! ```toml
//! [[mapper]]
//! model = "user"
//! type = "github"
//!
//! [mapper.fields]
//! login = "login"
//! email = { path = "contact.email", transform = "downcase" }
//! ```

use crate::definition::DefinitionBuilder;
use crate::engine::Mappings;
use crate::error::{MappingError, MappingErrorExt};
use h2m_domain::{FieldName, FieldPath, IntoFieldPath, MappingType, ModelId, PathError, PathSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Serialization format of a definition document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(OsStr::to_str).and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for Format {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(MappingError::UnsupportedFormat {
                message: format!("expected `toml` or `json`, got `{other}`").into(),
                context: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionDocument {
    #[serde(rename = "mapper", alias = "mappers", default)]
    pub mappers: Vec<MapperDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperDocument {
    pub model: ModelId,
    #[serde(rename = "type", default)]
    pub mapping_type: MappingType,
    #[serde(default)]
    pub fields: IndexMap<FieldName, FieldDocument>,
}

/// A field declared either as a bare path or with a named transformer.
///
/// Paths are kept as written; they are validated with the rest of the definition
/// when the document is declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDocument {
    Path(PathSpec),
    Detailed {
        path: PathSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<String>,
    },
}

impl FieldDocument {
    #[must_use]
    pub const fn path(&self) -> &PathSpec {
        match self {
            Self::Path(path) | Self::Detailed { path, .. } => path,
        }
    }

    #[must_use]
    pub fn transform(&self) -> Option<&str> {
        match self {
            Self::Path(_) => None,
            Self::Detailed { transform, .. } => transform.as_deref(),
        }
    }
}

impl IntoFieldPath for FieldDocument {
    fn into_field_path(self) -> Result<FieldPath, PathError> {
        match self {
            Self::Path(path) | Self::Detailed { path, .. } => path.into_field_path(),
        }
    }
}

impl DefinitionDocument {
    /// # Errors
    /// Returns [`MappingError::Toml`] or [`MappingError::Json`] on malformed input.
    pub fn parse(source: &str, format: Format) -> Result<Self, MappingError> {
        match format {
            Format::Toml => Ok(toml::from_str(source)?),
            Format::Json => Ok(serde_json::from_str(source)?),
        }
    }

    fn declare(self, builder: &mut DefinitionBuilder<'_>) {
        for mapper in self.mappers {
            builder.typed_mapper(mapper.model, mapper.mapping_type, |m| {
                for (name, field) in mapper.fields {
                    let transform = field.transform().map(ToOwned::to_owned);
                    let handle = m.field(name, field);
                    if let Some(transform) = transform {
                        handle.transform_named(&transform);
                    }
                }
            });
        }
    }
}

impl Mappings {
    /// Registers the mappers declared in a document.
    ///
    /// Returns the number of registered mappers.
    ///
    /// # Errors
    /// Parse failures, plus the errors of [`Mappings::define`].
    pub fn load_document(&self, source: &str, format: Format) -> Result<usize, MappingError> {
        let document = DefinitionDocument::parse(source, format)?;

        for mapper in &document.mappers {
            if self.registry().lookup(&mapper.model, &mapper.mapping_type).is_some() {
                warn!(model = %mapper.model, mapping_type = %mapper.mapping_type, "Document redefines mapper");
            }
        }

        self.define(|builder| document.declare(builder))
    }

    /// Loads a document file, or every `*.toml` / `*.json` file of a directory in
    /// file name order.
    ///
    /// # Errors
    /// IO failures, unsupported extensions for explicit files, and the errors of
    /// [`Mappings::load_document`], each with the offending path as context.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<usize, MappingError> {
        let path = path.as_ref();

        if path.is_dir() {
            let mut total = 0;
            for file in document_files(path)? {
                total += self.load_file(&file)?;
            }
            info!(path = %path.display(), mappers = total, "Definition directory loaded");
            return Ok(total);
        }

        self.load_file(path)
    }

    fn load_file(&self, path: &Path) -> Result<usize, MappingError> {
        let context = || format!("Loading {}", path.display());

        let format = Format::from_path(path)
            .ok_or_else(|| MappingError::UnsupportedFormat {
                message: "file extension must be `toml` or `json`".into(),
                context: None,
            })
            .context(context())?;
        let source = fs::read_to_string(path).context(context())?;
        let count = self.load_document(&source, format).context(context())?;

        info!(path = %path.display(), mappers = count, "Definition document loaded");
        Ok(count)
    }
}

fn document_files(dir: &Path) -> Result<Vec<PathBuf>, MappingError> {
    let context = || format!("Reading {}", dir.display());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).context(context())? {
        let path = entry.context(context())?.path();
        if path.is_file() && Format::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
