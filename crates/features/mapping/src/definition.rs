//! Builder API for declaring mapper definitions.
//!
//! A definition block declares any number of mappers. Each field declaration is
//! validated as it is recorded; [`DefinitionBuilder::finish`] then decides whether
//! the block can be registered.

use crate::error::{DefinitionIssue, MappingError};
use crate::mapper::MapperDefinition;
use crate::transform::{TransformCatalog, Transformer};
use h2m_domain::{FieldName, FieldPath, IntoFieldPath, MappingType, ModelId, PathError};
use tracing::warn;

/// A validated mapper ready for registration.
#[derive(Debug, Clone)]
pub struct Definition {
    pub model: ModelId,
    pub mapping_type: MappingType,
    pub mapper: MapperDefinition,
}

#[derive(Debug)]
enum PendingTransform {
    Resolved(Transformer),
    Unknown(String),
}

#[derive(Debug)]
struct PendingField {
    name: FieldName,
    path: Result<FieldPath, PathError>,
    transform: Option<PendingTransform>,
}

impl PendingField {
    fn into_parts(self) -> Result<(FieldName, FieldPath, Option<Transformer>), DefinitionIssue> {
        let path = self
            .path
            .map_err(|error| DefinitionIssue::InvalidPath { field: self.name.clone(), error })?;
        let transformer = match self.transform {
            None => None,
            Some(PendingTransform::Resolved(transformer)) => Some(transformer),
            Some(PendingTransform::Unknown(name)) => {
                return Err(DefinitionIssue::UnknownTransform { field: self.name, name });
            },
        };
        Ok((self.name, path, transformer))
    }
}

#[derive(Debug)]
struct PendingMapper {
    model: ModelId,
    mapping_type: MappingType,
    fields: Vec<PendingField>,
}

/// Collects the mappers declared in one definition block.
#[derive(Debug)]
pub struct DefinitionBuilder<'a> {
    transforms: &'a TransformCatalog,
    mappers: Vec<PendingMapper>,
}

impl<'a> DefinitionBuilder<'a> {
    #[must_use]
    pub const fn new(transforms: &'a TransformCatalog) -> Self {
        Self { transforms, mappers: Vec::new() }
    }

    /// Declares the default (untyped) mapper of `model`.
    pub fn mapper<F>(&mut self, model: impl Into<ModelId>, body: F) -> &mut Self
    where
        F: FnOnce(&mut MapperBuilder<'_>),
    {
        self.typed_mapper(model, MappingType::None, body)
    }

    /// Declares the mapper of `model` for `mapping_type`.
    pub fn typed_mapper<F>(
        &mut self,
        model: impl Into<ModelId>,
        mapping_type: impl Into<MappingType>,
        body: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut MapperBuilder<'_>),
    {
        let mut builder = MapperBuilder { transforms: self.transforms, fields: Vec::new() };
        body(&mut builder);
        self.mappers.push(PendingMapper {
            model: model.into(),
            mapping_type: mapping_type.into(),
            fields: builder.fields,
        });
        self
    }

    /// Validates every declared mapper.
    ///
    /// In strict mode the first mapper with an issue fails the whole block. Otherwise
    /// offending fields are dropped with a warning and the remaining fields are kept.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidDefinition`] in strict mode when a declaration is invalid.
    pub fn finish(self, strict: bool) -> Result<Vec<Definition>, MappingError> {
        let mut definitions = Vec::with_capacity(self.mappers.len());

        for pending in self.mappers {
            let mut mapper = MapperDefinition::new();
            let mut issues = Vec::new();

            for field in pending.fields {
                match field.into_parts() {
                    Ok((name, path, transformer)) => mapper.insert(name, path, transformer),
                    Err(issue) => issues.push(issue),
                }
            }

            if !issues.is_empty() {
                if strict {
                    return Err(MappingError::InvalidDefinition {
                        model: pending.model,
                        mapping_type: pending.mapping_type,
                        issues,
                        context: None,
                    });
                }
                for issue in &issues {
                    warn!(model = %pending.model, mapping_type = %pending.mapping_type, %issue, "Field dropped");
                }
            }

            definitions.push(Definition {
                model: pending.model,
                mapping_type: pending.mapping_type,
                mapper,
            });
        }

        Ok(definitions)
    }
}

/// Body of one mapper declaration.
#[derive(Debug)]
pub struct MapperBuilder<'a> {
    transforms: &'a TransformCatalog,
    fields: Vec<PendingField>,
}

impl MapperBuilder<'_> {
    /// Declares `name` as read from `path`.
    ///
    /// Declaring the same name twice keeps its first position and discards the
    /// earlier path and transformer.
    pub fn field(&mut self, name: impl Into<FieldName>, path: impl IntoFieldPath) -> FieldHandle<'_> {
        let field = PendingField { name: name.into(), path: path.into_field_path(), transform: None };

        let index = match self.fields.iter().position(|existing| existing.name == field.name) {
            Some(index) => {
                self.fields[index] = field;
                index
            },
            None => {
                self.fields.push(field);
                self.fields.len() - 1
            },
        };

        FieldHandle { field: &mut self.fields[index], transforms: self.transforms }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Attaches a transformer to the field just declared.
#[derive(Debug)]
pub struct FieldHandle<'m> {
    field: &'m mut PendingField,
    transforms: &'m TransformCatalog,
}

impl FieldHandle<'_> {
    pub fn transform<F>(self, func: F)
    where
        F: Fn(serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.transformer(Transformer::anonymous(func));
    }

    pub fn transformer(self, transformer: Transformer) {
        self.field.transform = Some(PendingTransform::Resolved(transformer));
    }

    /// Uses the catalog transformer registered under `name`.
    pub fn transform_named(self, name: &str) {
        let pending = self.transforms.get(name).map_or_else(
            || PendingTransform::Unknown(name.to_owned()),
            |transformer| PendingTransform::Resolved(transformer.clone()),
        );
        self.field.transform = Some(pending);
    }
}
