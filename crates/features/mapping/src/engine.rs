use crate::definition::{Definition, DefinitionBuilder};
use crate::error::MappingError;
use crate::model::{Model, ModelCatalog};
use crate::registry::{Registry, TypedMappers};
use crate::transform::TransformCatalog;
use crate::value;
use h2m_domain::{FieldName, MappingType, ModelId};
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;
use tracing::{debug, trace};

/// The mapping engine: a registry of mapper definitions plus the catalogs used to
/// build and apply them.
///
/// Cloning is cheap; clones share the registry.
///
/// # Examples
/// ```rust
/// use h2m_mapping::{Mappings, Model, Record};
/// use serde_json::json;
///
/// let mappings = Mappings::builder().records(true).build();
/// mappings
///     .define(|d| {
///         d.mapper("user", |m| {
///             m.field("email", "contact.email").transform_named("downcase");
///         });
///     })
///     .unwrap();
///
/// let user = mappings.apply_as::<Record>("user", None::<&str>, &json!({ "contact": { "email": "A@B.COM" } })).unwrap();
/// assert_eq!(user.get("email"), Some(&json!("a@b.com")));
/// assert!(user.is_read_only());
/// ```
#[derive(Debug, Clone)]
pub struct Mappings {
    registry: Registry,
    models: Arc<ModelCatalog>,
    transforms: Arc<TransformCatalog>,
    strict: bool,
}

impl Default for Mappings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Mappings {
    #[must_use]
    pub fn builder() -> MappingsBuilder {
        MappingsBuilder::default()
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    #[must_use]
    pub fn transforms(&self) -> &TransformCatalog {
        &self.transforms
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Runs a definition block and registers every mapper it declares.
    ///
    /// Returns the number of registered mappers.
    ///
    /// # Errors
    /// In strict mode, returns [`MappingError::InvalidDefinition`] and registers nothing
    /// when any declaration in the block is invalid.
    pub fn define<F>(&self, body: F) -> Result<usize, MappingError>
    where
        F: FnOnce(&mut DefinitionBuilder<'_>),
    {
        let mut builder = DefinitionBuilder::new(&self.transforms);
        body(&mut builder);
        let definitions = builder.finish(self.strict)?;
        Ok(self.register_all(definitions))
    }

    pub(crate) fn register_all(&self, definitions: Vec<Definition>) -> usize {
        let count = definitions.len();
        for Definition { model, mapping_type, mapper } in definitions {
            self.registry.register(model, mapping_type, mapper);
        }
        count
    }

    /// Builds a read-only instance of `model` from `input` using the mapper
    /// registered for `mapping_type`.
    ///
    /// # Errors
    /// - [`MappingError::EmptyInput`] when `input` is `null`, an empty object or not an object.
    /// - [`MappingError::ModelResolution`] when no model is registered for `model`.
    /// - [`MappingError::UnknownMapper`] when no mapper exists for `(model, mapping_type)`.
    /// - [`MappingError::FieldAssignment`] when the model rejects a value.
    pub fn apply(
        &self,
        model: impl Into<ModelId>,
        mapping_type: impl Into<MappingType>,
        input: &Value,
    ) -> Result<Box<dyn Model>, MappingError> {
        let model = model.into();
        let mapping_type = mapping_type.into();

        if !value::is_present(input) {
            return Err(MappingError::EmptyInput { model, context: None });
        }

        let mut instance = self.models.resolve(&model).ok_or_else(|| MappingError::ModelResolution {
            model: model.clone(),
            message: "no model registered under this identifier".into(),
            context: None,
        })?;
        instance.mark_read_only();

        let mapper = self.registry.lookup(&model, &mapping_type).ok_or_else(|| {
            MappingError::UnknownMapper { model: model.clone(), mapping_type: mapping_type.clone(), context: None }
        })?;

        let input = value::normalize(input);
        for (field, path, transformer) in mapper.iter() {
            let mut extracted = value::extract(&input, path);
            if let Some(transformer) = transformer {
                extracted = transformer.call(extracted);
            }
            trace!(%model, %field, %path, "Assigning field");

            instance.set_field(field.as_str(), extracted).map_err(|source| {
                MappingError::FieldAssignment {
                    model: model.clone(),
                    field: field.clone(),
                    source,
                    context: None,
                }
            })?;
        }

        debug!(%model, %mapping_type, fields = mapper.len(), "Mapping applied");
        Ok(instance)
    }

    /// [`Mappings::apply`] with the default (untyped) mapper.
    ///
    /// # Errors
    /// Same as [`Mappings::apply`].
    pub fn apply_default(&self, model: impl Into<ModelId>, input: &Value) -> Result<Box<dyn Model>, MappingError> {
        self.apply(model, MappingType::None, input)
    }

    /// [`Mappings::apply`] returning the concrete model type.
    ///
    /// # Errors
    /// Same as [`Mappings::apply`], plus [`MappingError::ModelResolution`] when the model
    /// registered for the identifier is not a `T`.
    pub fn apply_as<T: Model>(
        &self,
        model: impl Into<ModelId>,
        mapping_type: impl Into<MappingType>,
        input: &Value,
    ) -> Result<T, MappingError> {
        let model = model.into();
        let instance = self.apply(model.clone(), mapping_type, input)?;
        instance.into_any().downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            MappingError::ModelResolution {
                model,
                message: format!("registered model is not a `{}`", type_name::<T>()).into(),
                context: None,
            }
        })
    }

    /// Every mapper registered for `model`, keyed by type.
    #[must_use]
    pub fn defined_mappings_for(&self, model: impl Into<ModelId>) -> Option<TypedMappers> {
        self.registry.defined_mappings_for(&model.into())
    }

    /// Field names declared for `model` across all of its types, without duplicates.
    #[must_use]
    pub fn defined_fields_for(&self, model: impl Into<ModelId>) -> Vec<FieldName> {
        self.registry.defined_fields_for(&model.into())
    }
}

/// Assembles a [`Mappings`] engine.
#[derive(Debug)]
pub struct MappingsBuilder {
    registry: Registry,
    models: ModelCatalog,
    transforms: TransformCatalog,
    strict: bool,
}

impl Default for MappingsBuilder {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            models: ModelCatalog::new(),
            transforms: TransformCatalog::with_builtins(),
            strict: true,
        }
    }
}

impl MappingsBuilder {
    /// Shares an existing registry instead of starting from an empty one.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn model<T: Model + Default>(mut self, id: impl Into<ModelId>) -> Self {
        self.models.register::<T>(id);
        self
    }

    #[must_use]
    pub fn model_with<F>(mut self, id: impl Into<ModelId>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        self.models.register_with(id, factory);
        self
    }

    /// Maps identifiers without a registered model into [`crate::Record`]s.
    #[must_use]
    pub fn records(mut self, enabled: bool) -> Self {
        self.models.with_records(enabled);
        self
    }

    #[must_use]
    pub fn transform<F>(mut self, name: &'static str, func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transforms.register(name, func);
        self
    }

    /// Replaces the transformer catalog, built-ins included.
    #[must_use]
    pub fn transforms(mut self, transforms: TransformCatalog) -> Self {
        self.transforms = transforms;
        self
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn build(self) -> Mappings {
        Mappings {
            registry: self.registry,
            models: Arc::new(self.models),
            transforms: Arc::new(self.transforms),
            strict: self.strict,
        }
    }
}
