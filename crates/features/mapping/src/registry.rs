use crate::mapper::MapperDefinition;
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use h2m_domain::{FieldName, MappingType, ModelId};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Mapper definitions of one model, keyed by mapping type in registration order.
pub type TypedMappers = IndexMap<MappingType, Arc<MapperDefinition>, FxBuildHasher>;

/// A thread-safe store of mapper definitions keyed by `(model, type)`.
///
/// Clones share the same underlying storage. The registry only grows:
/// registering an existing key replaces its definition.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    models: Arc<RwLock<FxHashMap<ModelId, TypedMappers>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `mapper` under `(model, mapping_type)`, returning the definition it replaced.
    pub fn register(
        &self,
        model: ModelId,
        mapping_type: MappingType,
        mapper: MapperDefinition,
    ) -> Option<Arc<MapperDefinition>> {
        let fields = mapper.len();
        let previous = self
            .models
            .write()
            .entry(model.clone())
            .or_default()
            .insert(mapping_type.clone(), Arc::new(mapper));

        if previous.is_some() {
            debug!(%model, %mapping_type, fields, overwritten = true, "Mapper registered");
        } else {
            debug!(%model, %mapping_type, fields, "Mapper registered");
        }
        previous
    }

    #[must_use]
    pub fn lookup(&self, model: &ModelId, mapping_type: &MappingType) -> Option<Arc<MapperDefinition>> {
        self.models.read().get(model)?.get(mapping_type).cloned()
    }

    /// Every definition registered for `model`, or `None` when the model is unknown.
    #[must_use]
    pub fn defined_mappings_for(&self, model: &ModelId) -> Option<TypedMappers> {
        self.models.read().get(model).cloned()
    }

    /// Field names declared across all types of `model`, deduplicated in first-seen order.
    #[must_use]
    pub fn defined_fields_for(&self, model: &ModelId) -> Vec<FieldName> {
        let guard = self.models.read();
        let Some(mappers) = guard.get(model) else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        mappers
            .values()
            .flat_map(|mapper| mapper.fields())
            .filter(|field| seen.insert(*field))
            .cloned()
            .collect()
    }

    /// Registered model identifiers, sorted.
    #[must_use]
    pub fn models(&self) -> Vec<ModelId> {
        let mut models: Vec<ModelId> = self.models.read().keys().cloned().collect();
        models.sort_unstable();
        models
    }

    /// Number of registered `(model, type)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.read().values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
