use crate::transform::Transformer;
use fxhash::FxHashMap;
use h2m_domain::{FieldName, FieldPath};
use indexmap::IndexMap;

/// The field map of one `(model, type)` pair.
///
/// Attributes keep declaration order. Every transformer key is also an attribute key.
#[derive(Debug, Clone, Default)]
pub struct MapperDefinition {
    attributes: IndexMap<FieldName, FieldPath>,
    transformers: FxHashMap<FieldName, Transformer>,
}

impl MapperDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `field`. Re-declaring keeps the original position, replaces the path and
    /// clears any transformer attached earlier.
    pub fn insert(&mut self, field: FieldName, path: FieldPath, transformer: Option<Transformer>) {
        self.transformers.remove(&field);
        if let Some(transformer) = transformer {
            self.transformers.insert(field.clone(), transformer);
        }
        self.attributes.insert(field, path);
    }

    #[must_use]
    pub const fn attributes(&self) -> &IndexMap<FieldName, FieldPath> {
        &self.attributes
    }

    #[must_use]
    pub fn transformer(&self, field: &FieldName) -> Option<&Transformer> {
        self.transformers.get(field)
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldName> {
        self.attributes.keys()
    }

    /// `(field, path, transformer)` triples in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldPath, Option<&Transformer>)> {
        self.attributes
            .iter()
            .map(|(field, path)| (field, path, self.transformers.get(field)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
