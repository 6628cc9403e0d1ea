//! The capability a mapping target must provide, and the catalog resolving
//! model identifiers to factories.

use fxhash::FxHashMap;
use h2m_domain::ModelId;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Errors reported by a model when a field cannot be assigned.
#[h2m_derive::h2m_error]
pub enum FieldError {
    #[error("Unknown field `{field}`{}", format_context(.context))]
    UnknownField { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The value does not convert into the field's type.
    #[error("Invalid value for `{field}`{}: {source}", format_context(.context))]
    InvalidValue {
        field: Cow<'static, str>,
        source: serde_json::Error,
        context: Option<Cow<'static, str>>,
    },

    /// The model refused the value for a domain reason.
    #[error("Value for `{field}` rejected{}: {message}", format_context(.context))]
    Rejected {
        field: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

impl FieldError {
    #[must_use]
    pub fn unknown(field: &str) -> Self {
        Self::UnknownField { field: Cow::Owned(field.to_owned()), context: None }
    }

    #[must_use]
    pub fn rejected(field: &str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { field: Cow::Owned(field.to_owned()), message: message.into(), context: None }
    }
}

/// A domain object the engine can populate.
///
/// Implement it with `#[derive(Model)]` or by hand for models with custom setters.
pub trait Model: Any + Send {
    fn model_name(&self) -> Cow<'static, str>;

    /// Flags the instance as not to be persisted downstream. Field assignment stays possible.
    fn mark_read_only(&mut self);

    fn is_read_only(&self) -> bool;

    /// Names accepted by [`Model::set_field`].
    fn field_names(&self) -> Vec<Cow<'static, str>>;

    /// # Errors
    /// Returns a [`FieldError`] when the field is unknown or rejects the value.
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.model_name())
            .field("read_only", &self.is_read_only())
            .finish_non_exhaustive()
    }
}

impl dyn Model {
    /// Borrows the concrete model behind the trait object.
    #[must_use]
    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Converts a JSON value into a field's type. Used by `#[derive(Model)]`.
///
/// # Errors
/// Returns [`FieldError::InvalidValue`] when the value does not deserialize into `T`.
pub fn convert<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, FieldError> {
    serde_json::from_value(value).map_err(|source| FieldError::InvalidValue {
        field: Cow::Owned(field.to_owned()),
        source,
        context: None,
    })
}

type Factory = Arc<dyn Fn() -> Box<dyn Model> + Send + Sync>;

/// Explicit registry of model factories keyed by model identifier.
#[derive(Clone, Default)]
pub struct ModelCatalog {
    factories: FxHashMap<ModelId, Factory>,
    records: bool,
}

impl fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<&str> = self.factories.keys().map(ModelId::as_str).collect();
        models.sort_unstable();
        f.debug_struct("ModelCatalog").field("models", &models).field("records", &self.records).finish()
    }
}

impl ModelCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` as the model constructed for `id`.
    pub fn register<T: Model + Default>(&mut self, id: impl Into<ModelId>) -> &mut Self {
        self.register_with(id, || Box::new(T::default()))
    }

    pub fn register_with<F>(&mut self, id: impl Into<ModelId>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
        self
    }

    /// Resolves unregistered identifiers to a [`Record`] instead of failing.
    pub const fn with_records(&mut self, enabled: bool) -> &mut Self {
        self.records = enabled;
        self
    }

    /// Constructs a fresh instance for `id`.
    #[must_use]
    pub fn resolve(&self, id: &ModelId) -> Option<Box<dyn Model>> {
        match self.factories.get(id) {
            Some(factory) => Some(factory()),
            None if self.records => Some(Box::new(Record::new(id.clone()))),
            None => None,
        }
    }
}

/// Schemaless model: an ordered map of whatever fields a mapper assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    model: ModelId,
    readonly: bool,
    fields: IndexMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(model: impl Into<ModelId>) -> Self {
        Self { model: model.into(), readonly: false, fields: IndexMap::new() }
    }

    #[must_use]
    pub const fn model(&self) -> &ModelId {
        &self.model
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub const fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl Model for Record {
    fn model_name(&self) -> Cow<'static, str> {
        Cow::Owned(self.model.to_string())
    }

    fn mark_read_only(&mut self) {
        self.readonly = true;
    }

    fn is_read_only(&self) -> bool {
        self.readonly
    }

    fn field_names(&self) -> Vec<Cow<'static, str>> {
        self.fields.keys().map(|key| Cow::Owned(key.clone())).collect()
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        self.fields.insert(field.to_owned(), value);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
