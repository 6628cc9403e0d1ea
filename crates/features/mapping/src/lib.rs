//! # Hash-to-model mapping
//!
//! Declares reusable mappers (field name to source path, with an optional transformer)
//! keyed by `(model, type)`, and applies them to nested JSON input to populate
//! read-only domain model instances.
//!
//! ```rust
//! use h2m_mapping::{Mappings, Model};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Model)]
//! struct User {
//!     name: Option<String>,
//!     email: Option<String>,
//!     #[model(read_only)]
//!     readonly: bool,
//! }
//!
//! let mappings = Mappings::builder().model::<User>("user").build();
//! mappings
//!     .define(|d| {
//!         d.mapper("user", |m| {
//!             m.field("name", "name").transform_named("upcase");
//!         });
//!         d.typed_mapper("user", "github", |m| {
//!             m.field("name", "login");
//!             m.field("email", ["contact", "email"]);
//!         });
//!     })
//!     .unwrap();
//!
//! let input = json!({ "login": "bob", ":contact": { "email": "bob@example.com" } });
//! let user: User = mappings.apply_as("user", "github", &input).unwrap();
//! assert_eq!(user.name.as_deref(), Some("bob"));
//! assert_eq!(user.email.as_deref(), Some("bob@example.com"));
//! assert!(user.readonly);
//! ```

#[cfg(test)]
extern crate self as h2m_mapping;

pub mod definition;
pub mod document;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod model;
pub mod registry;
pub mod transform;
pub mod value;

pub use crate::definition::{Definition, DefinitionBuilder, FieldHandle, MapperBuilder};
pub use crate::document::{DefinitionDocument, FieldDocument, Format, MapperDocument};
pub use crate::engine::{Mappings, MappingsBuilder};
pub use crate::error::{DefinitionIssue, MappingError, MappingErrorExt};
pub use crate::mapper::MapperDefinition;
pub use crate::model::{FieldError, FieldErrorExt, Model, ModelCatalog, Record};
pub use crate::registry::{Registry, TypedMappers};
pub use crate::transform::{TransformCatalog, Transformer};
pub use h2m_derive::Model;
pub use h2m_domain::{FieldName, FieldPath, IntoFieldPath, MappingType, ModelId, PathError, PathSpec, Segment, SegmentSpec};
pub use serde_json::Value;
