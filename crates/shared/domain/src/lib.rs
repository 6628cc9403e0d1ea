//! # Domain Types
//!
//! This crate contains pure identifier and configuration types with a single dependency (`serde`).
//! Keep it lean: no I/O, no registries, no logic beyond parsing and normalisation.

pub mod config;
pub mod constants;
pub mod ident;
pub mod path;

pub use ident::{FieldName, MappingType, ModelId};
pub use path::{FieldPath, IntoFieldPath, PathError, PathSpec, Segment, SegmentSpec};
