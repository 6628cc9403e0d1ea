#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! Procedural macros for the h2m workspace: the `#[h2m_error]` attribute every
//! crate builds its error enum with, and `#[derive(Model)]` for mapping targets.
//!
//! Doc examples are `ignore`d here because the generated code refers to crates
//! this proc-macro crate does not depend on; `tests/` exercises both macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into an error type with optional context strings.
///
/// Every variant uses named fields. A variant wrapping another error names the
/// field `source` (or marks it `#[source]`/`#[from]`) and must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// Generated alongside the enum:
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived;
/// * `<Name>Ext::context(..)` on `Result<T, Name>`, filling the context of any variant that has one;
/// * for variants made of exactly `source` and `context`, `From<Source>` and
///   `<Name>Ext` on `Result<T, Source>` so `?` and `.context(..)` work on the upstream error;
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }` variant exists;
/// * a module-level `format_context` helper rendering `" (context)"` for `#[error]` strings.
///   Declare one `h2m_error` enum per module.
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[h2m_derive::h2m_error]
/// pub enum LoadError {
///     #[error("Unreadable document{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Load failed{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, LoadError> {
///     Ok(serde_json::from_str(raw).context("users.json")?)
/// }
/// ```
#[proc_macro_attribute]
pub fn h2m_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derives `h2m_mapping::Model` for a struct with named fields.
///
/// Every field becomes a settable mapping target; incoming JSON values are
/// converted into the field's type with `serde_json::from_value`, so field
/// types must implement `DeserializeOwned` (use `Option<T>` for fields that
/// may receive `null`).
///
/// # Field Attributes
///
/// * `#[model(read_only)]` - Marks the `bool` field holding the non-persistable flag.
///   Exactly one such field is required.
/// * `#[model(skip)]` - Excludes the field from mapping; it keeps its `Default` value.
/// * `#[model(rename = "...")]` - Exposes the field under a different external name.
///
/// # Container Attributes
///
/// * `#[model(name = "...")]` - Overrides the model name reported by `Model::model_name`.
///
/// # Errors
/// Emits a compile-time error for enums, tuple structs, a missing or duplicated
/// `read_only` field, or unknown `model(...)` arguments.
///
/// # Example
///
/// ```rust,ignore
/// use h2m_mapping::Model;
///
/// #[derive(Debug, Default, Model)]
/// pub struct User {
///     pub name: Option<String>,
///     #[model(rename = "email_address")]
///     pub email: Option<String>,
///     #[model(read_only)]
///     pub readonly: bool,
/// }
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::model::expand_derive(input).into()
}
