//! Facade crate for the hash-to-model mapper.
//! Re-exports the domain, kernel and mapping crates and wires them together from configuration.
//! Keep this crate thin: it should compose other crates, not implement mapping logic.
//!
//! ## Usage
//! ```rust,no_run
//! use h2m::config::H2mConfig;
//! use h2m::mapping::Mappings;
//!
//! let config: H2mConfig = h2m::kernel::config::load_config(Some("h2m.toml")).unwrap();
//! let mappings = h2m::bootstrap(&config, Mappings::builder().records(true)).unwrap();
//! ```

pub use h2m_domain as domain;
pub use h2m_domain::config;
pub use h2m_kernel as kernel;
pub use h2m_logger as logger;
pub use h2m_mapping as mapping;

use h2m_domain::config::H2mConfig;
use h2m_mapping::{MappingError, Mappings, MappingsBuilder};
use std::borrow::Cow;
use std::io;
use tracing::info;

/// Builds the engine from `builder` and loads every configured definition source.
///
/// The configured `strict` flag overrides the one set on `builder`.
///
/// # Errors
/// Returns [`MappingError::Io`] for a definition path that does not exist, and any error of
/// [`Mappings::load_path`].
pub fn bootstrap(config: &H2mConfig, builder: MappingsBuilder) -> Result<Mappings, MappingError> {
    let mappings = builder.strict(config.mapping.strict).build();

    for path in &config.mapping.definitions {
        if !path.exists() {
            return Err(MappingError::Io {
                source: io::Error::new(io::ErrorKind::NotFound, "definition path does not exist"),
                context: Some(Cow::Owned(path.display().to_string())),
            });
        }
        mappings.load_path(path)?;
    }

    info!(
        sources = config.mapping.definitions.len(),
        mappers = mappings.registry().len(),
        strict = mappings.is_strict(),
        "Mappings ready"
    );
    Ok(mappings)
}
