use crate::constants::DEFAULT_DEFINITIONS;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by applications embedding the mapper.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct H2mConfigInner {
    pub logging: LoggingConfig,
    pub mapping: MappingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct H2mConfig {
    #[serde(flatten, default)]
    inner: Arc<H2mConfigInner>,
}

impl Deref for H2mConfig {
    type Target = H2mConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for H2mConfig {
    fn deref_mut(&mut self) -> &mut H2mConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; file logging is off when absent.
    pub path: Option<PathBuf>,
    /// JSON lines for console and file output.
    pub json: bool,
    /// Module directives, e.g. `h2m_mapping=trace`.
    pub filter: Option<String>,
}

/// Definition loading settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Files or directories holding `*.toml` / `*.json` definition documents.
    pub definitions: Vec<PathBuf>,
    /// Reject invalid definitions when they are registered.
    pub strict: bool,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, path: None, json: false, filter: None }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self { definitions: vec![PathBuf::from(DEFAULT_DEFINITIONS)], strict: true }
    }
}
