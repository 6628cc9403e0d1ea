use config::{Config, Environment, File};
use h2m_domain::constants::ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "h2m";

/// Error raised while assembling layered configuration.
#[h2m_derive::h2m_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with environment variables.
///
/// Layers, lowest precedence first:
/// 1. **File**: `path` when given (required to exist), otherwise an optional `h2m.{toml,json,yaml}`
///    in the working directory.
/// 2. **Environment**: variables prefixed with `H2M__`; nested keys are separated by double
///    underscores (`H2M__LOGGING__LEVEL=debug` maps to `logging.level`).
///    `H2M__MAPPING__DEFINITIONS` accepts a comma separated list.
///
/// # Errors
/// Returns [`ConfigError::Config`] when an explicit file is missing, a source is malformed
/// or the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use h2m_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     strict: bool,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("mapping.definitions"),
        );

    info!(path = %effective_path.display(), required, "Loading configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
