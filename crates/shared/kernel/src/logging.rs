use h2m_domain::config::LoggingConfig;
use h2m_logger::{FileOutput, LevelFilter, Logger, LoggerError};

/// Installs the global logger described by `settings`.
///
/// Keep the returned [`Logger`] alive for the lifetime of the process.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown level, plus any error of
/// [`h2m_logger::LoggerBuilder::install`].
pub fn init_logger(name: &str, settings: &LoggingConfig) -> Result<Logger, LoggerError> {
    let level: LevelFilter = settings.level.trim().parse().map_err(|e| {
        LoggerError::InvalidConfiguration {
            message: format!("Invalid level '{}': {e}", settings.level).into(),
            context: None,
        }
    })?;

    let mut builder = Logger::builder(name).level(level).console(settings.console).json(settings.json);
    if let Some(directives) = &settings.filter {
        builder = builder.directives(directives.clone());
    }
    if let Some(path) = &settings.path {
        builder = builder.file(FileOutput::new(path));
    }
    builder.install()
}
