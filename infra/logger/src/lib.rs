//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for h2m binaries.
//!
//! Console events are written to stderr so mapped output on stdout stays
//! machine-readable. File events go through a non-blocking rolling appender
//! whose worker lives as long as the returned [`Logger`].
//!
//! ```rust
//! use h2m_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("h2m")
//!     .level(LevelFilter::DEBUG)
//!     .directives("h2m_mapping=trace")
//!     .install()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

type Output<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Rolling log files written into one directory.
#[derive(Debug, Clone)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    keep: usize,
}

impl FileOutput {
    /// Daily files in `dir`, keeping the last ten.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, keep: 10 }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Number of rotated files retained; older ones are removed by the appender.
    #[must_use]
    pub const fn keep(mut self, files: usize) -> Self {
        self.keep = files;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn layer<S>(&self, prefix: &str, json: bool) -> Result<(Output<S>, WorkerGuard), LoggerError>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        std::fs::create_dir_all(&self.dir).context(self.dir.display().to_string())?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(self.keep)
            .build(&self.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        let layer = if json { layer.json().boxed() } else { layer.boxed() };
        Ok((layer, guard))
    }
}

/// Collects logger settings; nothing is installed until [`LoggerBuilder::install`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    json: bool,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Level applied to targets no directive mentions.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Filter directives such as `h2m_mapping=debug,h2m=info`.
    ///
    /// Without directives `RUST_LOG` is honoured.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// JSON lines instead of the compact text format, for every output.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for a blank name, zero retained files,
    ///   unparsable directives or when every output is disabled.
    /// - [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// - [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn install(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(invalid("Logger name cannot be empty"));
        }
        if !self.console && self.file.is_none() {
            return Err(invalid("Every output is disabled"));
        }
        if self.file.as_ref().is_some_and(|file| file.keep == 0) {
            return Err(invalid("At least one log file must be kept"));
        }

        let filter = self.filter()?;
        let mut outputs: Vec<Output<_>> = Vec::with_capacity(2);

        if self.console {
            let console = fmt::layer().with_writer(io::stderr);
            outputs.push(if self.json { console.json().boxed() } else { console.compact().boxed() });
        }

        let guard = match &self.file {
            Some(file) => {
                let (layer, guard) = file.layer(&self.name, self.json)?;
                outputs.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(outputs).try_init()?;
        Ok(Logger { guard })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder
                .parse(directives)
                .map_err(|e| invalid(format!("Invalid directives '{directives}': {e}"))),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}

/// Installed logger. Dropping it flushes and stops file output.
#[must_use = "dropping the logger stops file output"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` prefixes log files (`h2m.2026-10-17.log`).
    ///
    /// Defaults: `INFO`, console on, text format, no files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            json: false,
            file: None,
        }
    }

    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}
