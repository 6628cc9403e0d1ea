//! Kernel utilities shared by h2m applications.
//! Keep this crate lightweight: layered configuration loading and logger bootstrap.
//!
//! ## Config loading
//! ```rust,no_run
//! use h2m_kernel::config::load_config;
//! use h2m_kernel::domain::config::H2mConfig;
//!
//! let cfg: H2mConfig = load_config(Some("h2m.toml")).unwrap();
//! let _logger = h2m_kernel::logging::init_logger("h2m", &cfg.logging).unwrap();
//! ```

pub mod config;
pub mod logging;

pub use h2m_domain as domain;
