//! Logging and observability
//!
//! The crate logs through `tracing`. Applications can install a subscriber
//! shaped by the resolved Logging domain with [`init_logging`]:
//! - console output, plain or JSON
//! - JSON file output with rotation
//! - level from `LOG_LEVEL`, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use nexaframe_config::config::ConfigRegistry;
//! use nexaframe_config::logging::init_logging;
//!
//! let registry = ConfigRegistry::from_env();
//! let _guard = init_logging(registry.logging()).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an override that could not be coerced into its setting's type
///
/// # Example
///
/// ```no_run
/// use nexaframe_config::log_override_rejected;
///
/// log_override_rejected!("database", "DB_PORT", "abc", "u16");
/// ```
#[macro_export]
macro_rules! log_override_rejected {
    ($domain:expr, $key:expr, $value:expr, $target:expr) => {
        tracing::warn!(
            domain = $domain,
            key = $key,
            value = $value,
            expected = $target,
            "Ignoring override that does not coerce, using default"
        );
    };
}
