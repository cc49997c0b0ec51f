//! Runtime configuration shared by Sluice connector binaries.
//!
//! Settings are layered by `ortho_config`: built-in defaults, then any
//! configuration file it discovers, then `SLUICE_*` environment variables.
//! Only ambient behaviour lives here: which registered connector to run, how
//! logs are filtered and rendered, and where the per-invocation workspace is
//! created. Connector configuration proper is a JSON file owned by the
//! connector and passed on the command line.

use std::ffi::OsString;
use std::iter;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;
mod logging;

pub use defaults::{
    CONNECTOR_ENV, DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, PROGRAM_NAME,
    WORKSPACE_ROOT_ENV, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved runtime configuration.
///
/// Blank string values count as unset; the accessors apply that rule so a
/// `SLUICE_CONNECTOR=""` in the environment behaves like no selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SLUICE")]
pub struct Config {
    /// Name of the registered connector to run.
    pub connector: Option<String>,
    /// Log filter expression in `EnvFilter` syntax.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Directory under which invocation workspaces are created.
    pub workspace_root: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connector: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            workspace_root: None,
        }
    }
}

impl Config {
    /// Resolves configuration from defaults, configuration files and the
    /// process environment.
    ///
    /// Process arguments are not consulted; they belong to the
    /// connector command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a layer cannot be read or a value
    /// does not deserialize, for example an unknown log format.
    pub fn from_environment() -> Result<Self, ConfigError> {
        Self::load_from_iter(iter::once(OsString::from(PROGRAM_NAME))).map_err(ConfigError::from)
    }

    /// Name of the registered connector to run, if one was selected.
    #[must_use]
    pub fn connector(&self) -> Option<&str> {
        self.connector
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Log filter expression in `EnvFilter` syntax.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        let filter = self.log_filter.trim();
        if filter.is_empty() {
            default_log_filter()
        } else {
            filter
        }
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Directory under which invocation workspaces are created, if overridden.
    #[must_use]
    pub fn workspace_root(&self) -> Option<&Utf8Path> {
        self.workspace_root
            .as_deref()
            .filter(|root| !root.as_str().trim().is_empty())
    }
}

/// Errors raised while resolving runtime configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// One of the configuration layers could not be loaded.
    #[error(transparent)]
    Load(#[from] Arc<OrthoError>),
}
