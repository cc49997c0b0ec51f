use crate::logging::LogFormat;

/// Program name handed to the configuration loader in place of `argv[0]`.
pub const PROGRAM_NAME: &str = "sluice";

/// Environment variable naming the registered connector to run.
pub const CONNECTOR_ENV: &str = "SLUICE_CONNECTOR";

/// Environment variable overriding the log filter expression.
pub const LOG_FILTER_ENV: &str = "SLUICE_LOG_FILTER";

/// Environment variable overriding the log output format.
pub const LOG_FORMAT_ENV: &str = "SLUICE_LOG_FORMAT";

/// Environment variable overriding where invocation workspaces are created.
pub const WORKSPACE_ROOT_ENV: &str = "SLUICE_WORKSPACE_ROOT";

/// Default log filter expression used by connector binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by connector binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned default log filter, as the configuration loader needs it.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for connector binaries.
///
/// Compact output keeps the stderr status lines readable next to the JSON
/// protocol stream on stdout.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
