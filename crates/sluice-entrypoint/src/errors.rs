//! Error taxonomy for one entrypoint invocation and its exit-code mapping.

use std::io;

use sluice_config::ConfigError;
use sluice_connector::{ConnectorError, LoadError, RegistryError};
use sluice_protocol::ProtocolError;
use thiserror::Error;

use crate::telemetry::TelemetryError;
use crate::workspace::WorkspaceError;

/// Exit code for connector operation failures.
pub const EXIT_CONNECTOR: u8 = 1;
/// Exit code for invalid command lines.
pub const EXIT_INVALID_INVOCATION: u8 = 2;
/// Exit code for unreadable or malformed input files.
pub const EXIT_CONFIG_LOAD: u8 = 3;
/// Exit code for workspace creation or removal failures.
pub const EXIT_WORKSPACE: u8 = 4;
/// Exit code for failures emitting protocol messages.
pub const EXIT_OUTPUT: u8 = 5;
/// Exit code for startup failures before any command runs.
pub const EXIT_STARTUP: u8 = 6;
/// Exit code for commands the runner does not know.
pub const EXIT_UNEXPECTED_COMMAND: u8 = 70;

/// Failures that end an invocation.
///
/// None of these are recovered from: each one terminates the message
/// sequence and maps to a non-zero exit code through
/// [`EntrypointError::exit_code`].
#[derive(Debug, Error)]
pub enum EntrypointError {
    /// The command line could not be interpreted.
    #[error("{message}")]
    InvalidInvocation {
        /// Rendered usage error.
        message: String,
        /// Parser error, when the command line came through clap.
        #[source]
        source: Option<clap::Error>,
    },

    /// A config, catalog or state file could not be loaded.
    #[error(transparent)]
    ConfigLoad(#[from] LoadError),

    /// The connector reported a failure.
    #[error("connector operation failed: {0}")]
    Connector(#[from] ConnectorError),

    /// A command name outside the known set reached the runner.
    #[error("Unexpected command {command}")]
    UnexpectedCommand {
        /// Name that was requested.
        command: String,
    },

    /// The invocation workspace could not be created or removed.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// A protocol message could not be serialized.
    #[error(transparent)]
    Serialize(#[from] ProtocolError),

    /// Writing to standard output failed.
    #[error("failed to write protocol message: {0}")]
    Write(#[source] io::Error),

    /// The selected connector is not registered.
    #[error(transparent)]
    UnknownConnector(#[from] RegistryError),

    /// Runtime configuration could not be resolved.
    #[error("failed to load runtime configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

impl From<clap::Error> for EntrypointError {
    fn from(error: clap::Error) -> Self {
        Self::InvalidInvocation {
            message: error.to_string().trim_end().to_owned(),
            source: Some(error),
        }
    }
}

impl EntrypointError {
    /// Returns `true` for help and version requests, which are reported by
    /// the parser as errors but are successful outcomes.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Self::InvalidInvocation {
                source: Some(error),
                ..
            } if !error.use_stderr()
        )
    }

    /// Maps the failure to the process exit code.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_informational() {
            return 0;
        }
        match self {
            Self::Connector(_) => EXIT_CONNECTOR,
            Self::InvalidInvocation { .. } => EXIT_INVALID_INVOCATION,
            Self::ConfigLoad(_) => EXIT_CONFIG_LOAD,
            Self::Workspace(_) => EXIT_WORKSPACE,
            Self::Serialize(_) | Self::Write(_) => EXIT_OUTPUT,
            Self::UnknownConnector(_) | Self::Configuration(_) | Self::Telemetry(_) => {
                EXIT_STARTUP
            }
            Self::UnexpectedCommand { .. } => EXIT_UNEXPECTED_COMMAND,
        }
    }
}
