//! Routing of process arguments into a validated invocation.

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, CliCommand};
use crate::errors::EntrypointError;

const ROUTER_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::router");

/// One connector operation with its validated options.
///
/// Built by [`route`] or [`Invocation::from_parts`] and consumed once by the
/// runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Produce the connector specification.
    Spec,
    /// Validate a configuration.
    Check {
        /// Configuration file.
        config: Utf8PathBuf,
    },
    /// Enumerate the source catalog.
    Discover {
        /// Configuration file.
        config: Utf8PathBuf,
    },
    /// Stream records for a configured catalog.
    Read {
        /// Configuration file.
        config: Utf8PathBuf,
        /// Configured catalog file.
        catalog: Utf8PathBuf,
        /// Optional state file.
        state: Option<Utf8PathBuf>,
    },
}

/// Named options used to assemble an [`Invocation`] by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    config: Option<Utf8PathBuf>,
    catalog: Option<Utf8PathBuf>,
    state: Option<Utf8PathBuf>,
}

impl InvocationOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration path.
    #[must_use]
    pub fn with_config(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Sets the configured catalog path.
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// Sets the state path.
    #[must_use]
    pub fn with_state(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.state = Some(path.into());
        self
    }
}

impl Invocation {
    /// Assembles an invocation from a command name and its options.
    ///
    /// Applies the same rules as [`route`]: each command accepts only its own
    /// options and every supplied value must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`EntrypointError::UnexpectedCommand`] for names other than
    /// `spec`, `check`, `discover` and `read`, and
    /// [`EntrypointError::InvalidInvocation`] when a required option is
    /// missing, an option does not belong to the command or a value is empty.
    pub fn from_parts(command: &str, options: InvocationOptions) -> Result<Self, EntrypointError> {
        let InvocationOptions {
            config: config_path,
            catalog: catalog_path,
            state: state_path,
        } = options;
        match command {
            "spec" => {
                forbidden(command, "config", config_path.as_ref())?;
                forbidden(command, "catalog", catalog_path.as_ref())?;
                forbidden(command, "state", state_path.as_ref())?;
                Ok(Self::Spec)
            }
            "check" => {
                forbidden(command, "catalog", catalog_path.as_ref())?;
                forbidden(command, "state", state_path.as_ref())?;
                Ok(Self::Check {
                    config: required(command, "config", config_path)?,
                })
            }
            "discover" => {
                forbidden(command, "catalog", catalog_path.as_ref())?;
                forbidden(command, "state", state_path.as_ref())?;
                Ok(Self::Discover {
                    config: required(command, "config", config_path)?,
                })
            }
            "read" => Ok(Self::Read {
                config: required(command, "config", config_path)?,
                catalog: required(command, "catalog", catalog_path)?,
                state: optional(command, "state", state_path)?,
            }),
            other => Err(EntrypointError::UnexpectedCommand {
                command: other.to_owned(),
            }),
        }
    }

    /// Returns the command name.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Spec => "spec",
            Self::Check { .. } => "check",
            Self::Discover { .. } => "discover",
            Self::Read { .. } => "read",
        }
    }

    /// Returns the configuration path, if the command takes one.
    #[must_use]
    pub fn config(&self) -> Option<&Utf8Path> {
        match self {
            Self::Spec => None,
            Self::Check { config } | Self::Discover { config } | Self::Read { config, .. } => {
                Some(config.as_path())
            }
        }
    }
}

impl From<CliCommand> for Invocation {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Spec => Self::Spec,
            CliCommand::Check { config } => Self::Check { config },
            CliCommand::Discover { config } => Self::Discover { config },
            CliCommand::Read {
                config,
                catalog,
                state,
            } => Self::Read {
                config,
                catalog,
                state,
            },
        }
    }
}

fn required(
    command: &str,
    option: &'static str,
    value: Option<Utf8PathBuf>,
) -> Result<Utf8PathBuf, EntrypointError> {
    optional(command, option, value)?.ok_or_else(|| missing_value(command, option))
}

fn optional(
    command: &str,
    option: &'static str,
    value: Option<Utf8PathBuf>,
) -> Result<Option<Utf8PathBuf>, EntrypointError> {
    if value
        .as_ref()
        .is_some_and(|path| path.as_str().trim().is_empty())
    {
        return Err(missing_value(command, option));
    }
    Ok(value)
}

fn forbidden(
    command: &str,
    option: &'static str,
    value: Option<&Utf8PathBuf>,
) -> Result<(), EntrypointError> {
    if value.is_some() {
        return Err(EntrypointError::InvalidInvocation {
            message: format!("'{command}' does not accept --{option}"),
            source: None,
        });
    }
    Ok(())
}

fn missing_value(command: &str, option: &str) -> EntrypointError {
    EntrypointError::InvalidInvocation {
        message: format!("'{command}' requires a non-empty --{option} <PATH>"),
        source: None,
    }
}

/// Parses process arguments (including the program name) into an invocation.
///
/// Nothing beyond the argument strings is inspected; file readability is
/// left to the loaders.
///
/// # Errors
///
/// Returns [`EntrypointError::InvalidInvocation`] for unknown subcommands,
/// missing or empty options and stray arguments. Help and version requests
/// are reported the same way and can be told apart with
/// [`EntrypointError::is_informational`].
pub fn route<I, T>(args: I) -> Result<Invocation, EntrypointError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(EntrypointError::from)?;
    let invocation = Invocation::from(cli.command);
    debug!(target: ROUTER_TARGET, command = invocation.command(), "routed invocation");
    Ok(invocation)
}
