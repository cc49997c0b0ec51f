//! Process entrypoint for Sluice data connectors.
//!
//! A connector binary hands its process arguments to this crate. The router
//! turns them into an [`Invocation`], the [`Entrypoint`] runs it against the
//! injected [`Connector`] inside a scoped workspace, and the launcher writes
//! every resulting protocol message to standard output as one JSON line.
//! Diagnostics and logs go to standard error.
//!
//! Binaries normally call [`main_with_registry`]; tests and embedders call
//! [`launch`] with their own connector and output sinks.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use sluice_config::Config;
use sluice_connector::{Connector, ConnectorRegistry};
use tracing::debug;

mod cli;
pub mod errors;
mod invocation;
mod runner;
pub mod telemetry;
mod workspace;

pub use errors::EntrypointError;
pub use invocation::{Invocation, InvocationOptions, route};
pub use runner::{Entrypoint, Messages};
pub use workspace::{ScopedWorkspace, WorkspaceError};

const LAUNCHER_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::launcher");

/// Runs one invocation of `connector` using workspaces in the system temp
/// directory.
///
/// `args` includes the program name. Protocol messages go to `stdout`;
/// errors go to `stderr`.
#[must_use]
pub fn launch<I, W, E>(
    connector: &dyn Connector,
    args: I,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    launch_entrypoint(Entrypoint::new(connector), args, stdout, stderr)
}

/// Runs one invocation through a preconfigured [`Entrypoint`].
#[must_use]
pub fn launch_entrypoint<I, W, E>(
    entrypoint: Entrypoint<'_>,
    args: I,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    match execute(entrypoint, args, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&error, stdout, stderr),
    }
}

/// Entry used by connector binaries.
///
/// Loads runtime configuration from the environment, initialises logging,
/// selects the connector named by `SLUICE_CONNECTOR` from `registry` and
/// launches it with the process arguments.
#[must_use]
pub fn main_with_registry(registry: &ConnectorRegistry) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let (config, connector) = match prepare(registry) {
        Ok(prepared) => prepared,
        Err(error) => return report(&error, &mut stdout, &mut stderr),
    };
    let mut entrypoint = Entrypoint::new(connector.as_ref());
    if let Some(root) = config.workspace_root() {
        entrypoint = entrypoint.with_workspace_root(root);
    }
    launch_entrypoint(entrypoint, std::env::args_os(), &mut stdout, &mut stderr)
}

fn prepare(registry: &ConnectorRegistry) -> Result<(Config, Box<dyn Connector>), EntrypointError> {
    let config = Config::from_environment()?;
    telemetry::initialise(&config)?;
    let connector = registry.resolve(config.connector())?;
    debug!(
        target: LAUNCHER_TARGET,
        connector = config.connector().unwrap_or("unimplemented"),
        "selected connector"
    );
    Ok((config, connector))
}

fn execute<I, W>(entrypoint: Entrypoint<'_>, args: I, stdout: &mut W) -> Result<(), EntrypointError>
where
    I: IntoIterator<Item = OsString>,
    W: Write,
{
    let invocation = route(args)?;
    let mut emitted = 0_usize;
    for message in entrypoint.run(invocation) {
        write_line(stdout, &message?)?;
        emitted += 1;
    }
    debug!(target: LAUNCHER_TARGET, emitted, "invocation finished");
    Ok(())
}

fn write_line<W: Write>(stdout: &mut W, line: &str) -> Result<(), EntrypointError> {
    stdout
        .write_all(line.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .map_err(EntrypointError::Write)
}

fn report<W, E>(error: &EntrypointError, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    if error.is_informational() {
        return match writeln!(stdout, "{error}") {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(errors::EXIT_OUTPUT),
        };
    }
    debug!(target: LAUNCHER_TARGET, exit_code = error.exit_code(), "invocation failed");
    let _ = writeln!(stderr, "{error}");
    ExitCode::from(error.exit_code())
}

#[cfg(test)]
mod tests;
