//! Lazy execution of one invocation against a connector.
//!
//! [`Entrypoint::run`] returns a [`Messages`] iterator. Nothing happens until
//! the first call to `next`: that call creates the workspace, loads the
//! inputs and invokes the connector. Each later call produces at most one
//! serialized message, so a `read` is never buffered. The workspace is
//! removed as soon as the sequence ends, whether it ends in success, in an
//! error or by being dropped early.

use std::iter;
use std::mem;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use sluice_connector::{Connector, MessageStream};
use sluice_protocol::ProtocolMessage;
use tracing::{debug, error, info, warn};

use crate::errors::EntrypointError;
use crate::invocation::Invocation;
use crate::workspace::ScopedWorkspace;

const RUNNER_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::runner");

/// Binds a connector to the per-invocation lifecycle.
///
/// # Example
///
/// ```
/// use sluice_connector::UnimplementedConnector;
/// use sluice_entrypoint::{Entrypoint, EntrypointError, Invocation};
///
/// let connector = UnimplementedConnector;
/// let mut messages = Entrypoint::new(&connector).run(Invocation::Spec);
/// let first = messages.next().expect("one outcome");
/// assert!(matches!(first, Err(EntrypointError::Connector(_))));
/// assert!(messages.next().is_none());
/// ```
#[derive(Clone, Copy)]
pub struct Entrypoint<'c> {
    connector: &'c dyn Connector,
    workspace_root: Option<&'c Utf8Path>,
}

impl<'c> Entrypoint<'c> {
    /// Creates an entrypoint whose workspaces live in the system temp
    /// directory.
    #[must_use]
    pub const fn new(connector: &'c dyn Connector) -> Self {
        Self {
            connector,
            workspace_root: None,
        }
    }

    /// Creates workspaces under `root` instead of the system temp directory.
    #[must_use]
    pub const fn with_workspace_root(mut self, root: &'c Utf8Path) -> Self {
        self.workspace_root = Some(root);
        self
    }

    /// Starts an invocation and returns its message sequence.
    ///
    /// The sequence yields serialized protocol messages. After the first
    /// `Err` it yields nothing more.
    #[must_use]
    pub fn run(&self, invocation: Invocation) -> Messages<'c> {
        Messages {
            connector: self.connector,
            workspace_root: self.workspace_root.map(Utf8Path::to_path_buf),
            phase: Phase::Pending(invocation),
        }
    }
}

/// Lazy sequence of serialized protocol messages for one invocation.
pub struct Messages<'c> {
    connector: &'c dyn Connector,
    workspace_root: Option<Utf8PathBuf>,
    phase: Phase<'c>,
}

enum Phase<'c> {
    Pending(Invocation),
    // `records` may refer to files inside `workspace`, so it is dropped first.
    Streaming {
        records: MessageStream<'c>,
        workspace: ScopedWorkspace,
    },
    Done,
}

impl Iterator for Messages<'_> {
    type Item = Result<String, EntrypointError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.phase, Phase::Done) {
                Phase::Done => return None,
                Phase::Pending(invocation) => match self.start(invocation) {
                    Ok((records, workspace)) => {
                        self.phase = Phase::Streaming { records, workspace };
                    }
                    Err(failure) => return Some(Err(failure)),
                },
                Phase::Streaming {
                    mut records,
                    workspace,
                } => {
                    let line = match records.next() {
                        Some(Ok(message)) => message.to_line().map_err(EntrypointError::from),
                        Some(Err(failure)) => Err(EntrypointError::from(failure)),
                        None => {
                            drop(records);
                            return finish(workspace);
                        }
                    };
                    return Some(match line {
                        Ok(text) => {
                            self.phase = Phase::Streaming { records, workspace };
                            Ok(text)
                        }
                        Err(failure) => {
                            drop(records);
                            release_after_failure(workspace);
                            Err(failure)
                        }
                    });
                }
            }
        }
    }
}

impl<'c> Messages<'c> {
    fn start(
        &self,
        invocation: Invocation,
    ) -> Result<(MessageStream<'c>, ScopedWorkspace), EntrypointError> {
        let workspace = ScopedWorkspace::acquire(self.workspace_root.as_deref())?;
        debug!(
            target: RUNNER_TARGET,
            command = invocation.command(),
            workspace = %workspace.path().display(),
            "starting invocation"
        );
        match dispatch(self.connector, invocation, workspace.path()) {
            Ok(records) => Ok((records, workspace)),
            Err(failure) => {
                release_after_failure(workspace);
                Err(failure)
            }
        }
    }
}

fn dispatch<'c>(
    connector: &'c dyn Connector,
    invocation: Invocation,
    workspace: &Path,
) -> Result<MessageStream<'c>, EntrypointError> {
    match invocation {
        Invocation::Spec => {
            let spec = connector.spec()?;
            Ok(single(spec))
        }
        Invocation::Check { config } => {
            let configured = configure(connector, &config, workspace)?;
            let status = connector.check(&configured)?;
            if status.is_success() {
                info!(target: RUNNER_TARGET, "Check succeeded");
            } else {
                error!(
                    target: RUNNER_TARGET,
                    reason = status.message().unwrap_or_default(),
                    "Check failed"
                );
            }
            Ok(single(status))
        }
        Invocation::Discover { config } => {
            let configured = configure(connector, &config, workspace)?;
            let catalog = connector.discover(&configured)?;
            debug!(
                target: RUNNER_TARGET,
                streams = catalog.streams().len(),
                "discovered catalog"
            );
            Ok(single(catalog))
        }
        Invocation::Read {
            config,
            catalog,
            state,
        } => {
            let configured = configure(connector, &config, workspace)?;
            let configured_catalog = connector.read_catalog(&catalog)?;
            let resumed = connector.read_state(state.as_deref())?;
            debug!(
                target: RUNNER_TARGET,
                streams = configured_catalog.streams().len(),
                resumed = !resumed.is_empty(),
                "starting read"
            );
            Ok(connector.read(configured, configured_catalog, resumed)?)
        }
    }
}

fn configure(
    connector: &dyn Connector,
    path: &Utf8Path,
    workspace: &Path,
) -> Result<serde_json::Value, EntrypointError> {
    let raw = connector.read_config(path)?;
    Ok(connector.configure(raw, workspace)?)
}

fn single<'c>(message: impl Into<ProtocolMessage>) -> MessageStream<'c> {
    Box::new(iter::once(Ok(message.into())))
}

fn finish(workspace: ScopedWorkspace) -> Option<Result<String, EntrypointError>> {
    match workspace.release() {
        Ok(()) => {
            debug!(target: RUNNER_TARGET, "invocation complete");
            None
        }
        Err(failure) => Some(Err(failure.into())),
    }
}

fn release_after_failure(workspace: ScopedWorkspace) {
    if let Err(failure) = workspace.release() {
        warn!(target: RUNNER_TARGET, error = %failure, "workspace cleanup failed");
    }
}
