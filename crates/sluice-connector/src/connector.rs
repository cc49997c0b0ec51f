//! The connector capability trait and its unimplemented fallback.

use std::fs;
use std::path::Path;

use camino::Utf8Path;
use sluice_protocol::{
    Catalog, ConfiguredCatalog, ConnectionStatus, ConnectorSpecification, ProtocolMessage,
};
use tracing::debug;

use crate::error::ConnectorError;
use crate::loader::{InputKind, LOADER_TARGET, LoadError, load_json};
use crate::state::ConnectorState;

/// File name the default [`Connector::configure`] persists the configuration under.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Lazily produced output of [`Connector::read`].
///
/// The iterator may borrow from the connector. An `Err` item ends the read:
/// the entrypoint stops pulling after the first failure.
pub type MessageStream<'a> =
    Box<dyn Iterator<Item = Result<ProtocolMessage, ConnectorError>> + 'a>;

/// Operations a data connector exposes to the entrypoint.
///
/// Only `spec`, `check`, `discover` and `read` must be provided. The loaders
/// parse the invocation's JSON files and `configure` stores the configuration
/// in the invocation workspace; override them when a connector needs
/// something else.
///
/// The trait is object safe so registries can hand out `Box<dyn Connector>`.
pub trait Connector {
    /// Describes the configuration this connector accepts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] when the specification cannot be produced.
    fn spec(&self) -> Result<ConnectorSpecification, ConnectorError>;

    /// Loads the raw configuration document named by `--config`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the file is unreadable or not JSON.
    fn read_config(&self, path: &Utf8Path) -> Result<serde_json::Value, LoadError> {
        load_json(InputKind::Config, path)
    }

    /// Prepares the configuration for use, given the invocation workspace.
    ///
    /// The default writes the raw configuration to `config.json` inside the
    /// workspace and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Workspace`] when the file cannot be written.
    fn configure(
        &self,
        raw_config: serde_json::Value,
        workspace: &Path,
    ) -> Result<serde_json::Value, ConnectorError> {
        let path = workspace.join(CONFIG_FILE_NAME);
        let persist = serde_json::to_vec(&raw_config)
            .map_err(std::io::Error::other)
            .and_then(|bytes| fs::write(&path, bytes));
        if let Err(source) = persist {
            return Err(ConnectorError::Workspace { path, source });
        }
        debug!(target: LOADER_TARGET, path = %path.display(), "persisted configuration");
        Ok(raw_config)
    }

    /// Verifies that the connector can reach its source with `config`.
    ///
    /// A reachable-but-misconfigured source is a `Failed` status, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] when the check itself could not run.
    fn check(&self, config: &serde_json::Value) -> Result<ConnectionStatus, ConnectorError>;

    /// Lists the streams the source offers.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] when discovery fails.
    fn discover(&self, config: &serde_json::Value) -> Result<Catalog, ConnectorError>;

    /// Loads the configured catalog named by `--catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the file is unreadable or not a catalog.
    fn read_catalog(&self, path: &Utf8Path) -> Result<ConfiguredCatalog, LoadError> {
        load_json(InputKind::Catalog, path)
    }

    /// Loads the state named by `--state`, or the empty state when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when a given file is unreadable or not a JSON
    /// object.
    fn read_state(&self, path: Option<&Utf8Path>) -> Result<ConnectorState, LoadError> {
        path.map_or_else(
            || Ok(ConnectorState::default()),
            |file| load_json(InputKind::State, file),
        )
    }

    /// Starts reading records for the configured catalog.
    ///
    /// Messages are pulled one at a time by the caller, so a long read never
    /// needs to be buffered.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectorError`] when the read cannot start.
    fn read(
        &self,
        config: serde_json::Value,
        catalog: ConfiguredCatalog,
        state: ConnectorState,
    ) -> Result<MessageStream<'_>, ConnectorError>;
}

/// Connector used when no implementation has been selected.
///
/// Every required operation fails with [`ConnectorError::Unimplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedConnector;

impl Connector for UnimplementedConnector {
    fn spec(&self) -> Result<ConnectorSpecification, ConnectorError> {
        Err(ConnectorError::unimplemented("spec"))
    }

    fn check(&self, _config: &serde_json::Value) -> Result<ConnectionStatus, ConnectorError> {
        Err(ConnectorError::unimplemented("check"))
    }

    fn discover(&self, _config: &serde_json::Value) -> Result<Catalog, ConnectorError> {
        Err(ConnectorError::unimplemented("discover"))
    }

    fn read(
        &self,
        _config: serde_json::Value,
        _catalog: ConfiguredCatalog,
        _state: ConnectorState,
    ) -> Result<MessageStream<'_>, ConnectorError> {
        Err(ConnectorError::unimplemented("read"))
    }
}
