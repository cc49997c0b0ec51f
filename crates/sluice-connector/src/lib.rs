//! Connector capability set consumed by the Sluice entrypoint.
//!
//! A connector knows how to talk to one external data source. The entrypoint
//! only ever reaches it through the [`Connector`] trait: `spec`, `check`,
//! `discover` and `read`, plus `configure` and the file loaders, which have
//! JSON-based default implementations a connector may override.
//!
//! Binaries pick their implementation from a [`ConnectorRegistry`] of named
//! factory functions. When nothing is selected the registry falls back to
//! [`UnimplementedConnector`], which fails every operation.
//!
//! # Example
//!
//! ```
//! use sluice_connector::{Connector, ConnectorError, ConnectorState, MessageStream};
//! use sluice_protocol::{
//!     Catalog, ConfiguredCatalog, ConnectionStatus, ConnectorSpecification, RecordMessage,
//! };
//!
//! struct Numbers;
//!
//! impl Connector for Numbers {
//!     fn spec(&self) -> Result<ConnectorSpecification, ConnectorError> {
//!         Ok(ConnectorSpecification::new(serde_json::json!({"type": "object"})))
//!     }
//!
//!     fn check(&self, _config: &serde_json::Value) -> Result<ConnectionStatus, ConnectorError> {
//!         Ok(ConnectionStatus::succeeded())
//!     }
//!
//!     fn discover(&self, _config: &serde_json::Value) -> Result<Catalog, ConnectorError> {
//!         Ok(Catalog::default())
//!     }
//!
//!     fn read(
//!         &self,
//!         _config: serde_json::Value,
//!         _catalog: ConfiguredCatalog,
//!         _state: ConnectorState,
//!     ) -> Result<MessageStream<'_>, ConnectorError> {
//!         Ok(Box::new((0..3).map(|n| {
//!             Ok(RecordMessage::new("numbers", serde_json::json!({"n": n}), 0).into())
//!         })))
//!     }
//! }
//!
//! let status = Numbers.check(&serde_json::json!({})).expect("check");
//! assert!(status.is_success());
//! ```

pub mod connector;
pub mod error;
pub mod loader;
pub mod registry;
pub mod state;

pub use self::connector::{CONFIG_FILE_NAME, Connector, MessageStream, UnimplementedConnector};
pub use self::error::ConnectorError;
pub use self::loader::{InputKind, LoadError, load_json};
pub use self::registry::{ConnectorFactory, ConnectorRegistry, RegistryError};
pub use self::state::ConnectorState;
