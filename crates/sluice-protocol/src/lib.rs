//! Wire types for the Sluice connector protocol.
//!
//! A connector process talks to its caller through newline-delimited JSON on
//! standard output. Every line is one [`ProtocolMessage`]: a `type`
//! discriminant plus exactly one payload field whose name matches the type.
//! Payload fields that do not apply are omitted from the serialized form
//! rather than written as `null`.
//!
//! # Example
//!
//! ```
//! use sluice_protocol::{ConnectionStatus, ProtocolMessage};
//!
//! let message = ProtocolMessage::ConnectionStatus(ConnectionStatus::succeeded());
//! let line = message.to_line().expect("serialise");
//! assert_eq!(
//!     line,
//!     r#"{"type":"CONNECTION_STATUS","connectionStatus":{"status":"SUCCEEDED"}}"#
//! );
//! ```

pub mod catalog;
pub mod error;
pub mod message;
pub mod record;
pub mod specification;
pub mod status;

pub use self::catalog::{
    Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, Stream, SyncMode,
};
pub use self::error::ProtocolError;
pub use self::message::{MessageType, ProtocolMessage};
pub use self::record::{LogLevel, LogMessage, RecordMessage, StateMessage};
pub use self::specification::ConnectorSpecification;
pub use self::status::{ConnectionStatus, Status};
