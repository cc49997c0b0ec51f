//! Errors raised while encoding or decoding protocol messages.

use thiserror::Error;

use crate::message::MessageType;

/// Errors arising from protocol message handling.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The envelope declared a type but carried no matching payload.
    #[error("message of type {message_type} is missing its '{field}' payload")]
    MissingPayload {
        /// Declared message type.
        message_type: MessageType,
        /// Field expected to carry the payload.
        field: &'static str,
    },

    /// The envelope carried payload fields that do not belong to its type.
    #[error("message of type {message_type} carries unexpected payloads: {fields:?}")]
    UnexpectedPayload {
        /// Declared message type.
        message_type: MessageType,
        /// Names of the extra payload fields.
        fields: Vec<&'static str>,
    },

    /// Serializing a message to JSON failed.
    #[error("failed to serialise {message_type} message: {source}")]
    Serialize {
        /// Type of the message being serialized.
        message_type: MessageType,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Parsing a protocol line failed.
    #[error("failed to parse protocol line: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
