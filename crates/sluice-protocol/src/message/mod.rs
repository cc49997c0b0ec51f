//! The protocol envelope.
//!
//! On the wire a message is a flat object with a `type` field and one
//! payload field named after the type. In memory it is an enum, so a message
//! cannot carry zero or several payloads. Conversion between the two goes
//! through a private sparse `Envelope` whose unset fields are skipped
//! during serialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::ProtocolError;
use crate::record::{LogMessage, RecordMessage, StateMessage};
use crate::specification::ConnectorSpecification;
use crate::status::ConnectionStatus;

/// Discriminant written to the `type` field of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// A data record.
    Record,
    /// A state checkpoint.
    State,
    /// A connector log line.
    Log,
    /// The connector specification.
    Spec,
    /// The result of a connection check.
    ConnectionStatus,
    /// The discovered catalog.
    Catalog,
}

impl MessageType {
    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Record => "RECORD",
            Self::State => "STATE",
            Self::Log => "LOG",
            Self::Spec => "SPEC",
            Self::ConnectionStatus => "CONNECTION_STATUS",
            Self::Catalog => "CATALOG",
        }
    }

    /// Returns the name of the payload field carried by this type.
    #[must_use]
    pub const fn payload_field(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::State => "state",
            Self::Log => "log",
            Self::Spec => "spec",
            Self::ConnectionStatus => "connectionStatus",
            Self::Catalog => "catalog",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single protocol message.
///
/// # Example
///
/// ```
/// use sluice_protocol::{MessageType, ProtocolMessage, RecordMessage};
///
/// let message = ProtocolMessage::from(RecordMessage::new(
///     "users",
///     serde_json::json!({"id": 1}),
///     0,
/// ));
/// assert_eq!(message.message_type(), MessageType::Record);
///
/// let line = message.to_line().expect("serialise");
/// let back = ProtocolMessage::from_line(&line).expect("parse");
/// assert_eq!(back, message);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Envelope", try_from = "Envelope")]
pub enum ProtocolMessage {
    /// A data record.
    Record(RecordMessage),
    /// A state checkpoint.
    State(StateMessage),
    /// A connector log line.
    Log(LogMessage),
    /// The connector specification.
    Spec(ConnectorSpecification),
    /// The result of a connection check.
    ConnectionStatus(ConnectionStatus),
    /// The discovered catalog.
    Catalog(Catalog),
}

impl ProtocolMessage {
    /// Returns the discriminant of this message.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Record(_) => MessageType::Record,
            Self::State(_) => MessageType::State,
            Self::Log(_) => MessageType::Log,
            Self::Spec(_) => MessageType::Spec,
            Self::ConnectionStatus(_) => MessageType::ConnectionStatus,
            Self::Catalog(_) => MessageType::Catalog,
        }
    }

    /// Serializes the message as one JSON line without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Serialize`] if a payload cannot be encoded.
    pub fn to_line(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|source| ProtocolError::Serialize {
            message_type: self.message_type(),
            source,
        })
    }

    /// Parses one JSON line into a message.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Parse`] if the line is not valid JSON or does
    /// not carry exactly one payload matching its `type`.
    pub fn from_line(line: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(line.trim()).map_err(|source| ProtocolError::Parse { source })
    }
}

impl From<RecordMessage> for ProtocolMessage {
    fn from(record: RecordMessage) -> Self {
        Self::Record(record)
    }
}

impl From<StateMessage> for ProtocolMessage {
    fn from(state: StateMessage) -> Self {
        Self::State(state)
    }
}

impl From<LogMessage> for ProtocolMessage {
    fn from(log: LogMessage) -> Self {
        Self::Log(log)
    }
}

impl From<ConnectorSpecification> for ProtocolMessage {
    fn from(spec: ConnectorSpecification) -> Self {
        Self::Spec(spec)
    }
}

impl From<ConnectionStatus> for ProtocolMessage {
    fn from(status: ConnectionStatus) -> Self {
        Self::ConnectionStatus(status)
    }
}

impl From<Catalog> for ProtocolMessage {
    fn from(catalog: Catalog) -> Self {
        Self::Catalog(catalog)
    }
}

/// Sparse wire form of a message.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(rename = "type")]
    message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log: Option<LogMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spec: Option<ConnectorSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connection_status: Option<ConnectionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog: Option<Catalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    record: Option<RecordMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<StateMessage>,
}

impl Envelope {
    const fn empty(message_type: MessageType) -> Self {
        Self {
            message_type,
            log: None,
            spec: None,
            connection_status: None,
            catalog: None,
            record: None,
            state: None,
        }
    }

    fn present_fields(&self) -> Vec<&'static str> {
        [
            (self.log.is_some(), "log"),
            (self.spec.is_some(), "spec"),
            (self.connection_status.is_some(), "connectionStatus"),
            (self.catalog.is_some(), "catalog"),
            (self.record.is_some(), "record"),
            (self.state.is_some(), "state"),
        ]
        .into_iter()
        .filter_map(|(present, field)| present.then_some(field))
        .collect()
    }
}

impl From<ProtocolMessage> for Envelope {
    fn from(message: ProtocolMessage) -> Self {
        let mut envelope = Self::empty(message.message_type());
        match message {
            ProtocolMessage::Record(record) => envelope.record = Some(record),
            ProtocolMessage::State(state) => envelope.state = Some(state),
            ProtocolMessage::Log(log) => envelope.log = Some(log),
            ProtocolMessage::Spec(spec) => envelope.spec = Some(spec),
            ProtocolMessage::ConnectionStatus(status) => {
                envelope.connection_status = Some(status);
            }
            ProtocolMessage::Catalog(catalog) => envelope.catalog = Some(catalog),
        }
        envelope
    }
}

impl TryFrom<Envelope> for ProtocolMessage {
    type Error = ProtocolError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        let message_type = envelope.message_type;
        let expected = message_type.payload_field();
        let extra: Vec<&'static str> = envelope
            .present_fields()
            .into_iter()
            .filter(|field| *field != expected)
            .collect();
        if !extra.is_empty() {
            return Err(ProtocolError::UnexpectedPayload {
                message_type,
                fields: extra,
            });
        }

        let message = match message_type {
            MessageType::Record => envelope.record.map(Self::Record),
            MessageType::State => envelope.state.map(Self::State),
            MessageType::Log => envelope.log.map(Self::Log),
            MessageType::Spec => envelope.spec.map(Self::Spec),
            MessageType::ConnectionStatus => envelope.connection_status.map(Self::ConnectionStatus),
            MessageType::Catalog => envelope.catalog.map(Self::Catalog),
        };
        message.ok_or(ProtocolError::MissingPayload {
            message_type,
            field: expected,
        })
    }
}

#[cfg(test)]
mod tests;
