//! Unit tests for the protocol envelope.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::catalog::{DestinationSyncMode, Stream};
use crate::record::LogLevel;

// ---------------------------------------------------------------------------
// Sparse serialisation
// ---------------------------------------------------------------------------

#[test]
fn connection_status_line_is_sparse() {
    let message = ProtocolMessage::from(ConnectionStatus::succeeded());
    let line = message.to_line().expect("serialise");
    insta::assert_snapshot!(
        line,
        @r#"{"type":"CONNECTION_STATUS","connectionStatus":{"status":"SUCCEEDED"}}"#
    );
}

#[test]
fn failed_status_keeps_diagnostic_message() {
    let message = ProtocolMessage::from(ConnectionStatus::failed("no route to host"));
    let value: serde_json::Value =
        serde_json::from_str(&message.to_line().expect("serialise")).expect("parse");
    assert_eq!(
        value,
        json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {"status": "FAILED", "message": "no route to host"}
        })
    );
}

#[rstest]
#[case::record(
    ProtocolMessage::from(RecordMessage::new("users", json!({"id": 1}), 5)),
    "RECORD",
    "record"
)]
#[case::state(
    ProtocolMessage::from(StateMessage::new(json!({"cursor": 3}))),
    "STATE",
    "state"
)]
#[case::log(
    ProtocolMessage::from(LogMessage::new(LogLevel::Info, "hello")),
    "LOG",
    "log"
)]
#[case::spec(
    ProtocolMessage::from(ConnectorSpecification::new(json!({"type": "object"}))),
    "SPEC",
    "spec"
)]
#[case::catalog(
    ProtocolMessage::from(Catalog::new(vec![Stream::new("users", json!({}))])),
    "CATALOG",
    "catalog"
)]
fn each_type_serialises_exactly_one_payload(
    #[case] message: ProtocolMessage,
    #[case] expected_type: &str,
    #[case] expected_field: &str,
) {
    let line = message.to_line().expect("serialise");
    let value: serde_json::Value = serde_json::from_str(&line).expect("parse");
    let object = value.as_object().expect("message is an object");
    assert_eq!(
        object.get("type").and_then(serde_json::Value::as_str),
        Some(expected_type)
    );
    assert_eq!(object.len(), 2, "expected type plus one payload in {line}");
    assert!(
        object.contains_key(expected_field),
        "expected '{expected_field}' payload in {line}"
    );
}

#[test]
fn spec_payload_uses_camel_case_keys() {
    let spec = ConnectorSpecification::new(json!({}))
        .with_documentation_url("https://example.invalid/docs")
        .with_dbt(false);
    let value = serde_json::to_value(ProtocolMessage::from(spec)).expect("serialise");
    let payload = value.get("spec").expect("spec payload");
    assert!(payload.get("connectionSpecification").is_some());
    assert!(payload.get("documentationUrl").is_some());
    assert_eq!(payload.get("supportsDBT"), Some(&json!(false)));
    assert!(payload.get("changelogUrl").is_none());
}

#[test]
fn spec_line_carries_every_declared_capability() {
    let spec = ConnectorSpecification::new(json!({}))
        .with_documentation_url("https://example.invalid/docs")
        .with_changelog_url("https://example.invalid/changelog")
        .with_incremental(true)
        .with_normalization(false)
        .with_dbt(false)
        .with_destination_sync_modes(vec![
            DestinationSyncMode::Append,
            DestinationSyncMode::AppendDedup,
        ]);
    let line = ProtocolMessage::from(spec).to_line().expect("serialise");
    insta::assert_snapshot!(
        line,
        @r#"{"type":"SPEC","spec":{"connectionSpecification":{},"documentationUrl":"https://example.invalid/docs","changelogUrl":"https://example.invalid/changelog","supportsIncremental":true,"supportsNormalization":false,"supportsDBT":false,"supported_destination_sync_modes":["append","append_dedup"]}}"#
    );
}

// ---------------------------------------------------------------------------
// Envelope validation
// ---------------------------------------------------------------------------

#[test]
fn parses_record_line() {
    let line = r#"{"type":"RECORD","record":{"stream":"s","data":{},"emitted_at":1}}"#;
    let message = ProtocolMessage::from_line(line).expect("parse");
    assert_eq!(message.message_type(), MessageType::Record);
}

#[test]
fn rejects_type_without_payload() {
    let error = ProtocolMessage::from_line(r#"{"type":"SPEC"}"#).expect_err("should fail");
    assert!(
        error.to_string().contains("missing its 'spec' payload"),
        "unexpected error: {error}"
    );
}

#[test]
fn rejects_mismatched_payload() {
    let line = r#"{"type":"SPEC","state":{"data":{}}}"#;
    let error = ProtocolMessage::from_line(line).expect_err("should fail");
    assert!(
        error.to_string().contains("unexpected payloads"),
        "unexpected error: {error}"
    );
}

#[test]
fn rejects_extra_payload() {
    let line = r#"{"type":"STATE","state":{"data":{}},"log":{"level":"INFO","message":"x"}}"#;
    let error = ProtocolMessage::from_line(line).expect_err("should fail");
    assert!(matches!(error, ProtocolError::Parse { .. }));
}

#[test]
fn payload_field_names_match_wire_keys() {
    let message = ProtocolMessage::from(ConnectionStatus::succeeded());
    let value = serde_json::to_value(&message).expect("serialise");
    let field = message.message_type().payload_field();
    assert!(value.get(field).is_some(), "missing '{field}' in {value}");
}
