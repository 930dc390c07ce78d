//! Envelope value and wire codec.
//!
//! An envelope is the unit of exchange on a LIME connection. The transport
//! treats it as an opaque JSON value: it serializes outbound envelopes to
//! UTF-8 JSON text and deserializes inbound text frames back, nothing more.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Envelope
// ============================================================================

/// An opaque JSON message value exchanged over the connection.
///
/// The transport moves envelopes without interpreting their contents.
/// Each envelope occupies exactly one text frame on the wire.
///
/// # Format
///
/// ```json
/// { "id": "1", "to": "postmaster@host.example", "method": "get" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// Wraps a JSON value as an envelope.
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the envelope, returning the underlying JSON value.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Serializes the envelope to its textual wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the value cannot be
    /// serialized (non-string map keys and the like).
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Deserializes an envelope from a textual wire frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the frame is not
    /// valid JSON.
    pub fn from_wire(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }
}

impl From<Value> for Envelope {
    #[inline]
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_to_wire_matches_value_serialization() {
        let value = json!({"id": "1"});
        let envelope = Envelope::new(value.clone());

        let wire = envelope.to_wire().expect("serialize");
        assert_eq!(wire, serde_json::to_string(&value).expect("serialize"));
        assert_eq!(wire, r#"{"id":"1"}"#);
    }

    #[test]
    fn test_from_wire_roundtrip() {
        let wire = r#"{"id":"2","to":"postmaster@host.example","method":"get"}"#;
        let envelope = Envelope::from_wire(wire).expect("parse");

        assert_eq!(envelope.as_value()["method"], "get");
        assert_eq!(envelope.to_wire().expect("serialize"), wire);
    }

    #[test]
    fn test_from_wire_malformed() {
        let result = Envelope::from_wire("{not json");
        let err = result.expect_err("must fail");
        assert!(err.is_codec_error());
    }

    #[test]
    fn test_non_object_payloads_pass_through() {
        // Envelopes are opaque: arrays and scalars are legal JSON frames.
        let envelope = Envelope::from_wire("[1,2,3]").expect("parse");
        assert_eq!(envelope.into_value(), json!([1, 2, 3]));
    }

    #[test]
    fn test_transparent_serde() {
        let envelope = Envelope::new(json!({"state": "new"}));
        let as_json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(as_json, json!({"state": "new"}));

        let back: Envelope = serde_json::from_value(as_json).expect("deserialize");
        assert_eq!(back, envelope);
    }
}
