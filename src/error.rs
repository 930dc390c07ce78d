//! Error types for the LIME WebSocket transport.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use lime_ws::{Result, WebSocketTransport};
//!
//! async fn example(transport: &WebSocketTransport) -> Result<()> {
//!     transport.open("wss://host.example/messaging").await?;
//!     transport.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Precondition | [`Error::NotOpen`], [`Error::AlreadyOpen`] |
//! | Configuration | [`Error::InvalidTarget`] |
//! | Capability | [`Error::UnsupportedOperation`] |
//! | Transport | [`Error::Connection`], [`Error::ConnectionClosed`], [`Error::WebSocket`] |
//! | External | [`Error::Json`], [`Error::ChannelClosed`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::transport::TransportState;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    /// Operation requires an open connection.
    ///
    /// Returned when `send` or `close` is invoked outside the open state.
    /// The adapter state is left untouched.
    #[error("The connection is not open")]
    NotOpen,

    /// A connection is already live.
    ///
    /// Returned when `open` is invoked while a handle is opening or open.
    #[error("The connection is already open (state: {state})")]
    AlreadyOpen {
        /// Adapter state at the time of the call.
        state: TransportState,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Connection target could not be parsed as a URI.
    #[error("Invalid connection target '{target}': {message}")]
    InvalidTarget {
        /// The rejected target string.
        target: String,
        /// Description of the parse failure.
        message: String,
    },

    // ========================================================================
    // Capability Errors
    // ========================================================================
    /// Capability negotiation is not offered by this transport.
    ///
    /// Returned unconditionally by `set_compression` and `set_encryption`.
    #[error("{operation} change is not supported")]
    UnsupportedOperation {
        /// The rejected operation, e.g. `Compression`.
        operation: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Transport-level failure while opening, closing, or writing.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection closed while an operation was in flight.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// WebSocket protocol error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// JSON envelope encode/decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an already-open precondition error.
    #[inline]
    pub fn already_open(state: TransportState) -> Self {
        Self::AlreadyOpen { state }
    }

    /// Creates an invalid target error.
    #[inline]
    pub fn invalid_target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    #[inline]
    pub fn unsupported_operation(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a caller precondition violation.
    ///
    /// Precondition errors are programmer errors to avoid via state
    /// inspection, not runtime outcomes to retry.
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotOpen | Self::AlreadyOpen { .. })
    }

    /// Returns `true` if this is a transport-level error.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this is an unsupported capability operation.
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// Returns `true` if this is an envelope codec error.
    #[inline]
    #[must_use]
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_open_display() {
        let err = Error::NotOpen;
        assert_eq!(err.to_string(), "The connection is not open");
    }

    #[test]
    fn test_already_open_display() {
        let err = Error::already_open(TransportState::Open);
        assert_eq!(
            err.to_string(),
            "The connection is already open (state: open)"
        );
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = Error::unsupported_operation("Compression");
        assert_eq!(err.to_string(), "Compression change is not supported");

        let err = Error::unsupported_operation("Encryption");
        assert_eq!(err.to_string(), "Encryption change is not supported");
    }

    #[test]
    fn test_connection_display() {
        let err = Error::connection("handshake refused");
        assert_eq!(err.to_string(), "Connection failed: handshake refused");
    }

    #[test]
    fn test_is_precondition() {
        assert!(Error::NotOpen.is_precondition());
        assert!(Error::already_open(TransportState::Opening).is_precondition());
        assert!(!Error::connection("test").is_precondition());
    }

    #[test]
    fn test_is_transport_error() {
        assert!(Error::connection("test").is_transport_error());
        assert!(Error::ConnectionClosed.is_transport_error());
        assert!(!Error::NotOpen.is_transport_error());
        assert!(!Error::unsupported_operation("Compression").is_transport_error());
    }

    #[test]
    fn test_is_unsupported() {
        assert!(Error::unsupported_operation("Encryption").is_unsupported());
        assert!(!Error::NotOpen.is_unsupported());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_codec_error());
    }

    #[test]
    fn test_invalid_target() {
        let err = Error::invalid_target("not a uri", "relative URL without a base");
        assert!(err.to_string().contains("not a uri"));
        assert!(!err.is_transport_error());
    }
}
