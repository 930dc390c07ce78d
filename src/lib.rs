//! LIME WebSocket transport.
//!
//! This library carries LIME JSON envelopes over a WebSocket connection,
//! exposing the socket's event-driven lifecycle as an explicit asynchronous
//! contract.
//!
//! # Architecture
//!
//! The transport is a thin adapter around one socket at a time:
//!
//! - [`WebSocketTransport`] owns the connection and its event-loop task
//! - `open`/`close` suspend until the lifecycle transition completes;
//!   `send` is fire-and-forget and never suspends
//! - A [`TransportListener`] observes open, close, error, and inbound
//!   envelopes; every hook defaults to a no-op
//! - Envelopes are opaque JSON values, one text frame each
//!
//! Protocol logic above the envelope (session negotiation, routing,
//! receipts) is deliberately out of scope, as are reconnection, queuing,
//! and backpressure: failures are reported once and retry policy belongs
//! to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use lime_ws::{Envelope, WebSocketTransport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> lime_ws::Result<()> {
//!     let transport = WebSocketTransport::new();
//!
//!     // Connect, requesting the lime subprotocol
//!     transport.open("wss://host.example/messaging").await?;
//!
//!     // Fire-and-forget envelope send
//!     transport.send(&Envelope::new(json!({"id": "1", "method": "get"})))?;
//!
//!     transport.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | [`Envelope`] and session capability descriptors |
//! | [`transport`] | [`WebSocketTransport`], listener, state, tracing |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Envelope codec and session capability descriptors.
pub mod protocol;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{Envelope, SessionCompression, SessionEncryption};

// Transport types
pub use transport::{
    Direction, LogTrace, NoopListener, NoopTrace, Transport, TransportListener, TransportState,
    WebSocketTransport, WebSocketTransportBuilder, WireTrace,
};
