//! Transport trait.
//!
//! Core contract every envelope transport implements. The only
//! implementation in this crate is
//! [`WebSocketTransport`](crate::transport::WebSocketTransport); the trait
//! exists so session layers can stay generic over the carrier.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{Envelope, SessionCompression, SessionEncryption};

use super::state::TransportState;

// ============================================================================
// Transport
// ============================================================================

/// A full-duplex envelope carrier with an explicit lifecycle.
///
/// Implementations own exactly one underlying connection at a time. `open`
/// and `close` suspend until the lifecycle transition completes; `send`
/// never suspends. Inbound envelopes and lifecycle transitions are reported
/// through the listener installed on the concrete transport.
///
/// # Object Safety
///
/// This trait is object-safe, so `Box<dyn Transport>` works for dynamic
/// dispatch.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Opens a connection to the given target URI.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if a connection is already live, a
    /// configuration error for an unparseable target, or a transport error
    /// if the handshake fails.
    async fn open(&self, target: &str) -> Result<()>;

    /// Closes the current connection.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the connection is not open, or a
    /// transport error if the shutdown fails.
    async fn close(&self) -> Result<()>;

    /// Sends one envelope. Fire-and-forget: delivery confirmation is not
    /// part of the contract.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the connection is not open, or a
    /// codec error if the envelope cannot be serialized.
    fn send(&self, envelope: &Envelope) -> Result<()>;

    /// Returns the current lifecycle state.
    fn state(&self) -> TransportState;

    /// Returns the encryption mode selected for the current connection.
    fn encryption(&self) -> SessionEncryption;

    /// Returns the compression mode selected for the current connection.
    fn compression(&self) -> SessionCompression;

    /// Returns the fixed set of supported encryption modes.
    fn supported_encryption(&self) -> &'static [SessionEncryption];

    /// Returns the fixed set of supported compression modes.
    fn supported_compression(&self) -> &'static [SessionCompression];

    /// Requests an encryption change.
    ///
    /// # Errors
    ///
    /// This transport does not negotiate; the call always fails with an
    /// unsupported-operation error.
    fn set_encryption(&self, encryption: SessionEncryption) -> Result<()>;

    /// Requests a compression change.
    ///
    /// # Errors
    ///
    /// This transport does not negotiate; the call always fails with an
    /// unsupported-operation error.
    fn set_compression(&self, compression: SessionCompression) -> Result<()>;
}
