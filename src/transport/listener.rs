//! Transport lifecycle listener.
//!
//! Consumers observe a transport through a [`TransportListener`] they inject
//! at construction (or swap in later). Every hook has a no-op default body,
//! so an implementation overrides only what it cares about:
//!
//! ```ignore
//! use lime_ws::{Envelope, TransportListener};
//!
//! struct Printer;
//!
//! impl TransportListener for Printer {
//!     fn on_envelope(&self, envelope: Envelope) {
//!         println!("received: {:?}", envelope);
//!     }
//! }
//! ```
//!
//! Hooks are invoked from the transport's event loop, one at a time, so a
//! listener never observes concurrent callbacks for the same connection.
//! Hook bodies should return quickly; a blocked hook stalls frame delivery.

// ============================================================================
// Imports
// ============================================================================

use crate::error::Error;
use crate::protocol::Envelope;

// ============================================================================
// TransportListener
// ============================================================================

/// Observer for transport lifecycle and inbound envelopes.
///
/// All hooks default to doing nothing.
pub trait TransportListener: Send + Sync {
    /// Fired once when the connection transitions to open.
    fn on_open(&self) {}

    /// Fired once when the connection transitions to closed, whether the
    /// close was requested locally or initiated by the remote side.
    fn on_close(&self) {}

    /// Fired on every transport-level failure.
    ///
    /// May fire more than once across the transport's life, e.g. once for a
    /// failed open and again for a later close failure.
    fn on_error(&self, error: &Error) {
        let _ = error;
    }

    /// Fired once per inbound envelope, in arrival order, for the whole of
    /// the connection's open lifetime.
    fn on_envelope(&self, envelope: Envelope) {
        let _ = envelope;
    }
}

// ============================================================================
// NoopListener
// ============================================================================

/// Listener that ignores every notification.
///
/// Installed by default on transports constructed without a listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl TransportListener for NoopListener {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_noop_listener_accepts_all_hooks() {
        let listener = NoopListener;
        listener.on_open();
        listener.on_envelope(Envelope::new(json!({"id": "1"})));
        listener.on_error(&Error::NotOpen);
        listener.on_close();
    }

    #[test]
    fn test_default_hooks_are_noops() {
        struct OnlyEnvelopes;
        impl TransportListener for OnlyEnvelopes {
            fn on_envelope(&self, envelope: Envelope) {
                assert_eq!(envelope.as_value()["id"], "7");
            }
        }

        let listener = OnlyEnvelopes;
        listener.on_open();
        listener.on_envelope(Envelope::new(json!({"id": "7"})));
        listener.on_close();
    }
}
