//! WebSocket transport layer.
//!
//! This module maps the socket's raw events onto an explicit connection
//! lifecycle with deferred open/close outcomes and listener notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                         ┌─────────────────┐
//! │  Caller              │                         │  Remote host    │
//! │                      │        WebSocket        │                 │
//! │  WebSocketTransport  │◄───────────────────────►│  LIME session   │
//! │  → event loop task   │     one JSON envelope   │  peer           │
//! │  → TransportListener │        per frame        │                 │
//! └──────────────────────┘                         └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `WebSocketTransport::open` - Handshake, spawn the event loop
//! 2. `WebSocketTransport::send` - Queue envelopes for the wire
//! 3. `TransportListener` - Observe envelopes, errors, close
//! 4. `WebSocketTransport::close` - Shut the connection down
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `listener` | Lifecycle listener trait and no-op default |
//! | `state` | Connection lifecycle state |
//! | `trace` | Wire-frame diagnostic sink |
//! | `transport_trait` | Core transport contract |
//! | `websocket` | WebSocket transport and event loop |

// ============================================================================
// Submodules
// ============================================================================

/// Transport lifecycle listener.
pub mod listener;

/// Connection lifecycle state.
pub mod state;

/// Wire-frame diagnostic sink.
pub mod trace;

/// Core transport contract.
pub mod transport_trait;

/// WebSocket transport and event loop.
pub mod websocket;

// ============================================================================
// Re-exports
// ============================================================================

pub use listener::{NoopListener, TransportListener};
pub use state::TransportState;
pub use trace::{Direction, LogTrace, NoopTrace, WireTrace};
pub use transport_trait::Transport;
pub use websocket::{WebSocketTransport, WebSocketTransportBuilder};
