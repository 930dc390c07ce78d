//! Connection lifecycle state.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// TransportState
// ============================================================================

/// Lifecycle state of a transport's underlying connection.
///
/// # Transitions
///
/// ```text
/// Idle --(open)--> Opening --(handshake)--> Open --(close)--> Closing --> Closed
///                     |                       |                  |
///                     +-----------------------+------------------+--> Failed
/// ```
///
/// `Closed` and `Failed` are terminal for the current handle; a fresh `open`
/// binds a new handle and restarts the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportState {
    /// No connection has been attempted yet.
    #[default]
    Idle,
    /// Handshake in progress.
    Opening,
    /// Connection established; send and close are valid.
    Open,
    /// Close requested, waiting for the handle to shut down.
    Closing,
    /// Connection shut down cleanly.
    Closed,
    /// Connection terminated by a transport error.
    Failed,
}

impl TransportState {
    /// Returns `true` if the connection is established.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if the current handle has reached a terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }

    /// Returns `true` if a new connection may be opened from this state.
    #[inline]
    #[must_use]
    pub const fn can_open(self) -> bool {
        matches!(self, Self::Idle | Self::Closed | Self::Failed)
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(TransportState::default(), TransportState::Idle);
    }

    #[test]
    fn test_is_open() {
        assert!(TransportState::Open.is_open());
        assert!(!TransportState::Opening.is_open());
        assert!(!TransportState::Closing.is_open());
    }

    #[test]
    fn test_is_terminal() {
        assert!(TransportState::Closed.is_terminal());
        assert!(TransportState::Failed.is_terminal());
        assert!(!TransportState::Idle.is_terminal());
        assert!(!TransportState::Open.is_terminal());
    }

    #[test]
    fn test_can_open() {
        assert!(TransportState::Idle.can_open());
        assert!(TransportState::Closed.can_open());
        assert!(TransportState::Failed.can_open());
        assert!(!TransportState::Opening.can_open());
        assert!(!TransportState::Open.can_open());
        assert!(!TransportState::Closing.can_open());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransportState::Open.to_string(), "open");
        assert_eq!(TransportState::Failed.to_string(), "failed");
    }
}
