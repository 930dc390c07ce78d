//! Session capability descriptors.
//!
//! Confidentiality and compression modes a transport can report for session
//! negotiation. This transport does not negotiate: its supported sets are
//! constants, and the selected encryption is derived from the connection
//! target alone.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Scheme fragment that selects transport-layer encryption.
const SECURE_SCHEME: &str = "wss://";

// ============================================================================
// SessionEncryption
// ============================================================================

/// Confidentiality mode of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionEncryption {
    /// Plaintext transport.
    #[default]
    None,
    /// Transport-layer encryption.
    Tls,
}

impl SessionEncryption {
    /// Encryption modes the WebSocket transport supports.
    pub const SUPPORTED: &'static [Self] = &[Self::Tls, Self::None];

    /// Selects the encryption mode implied by a connection target.
    ///
    /// Containment test, not a prefix test: a target mentioning `wss://`
    /// anywhere selects [`Self::Tls`]. The match is case-sensitive.
    #[must_use]
    pub fn from_target(target: &str) -> Self {
        if target.contains(SECURE_SCHEME) {
            Self::Tls
        } else {
            Self::None
        }
    }

    /// Returns the wire name of this mode.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tls => "tls",
        }
    }
}

impl fmt::Display for SessionEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SessionCompression
// ============================================================================

/// Compression mode of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionCompression {
    /// Uncompressed frames.
    #[default]
    None,
    /// Gzip-compressed frames. Defined by the protocol, never offered by
    /// this transport.
    Gzip,
}

impl SessionCompression {
    /// Compression modes the WebSocket transport supports.
    pub const SUPPORTED: &'static [Self] = &[Self::None];

    /// Returns the wire name of this mode.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for SessionCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_from_target_secure() {
        assert_eq!(
            SessionEncryption::from_target("wss://host.example/messaging"),
            SessionEncryption::Tls
        );
    }

    #[test]
    fn test_from_target_plaintext() {
        assert_eq!(
            SessionEncryption::from_target("ws://host.example/messaging"),
            SessionEncryption::None
        );
    }

    #[test]
    fn test_from_target_is_containment_not_prefix() {
        // The scheme fragment is matched anywhere in the target, so a
        // plaintext URI that merely mentions wss:// still selects TLS.
        assert_eq!(
            SessionEncryption::from_target("http://host.example/wss://elsewhere"),
            SessionEncryption::Tls
        );
    }

    #[test]
    fn test_from_target_case_sensitive() {
        assert_eq!(
            SessionEncryption::from_target("WSS://host.example"),
            SessionEncryption::None
        );
    }

    #[test]
    fn test_supported_sets() {
        assert_eq!(
            SessionEncryption::SUPPORTED,
            &[SessionEncryption::Tls, SessionEncryption::None]
        );
        assert_eq!(SessionCompression::SUPPORTED, &[SessionCompression::None]);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(SessionEncryption::None.to_string(), "none");
        assert_eq!(SessionEncryption::Tls.to_string(), "tls");
        assert_eq!(SessionCompression::None.to_string(), "none");
        assert_eq!(SessionCompression::Gzip.to_string(), "gzip");
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&SessionEncryption::Tls).expect("serialize"),
            r#""tls""#
        );
        assert_eq!(
            serde_json::from_str::<SessionCompression>(r#""gzip""#).expect("parse"),
            SessionCompression::Gzip
        );
    }

    proptest! {
        #[test]
        fn prop_any_target_containing_wss_selects_tls(prefix in ".*", suffix in ".*") {
            let target = format!("{prefix}wss://{suffix}");
            prop_assert_eq!(SessionEncryption::from_target(&target), SessionEncryption::Tls);
        }

        #[test]
        fn prop_targets_without_wss_select_none(target in ".*") {
            prop_assume!(!target.contains("wss://"));
            prop_assert_eq!(SessionEncryption::from_target(&target), SessionEncryption::None);
        }
    }
}
