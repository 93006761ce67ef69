//! Per-caller session tokens.
//!
//! A signed-in caller holds an opaque token; the session table maps it to a
//! user id. Each caller's identity is therefore independent of every other
//! caller's, and signing out only ends the caller's own session.

use std::fmt;

use uuid::Uuid;

/// Opaque random session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate an unguessable token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token previously rendered with [`fmt::Display`].
    ///
    /// Returns `None` for anything that is not a UUID; such values can only
    /// come from a tampered or stale cookie.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
