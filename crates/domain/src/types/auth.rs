//! OAuth2 session state

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VectaraError};

/// Operation name reported when a token grant cannot be turned into a session
pub const TOKEN_OPERATION: &str = "oauth2-token";

/// Bearer token obtained from a client-credentials exchange.
///
/// Lives only in memory; a new process always starts unauthenticated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds as reported by the token endpoint
    pub expires_in: i64,
}

impl AuthSession {
    /// Build a session from a token grant issued at `issued_at`.
    ///
    /// Fails with [`VectaraError::ResponseDecode`] when `expires_in` puts the
    /// expiry outside the representable date range.
    pub fn from_grant(
        access_token: impl Into<String>,
        expires_in: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<Self> {
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| VectaraError::ResponseDecode {
                operation: TOKEN_OPERATION.to_string(),
                message: format!("expires_in of {expires_in} seconds is out of range"),
            })?;

        Ok(Self { access_token: access_token.into(), expires_at, expires_in })
    }

    /// Whether the token expires within `margin` of `now` (or already has)
    pub fn is_expiring(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at.checked_sub_signed(margin) {
            Some(deadline) => now > deadline,
            None => true,
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_margin() {
        let issued = Utc::now();
        let session = AuthSession::from_grant("token", 3600, issued).unwrap();
        assert_eq!(session.expires_at, issued + Duration::seconds(3600));

        let margin = Duration::seconds(5);
        assert!(!session.is_expiring(issued, margin));
        assert!(session.is_expiring(issued + Duration::seconds(3596), margin));
        assert!(session.is_expiring(issued + Duration::seconds(7200), margin));
    }

    #[test]
    fn test_already_expired_grant() {
        let session =
            AuthSession::from_grant("token", 0, Utc::now() - Duration::seconds(10)).unwrap();
        assert!(session.is_expiring(Utc::now(), Duration::seconds(5)));
        assert!(!format!("{session:?}").contains("\"token\""));
    }

    #[test]
    fn test_out_of_range_lifetime_is_rejected() {
        let issued = Utc::now();
        for expires_in in [10_000_000_000_000, i64::MAX, -10_000_000_000_000, i64::MIN] {
            let err = AuthSession::from_grant("token", expires_in, issued).unwrap_err();
            assert_eq!(err.kind(), crate::errors::ErrorKind::ResponseDecode);
            assert!(err.to_string().contains(TOKEN_OPERATION), "{err}");
        }
    }
}
