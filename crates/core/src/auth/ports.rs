//! Port interface for request authentication

use std::collections::BTreeMap;

use vectara_domain::Result;

/// Header name to value, as produced by an [`AuthStrategy`]
pub type AuthHeaders = BTreeMap<String, String>;

/// Produces the authentication headers for one account.
///
/// Implementations are shared between threads; any cached credential state
/// must be refreshed atomically.
pub trait AuthStrategy: Send + Sync {
    /// Headers to attach to the next request.
    ///
    /// # Errors
    ///
    /// Propagates any failure to obtain a credential, for example a failed
    /// OAuth2 token exchange.
    fn headers(&self) -> Result<AuthHeaders>;

    /// `"ApiKey"` or `"OAuth2"`
    fn auth_type(&self) -> &'static str;
}
