use std::fmt;

use vectara_core::{AuthHeaders, AuthStrategy};
use vectara_domain::constants::{API_KEY_CUSTOMER_HEADER, API_KEY_HEADER};
use vectara_domain::{Result, VectaraError};

/// Static API key credentials. No network I/O.
#[derive(Clone)]
pub struct ApiKeyAuth {
    customer_id: String,
    api_key: String,
}

impl ApiKeyAuth {
    /// # Errors
    ///
    /// Returns [`VectaraError::AuthConfiguration`] when the customer id or
    /// key is empty.
    pub fn new(customer_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let customer_id = customer_id.into();
        let api_key = api_key.into();

        if customer_id.trim().is_empty() {
            return Err(VectaraError::AuthConfiguration("customer id must not be empty".into()));
        }
        if api_key.trim().is_empty() {
            return Err(VectaraError::AuthConfiguration("API key must not be empty".into()));
        }

        Ok(Self { customer_id, api_key })
    }
}

impl AuthStrategy for ApiKeyAuth {
    fn headers(&self) -> Result<AuthHeaders> {
        Ok(AuthHeaders::from([
            (API_KEY_CUSTOMER_HEADER.to_string(), self.customer_id.clone()),
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
        ]))
    }

    fn auth_type(&self) -> &'static str {
        "ApiKey"
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("customer_id", &self.customer_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
