//! Auth strategy implementations

pub mod api_key;
pub mod oauth2;

use std::sync::Arc;

pub use api_key::ApiKeyAuth;
pub use oauth2::OAuth2Auth;
use tracing::info;
use vectara_core::AuthStrategy;
use vectara_domain::{AuthConfig, ClientConfig, Result};

use crate::http::HttpClient;

/// Build the strategy matching the resolved auth variant of `config`.
///
/// `http` is used for OAuth2 token exchanges only.
pub fn auth_strategy_for(config: &ClientConfig, http: HttpClient) -> Result<Arc<dyn AuthStrategy>> {
    info!(auth_type = config.auth.auth_type(), customer_id = %config.customer_id, "Building auth strategy");
    let strategy: Arc<dyn AuthStrategy> = match &config.auth {
        AuthConfig::ApiKey(api_key) => Arc::new(ApiKeyAuth::new(&config.customer_id, &api_key.api_key)?),
        AuthConfig::OAuth2(oauth2) => Arc::new(OAuth2Auth::new(&config.customer_id, oauth2, http)?),
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use vectara_domain::{ApiKeyAuthConfig, OAuth2AuthConfig};

    use super::*;

    #[test]
    fn test_strategy_follows_variant() {
        let http = HttpClient::new().unwrap();
        let api_key = ClientConfig::new(
            "1",
            AuthConfig::ApiKey(ApiKeyAuthConfig { api_key: "k".into() }),
        );
        let oauth2 = ClientConfig::new(
            "1",
            AuthConfig::OAuth2(OAuth2AuthConfig {
                app_client_id: "id".into(),
                app_client_secret: "secret".into(),
                auth_url: None,
            }),
        );

        assert_eq!(auth_strategy_for(&api_key, http.clone()).unwrap().auth_type(), "ApiKey");
        assert_eq!(auth_strategy_for(&oauth2, http).unwrap().auth_type(), "OAuth2");
    }
}
