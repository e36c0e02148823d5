//! OAuth2 client-credentials authentication
//!
//! Tokens are fetched lazily on the first header request and refreshed
//! when they are within [`TOKEN_REFRESH_MARGIN_SECS`] of expiry. The
//! check-then-refresh runs under one lock, so threads sharing an
//! [`OAuth2Auth`] wait for a single in-flight exchange and then reuse its
//! token.

use std::fmt;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use vectara_core::{AuthHeaders, AuthStrategy};
use vectara_domain::constants::{
    AUTHORIZATION_HEADER, DEFAULT_OAUTH2_URL_TEMPLATE, OAUTH2_CUSTOMER_HEADER,
    TOKEN_REFRESH_MARGIN_SECS,
};
use vectara_domain::types::auth::TOKEN_OPERATION;
use vectara_domain::{AuthSession, OAuth2AuthConfig, Result, VectaraError};

use crate::errors::InfraError;
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Bearer-token credentials for an OAuth2 application
pub struct OAuth2Auth {
    http: HttpClient,
    customer_id: String,
    client_id: String,
    client_secret: String,
    auth_url: String,
    session: Mutex<Option<AuthSession>>,
}

impl OAuth2Auth {
    /// Validate the credentials and resolve the token URL.
    ///
    /// Without an explicit `auth_url` the URL is derived from the customer
    /// id. Nothing is fetched until the first header request.
    ///
    /// # Errors
    ///
    /// Returns [`VectaraError::AuthConfiguration`] when the customer id,
    /// client id or client secret is empty.
    pub fn new(customer_id: &str, config: &OAuth2AuthConfig, http: HttpClient) -> Result<Self> {
        if customer_id.trim().is_empty() {
            return Err(VectaraError::AuthConfiguration(
                "a customer id is required for OAuth2 authentication".into(),
            ));
        }
        if config.app_client_id.trim().is_empty() {
            return Err(VectaraError::AuthConfiguration("app_client_id must not be empty".into()));
        }
        if config.app_client_secret.trim().is_empty() {
            return Err(VectaraError::AuthConfiguration(
                "app_client_secret must not be empty".into(),
            ));
        }

        let auth_url = match config.auth_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                info!(auth_url = %url, "Using provided OAuth2 URL");
                url.to_string()
            }
            None => {
                let url = DEFAULT_OAUTH2_URL_TEMPLATE.replace("{customer_id}", customer_id);
                info!(auth_url = %url, "No OAuth2 URL provided, derived default from customer id");
                url
            }
        };

        Ok(Self {
            http,
            customer_id: customer_id.to_string(),
            client_id: config.app_client_id.clone(),
            client_secret: config.app_client_secret.clone(),
            auth_url,
            session: Mutex::new(None),
        })
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Current session, if a token has been fetched
    pub fn session(&self) -> Option<AuthSession> {
        self.session.lock().clone()
    }

    /// Run a client-credentials exchange now and replace the session.
    ///
    /// # Errors
    ///
    /// Transport failures, non-200 answers and undecodable token responses
    /// are returned unchanged.
    pub fn authenticate(&self) -> Result<AuthSession> {
        let mut session = self.session.lock();
        let fresh = self.exchange()?;
        *session = Some(fresh.clone());
        Ok(fresh)
    }

    /// The cached token, refreshed first when unset or about to expire.
    pub fn token(&self) -> Result<String> {
        let mut session = self.session.lock();
        let now = Utc::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        match session.as_ref() {
            Some(current) if !current.is_expiring(now, margin) => {
                debug!(expires_at = %current.expires_at, "Reusing OAuth2 token");
                return Ok(current.access_token.clone());
            }
            Some(current) => {
                info!(expires_at = %current.expires_at, "Token expiry within margin, refreshing");
            }
            None => info!("First token request, authenticating"),
        }

        let fresh = self.exchange()?;
        let token = fresh.access_token.clone();
        *session = Some(fresh);
        Ok(token)
    }

    #[instrument(skip(self), fields(auth_url = %self.auth_url, client_id = %self.client_id))]
    fn exchange(&self) -> Result<AuthSession> {
        let issued_at = Utc::now();
        let builder = self
            .http
            .request(Method::POST, &self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")]);
        let response = self.http.send(builder)?;

        let status = response.status();
        let body = response.text().map_err(InfraError::from)?;
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "OAuth2 token exchange failed");
            return Err(VectaraError::from_status(status.as_u16(), body));
        }

        let grant: TokenResponse =
            serde_json::from_str(&body).map_err(|err| VectaraError::ResponseDecode {
                operation: TOKEN_OPERATION.to_string(),
                message: err.to_string(),
            })?;

        let expires_in = grant.expires_in;
        let session = AuthSession::from_grant(grant.access_token, expires_in, issued_at)
            .inspect_err(|_| error!(expires_in, "OAuth2 token lifetime out of range"))?;
        info!(expires_at = %session.expires_at, "Received OAuth2 token");
        Ok(session)
    }
}

impl AuthStrategy for OAuth2Auth {
    fn headers(&self) -> Result<AuthHeaders> {
        let token = self.token()?;
        Ok(AuthHeaders::from([
            (OAUTH2_CUSTOMER_HEADER.to_string(), self.customer_id.clone()),
            (AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}")),
        ]))
    }

    fn auth_type(&self) -> &'static str {
        "OAuth2"
    }
}

impl fmt::Debug for OAuth2Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Auth")
            .field("customer_id", &self.customer_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use vectara_domain::ErrorKind;

    use super::*;

    fn config(auth_url: Option<&str>) -> OAuth2AuthConfig {
        OAuth2AuthConfig {
            app_client_id: "client".into(),
            app_client_secret: "s3cr3t-value".into(),
            auth_url: auth_url.map(str::to_string),
        }
    }

    #[test]
    fn test_default_url_derived_from_customer_id() {
        let auth = OAuth2Auth::new("1234", &config(None), HttpClient::new().unwrap()).unwrap();
        assert_eq!(
            auth.auth_url(),
            "https://vectara-prod-1234.auth.us-west-2.amazoncognito.com/oauth2/token"
        );
        assert!(auth.session().is_none());
    }

    #[test]
    fn test_explicit_url_wins() {
        let http = HttpClient::new().unwrap();
        let auth = OAuth2Auth::new("1234", &config(Some("http://localhost/token")), http).unwrap();
        assert_eq!(auth.auth_url(), "http://localhost/token");
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let http = HttpClient::new().unwrap();
        let mut bad = config(None);
        bad.app_client_secret = String::new();

        assert_eq!(
            OAuth2Auth::new("1", &bad, http.clone()).unwrap_err().kind(),
            ErrorKind::AuthConfiguration
        );
        assert_eq!(
            OAuth2Auth::new("", &config(None), http).unwrap_err().kind(),
            ErrorKind::AuthConfiguration
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = OAuth2Auth::new("1", &config(None), HttpClient::new().unwrap()).unwrap();
        assert!(!format!("{auth:?}").contains("s3cr3t-value"));
    }
}
