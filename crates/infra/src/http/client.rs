use std::time::Duration;

use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::Method;
use tracing::debug;
use vectara_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use vectara_domain::{Result, VectaraError};

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("vectara-rs/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client with a request timeout and the SDK user agent.
///
/// Every call is a single attempt; failures surface to the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    pub fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(InfraError::from)?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request) {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS) }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| {
                VectaraError::Internal(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use tokio::runtime::Runtime;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn sends_user_agent_and_returns_response() {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/ping"))
                .and(header("user-agent", USER_AGENT))
                .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
                .expect(1)
                .mount(&server)
                .await;
            server
        });

        let client = HttpClient::builder().timeout(Duration::from_secs(5)).build().unwrap();
        let response =
            client.send(client.request(Method::GET, format!("{}/ping", server.uri()))).unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().unwrap(), "pong");
    }

    #[test]
    fn non_success_status_is_returned_not_raised() {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;
            server
        });

        let client = HttpClient::new().unwrap();
        let response = client.send(client.request(Method::POST, server.uri())).unwrap();
        assert_eq!(response.status().as_u16(), 503);
    }
}
