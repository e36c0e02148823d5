//! Shared fixtures for infra integration tests
//!
//! The mock server runs on its own threads; the tokio runtime here only
//! drives the async wiremock API. SDK calls are blocking and must be made
//! outside `block_on`.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use vectara_domain::ClientSettings;
use vectara_infra::{Client, ClientFactory, ConfigLoader};
use wiremock::{Mock, MockServer, Request};

pub const CUSTOMER_ID: u64 = 12344;
pub const API_KEY: &str = "BLAH_KEY";
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Mock server plus the runtime used to drive it.
///
/// Field order matters: the server is verified and dropped before the
/// runtime.
pub struct TestServer {
    pub server: MockServer,
    pub runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("tokio runtime should start");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn settings(&self) -> ClientSettings {
        ClientSettings::default().with_base_url(self.uri())
    }

    pub fn received_requests(&self) -> Vec<Request> {
        self.runtime.block_on(self.server.received_requests()).unwrap_or_default()
    }

    pub fn api_key_client(&self) -> Client {
        self.client_from(api_key_config())
    }

    pub fn oauth2_client(&self) -> Client {
        let config = json!({
            "customer_id": CUSTOMER_ID.to_string(),
            "auth": {
                "app_client_id": "test-client",
                "app_client_secret": "test-secret",
                "auth_url": format!("{}{TOKEN_PATH}", self.uri()),
            }
        });
        self.client_from(config)
    }

    pub fn client_from(&self, config: Value) -> Client {
        ClientFactory::from_loader(ConfigLoader::json(config.to_string(), None))
            .with_settings(self.settings())
            .build()
            .expect("client should build from test config")
    }
}

pub fn api_key_config() -> Value {
    json!({ "customer_id": CUSTOMER_ID.to_string(), "auth": { "api_key": API_KEY } })
}

pub fn ok_status() -> Value {
    json!({ "code": "OK" })
}

pub fn token_body(token: &str, expires_in: i64) -> Value {
    json!({ "access_token": token, "expires_in": expires_in, "token_type": "Bearer" })
}
