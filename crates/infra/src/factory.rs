//! Client assembly
//!
//! [`ClientFactory`] loads and validates configuration, builds the auth
//! strategy for the resolved variant and wires every service onto one
//! shared [`RequestUtil`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use vectara_core::CorpusManager;
use vectara_domain::{ClientConfig, ClientSettings, Result, VectaraError};

use crate::auth::auth_strategy_for;
use crate::config::ConfigLoader;
use crate::http::{HttpClient, RequestUtil, TranscriptEntry};
use crate::services::{AdminService, DocumentService, IndexerService, QueryService};

/// Builds a [`Client`] from a config path, a JSON string or the home file
#[derive(Debug, Clone)]
pub struct ClientFactory {
    loader: ConfigLoader,
    settings: ClientSettings,
}

impl ClientFactory {
    /// The first source given wins: `config_path`, then `config_json`,
    /// then `~/.vectara_config`.
    pub fn new(config_path: Option<PathBuf>, config_json: Option<String>, profile: Option<&str>) -> Self {
        let loader = match (config_path, config_json) {
            (Some(path), _) => {
                info!("Factory will load configuration from path");
                ConfigLoader::path(path, profile)
            }
            (None, Some(json)) => {
                info!("Factory will load configuration from JSON");
                ConfigLoader::json(json, profile)
            }
            (None, None) => {
                info!("Factory will load configuration from home directory");
                ConfigLoader::home(profile)
            }
        };
        Self::from_loader(loader)
    }

    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self { loader, settings: ClientSettings::default() }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ClientSettings) -> Self {
        self.settings = settings;
        self
    }

    /// # Errors
    ///
    /// Configuration errors of every stage, or
    /// [`VectaraError::AuthConfiguration`] if the credentials are unusable.
    /// No network call is made.
    pub fn build(&self) -> Result<Client> {
        let config = self.loader.load()?;
        Client::from_config(config, &self.settings)
    }
}

/// Every service of one account, sharing one transport
pub struct Client {
    config: ClientConfig,
    customer_id: u64,
    request_util: Arc<RequestUtil>,
    admin: Arc<AdminService>,
    indexer: Arc<IndexerService>,
    query: QueryService,
    documents: DocumentService,
    corpus_manager: CorpusManager,
}

impl Client {
    pub fn from_config(config: ClientConfig, settings: &ClientSettings) -> Result<Self> {
        config.ensure_valid()?;
        let customer_id = config.customer_id.trim().parse::<u64>().map_err(|_| {
            VectaraError::ConfigValidation(vec![format!(
                "customer_id must be numeric, got [{}]",
                config.customer_id
            )])
        })?;
        info!(customer_id, auth_type = config.auth.auth_type(), "Building client");

        let http = HttpClient::builder().timeout(settings.timeout).build()?;
        let auth = auth_strategy_for(&config, http.clone())?;
        let request_util = Arc::new(RequestUtil::with_client(http, &settings.base_url, auth));

        let admin = Arc::new(AdminService::new(request_util.clone(), customer_id));
        let indexer = Arc::new(IndexerService::new(request_util.clone(), customer_id));
        let corpus_manager = CorpusManager::new(admin.clone(), indexer.clone());

        Ok(Self {
            query: QueryService::new(request_util.clone(), customer_id),
            documents: DocumentService::new(request_util.clone()),
            config,
            customer_id,
            request_util,
            admin,
            indexer,
            corpus_manager,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn customer_id(&self) -> u64 {
        self.customer_id
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }

    pub fn indexer(&self) -> &IndexerService {
        &self.indexer
    }

    pub fn query(&self) -> &QueryService {
        &self.query
    }

    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    pub fn corpus_manager(&self) -> &CorpusManager {
        &self.corpus_manager
    }

    pub fn request_util(&self) -> &Arc<RequestUtil> {
        &self.request_util
    }

    /// Every call sent so far, oldest first
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.request_util.transcript()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("customer_id", &self.customer_id)
            .field("auth_type", &self.config.auth.auth_type())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use vectara_domain::ErrorKind;

    use super::*;

    const API_KEY_CONFIG: &str = r#"{"customer_id":"12344","auth":{"api_key":"BLAH_KEY"}}"#;

    #[test]
    fn test_build_from_json() {
        let client = ClientFactory::new(None, Some(API_KEY_CONFIG.to_string()), None).build().unwrap();

        assert_eq!(client.customer_id(), 12344);
        assert_eq!(client.request_util().auth_type(), "ApiKey");
        assert!(client.transcript().is_empty());
    }

    #[test]
    fn test_non_numeric_customer_id_fails_validation() {
        let json = r#"{"customer_id":"acme","auth":{"api_key":"k"}}"#;
        let err = ClientFactory::new(None, Some(json.to_string()), None).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigValidation);
    }

    #[test]
    fn test_path_takes_precedence_over_json() {
        let factory = ClientFactory::new(
            Some(PathBuf::from("/no/such/file.json")),
            Some(API_KEY_CONFIG.to_string()),
            None,
        );
        assert_eq!(factory.build().unwrap_err().kind(), ErrorKind::Io);
    }
}
