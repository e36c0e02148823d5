//! Corpus and API key administration

use std::sync::Arc;

use tracing::{info, instrument};
use vectara_core::CorpusAdmin;
use vectara_domain::constants::LIST_API_KEYS_PAGE_SIZE;
use vectara_domain::{
    ApiKeyData, ApiKeyFilter, ApiKeyType, Corpus, CorpusInfo, CorpusSizeRequest, CorpusSizeResponse,
    CreateApiKeyRequest, CreateApiKeyResponse, CreateCorpusRequest, CreateCorpusResponse,
    DeleteApiKeysRequest, DeleteCorpusRequest, DeleteCorpusResponse, EnableApiKeyRequest, KeyData,
    KeyEnablement, ListApiKeysRequest, ListApiKeysResponse, ListCorporaRequest, ListCorporaResponse,
    ModifyApiKeyResponse, ReadCorpusRequest, ReadCorpusResponse, Result, Status, VectaraError,
};

use super::{ensure_ok, PageKeys};
use crate::http::RequestUtil;

pub struct AdminService {
    request_util: Arc<RequestUtil>,
    customer_id: u64,
}

impl AdminService {
    pub fn new(request_util: Arc<RequestUtil>, customer_id: u64) -> Self {
        Self { request_util, customer_id }
    }

    /// Corpora whose name contains `filter`, sorted by name
    #[instrument(skip(self))]
    pub fn list_corpora(
        &self,
        filter: Option<&str>,
        num_results: Option<u32>,
        page_key: Option<&str>,
    ) -> Result<Vec<Corpus>> {
        let request = ListCorporaRequest {
            filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
            num_results,
            page_key: page_key.map(str::to_string),
        };

        let response: ListCorporaResponse = self.request_util.post("list-corpora", &request)?;
        let mut corpora = response.corpus;
        corpora.sort_by(|a, b| a.name.cmp(&b.name));

        info!(found = corpora.len(), "Listed corpora");
        Ok(corpora)
    }

    /// Everything the platform knows about one corpus
    pub fn read_corpus(&self, corpus_id: u64) -> Result<CorpusInfo> {
        let response: ReadCorpusResponse =
            self.request_util.post("read-corpus", &ReadCorpusRequest::everything(corpus_id))?;

        response.corpora.into_iter().next().ok_or_else(|| VectaraError::ResponseDecode {
            operation: "read-corpus".to_string(),
            message: format!("no information returned for corpus {corpus_id}"),
        })
    }

    /// # Errors
    ///
    /// [`VectaraError::UnexpectedStatus`] when the platform does not answer OK.
    #[instrument(skip(self, corpus), fields(name = %corpus.name))]
    pub fn create_corpus(&self, corpus: &Corpus) -> Result<CreateCorpusResponse> {
        let response: CreateCorpusResponse =
            self.request_util.post("create-corpus", &CreateCorpusRequest { corpus })?;
        ensure_ok("create-corpus", [&response.status])?;

        info!(corpus_id = response.corpus_id, "Created new corpus");
        Ok(response)
    }

    pub fn delete_corpus(&self, corpus_id: u64) -> Result<Status> {
        let request = DeleteCorpusRequest { customer_id: self.customer_id, corpus_id };
        let response: DeleteCorpusResponse = self.request_util.post("delete-corpus", &request)?;
        Ok(response.status)
    }

    pub fn calculate_corpus_size(&self, corpus_id: u64) -> Result<CorpusSizeResponse> {
        let request = CorpusSizeRequest { customer_id: self.customer_id, corpus_id };
        self.request_util.post("compute-corpus-size", &request)
    }

    /// Create one API key scoped to `corpus_ids` and return its id
    pub fn create_api_key(
        &self,
        corpus_ids: &[u64],
        key_type: ApiKeyType,
        description: Option<&str>,
    ) -> Result<String> {
        let request = CreateApiKeyRequest {
            api_key_data: vec![ApiKeyData {
                corpus_id: corpus_ids.to_vec(),
                api_key_type: key_type,
                description: description.map(str::to_string),
            }],
        };

        let response: CreateApiKeyResponse = self.request_util.post("create-api-key", &request)?;
        let created = response.response.into_iter().next().ok_or_else(|| {
            VectaraError::ResponseDecode {
                operation: "create-api-key".to_string(),
                message: "no key returned".to_string(),
            }
        })?;
        ensure_ok("create-api-key", [&created.status])?;

        Ok(created.key_id)
    }

    pub fn delete_api_keys(&self, key_ids: &[String]) -> Result<()> {
        let request = DeleteApiKeysRequest { key_id: key_ids.to_vec() };
        let response: ModifyApiKeyResponse = self.request_util.post("delete-api-key", &request)?;
        ensure_ok("delete-api-key", &response.status)
    }

    pub fn enable_api_key(&self, key_id: &str, enabled: bool) -> Result<()> {
        let request = EnableApiKeyRequest {
            key_enablement: vec![KeyEnablement { key_id: key_id.to_string(), enable: enabled }],
        };
        let response: ModifyApiKeyResponse = self.request_util.post("enable-api-key", &request)?;
        ensure_ok("enable-api-key", &response.status)
    }

    /// Every API key of the account, following pagination, that matches
    /// `filter`
    #[instrument(skip(self))]
    pub fn list_api_keys(&self, filter: &ApiKeyFilter) -> Result<Vec<KeyData>> {
        let mut keys = Vec::new();
        let mut page_key: Option<String> = None;
        let mut followed = PageKeys::default();

        loop {
            let request = ListApiKeysRequest {
                num_results: LIST_API_KEYS_PAGE_SIZE,
                page_key: page_key.take(),
                read_corpora_info: true,
            };
            let response: ListApiKeysResponse = self.request_util.post("list-api-keys", &request)?;
            info!(found = response.key_data.len(), "Fetched page of API keys");
            keys.extend(response.key_data);

            match followed.next("list-api-keys", response.page_key)? {
                Some(next) => page_key = Some(next),
                None => break,
            }
        }

        let total = keys.len();
        keys.retain(|key| filter.matches(key));
        info!(total, retained = keys.len(), "Filtered API keys");
        Ok(keys)
    }
}

impl CorpusAdmin for AdminService {
    fn list_corpora(&self, filter: Option<&str>) -> Result<Vec<Corpus>> {
        Self::list_corpora(self, filter, None, None)
    }

    fn create_corpus(&self, corpus: &Corpus) -> Result<CreateCorpusResponse> {
        Self::create_corpus(self, corpus)
    }

    fn delete_corpus(&self, corpus_id: u64) -> Result<Status> {
        Self::delete_corpus(self, corpus_id)
    }
}
