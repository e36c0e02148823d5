//! Search and summarization

use std::sync::Arc;

use tracing::{info, instrument};
use vectara_core::{build_query_request, evaluate_response};
use vectara_domain::{BatchQueryResponse, QueryOptions, ResponseSet, Result};

use crate::http::RequestUtil;

pub struct QueryService {
    request_util: Arc<RequestUtil>,
    customer_id: u64,
}

impl QueryService {
    pub fn new(request_util: Arc<RequestUtil>, customer_id: u64) -> Self {
        Self { request_util, customer_id }
    }

    /// Run one query over `corpus_ids` and return its result set.
    ///
    /// When `options.summary` is set the summary is checked for a failed
    /// status and for citations, see [`evaluate_response`].
    #[instrument(skip(self, options), fields(summary = options.summary))]
    pub fn query(&self, query_text: &str, corpus_ids: &[u64], options: &QueryOptions) -> Result<ResponseSet> {
        let request = build_query_request(query_text, corpus_ids, self.customer_id, options)?;
        let response: BatchQueryResponse = self.request_util.post("query", &request)?;

        let response_set = evaluate_response(response, options.summary)?;
        info!(results = response_set.response.len(), "Query answered");
        Ok(response_set)
    }
}
