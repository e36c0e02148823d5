//! Batch query request construction

use vectara_domain::constants::{MMR_DIVERSITY_BIAS, MMR_RERANKER_ID};
use vectara_domain::{
    BatchQueryRequest, CorpusKey, LexicalInterpolation, MmrConfig, ModelParams, QueryBody,
    QueryOptions, RerankingConfig, Result, SummarizerRequest, VectaraError,
};

/// Build the single-query batch request for `query_text` over `corpus_ids`.
///
/// Every corpus key carries the same semantics, metadata filter, custom
/// dimensions and lexical interpolation. `start` is only sent when no
/// summary is requested.
///
/// # Errors
///
/// Returns [`VectaraError::InvalidArgument`] when no corpus is given, or
/// when a summary is requested without a response language.
pub fn build_query_request(
    query_text: &str,
    corpus_ids: &[u64],
    customer_id: u64,
    options: &QueryOptions,
) -> Result<BatchQueryRequest> {
    if corpus_ids.is_empty() {
        return Err(VectaraError::InvalidArgument("at least one corpus id is required".into()));
    }

    let corpus_key = corpus_ids
        .iter()
        .map(|&corpus_id| CorpusKey {
            customer_id: Some(customer_id),
            corpus_id,
            semantics: Some(options.semantics),
            dim: options.custom_dimensions.clone(),
            metadata_filter: options.metadata_filter.clone(),
            lexical_interpolation_config: Some(LexicalInterpolation {
                lambda: options.lexical_lambda,
            }),
        })
        .collect();

    let reranking_config = options.rerank.then_some(RerankingConfig {
        reranker_id: MMR_RERANKER_ID,
        mmr_config: Some(MmrConfig { diversity_bias: MMR_DIVERSITY_BIAS }),
    });

    let summary = if options.summary {
        if options.response_lang.trim().is_empty() {
            return Err(VectaraError::InvalidArgument(
                "a response language is required when requesting a summary".into(),
            ));
        }
        vec![SummarizerRequest {
            summarizer_prompt_name: options.summarizer.clone(),
            prompt_text: options.prompt_text.clone(),
            response_lang: options.response_lang.clone(),
            max_summarized_results: options.summary_result_count,
            debug: None,
            chat: None,
            model_params: options
                .temperature
                .map(|temperature| ModelParams { temperature: Some(temperature), ..ModelParams::default() }),
        }]
    } else {
        Vec::new()
    };

    Ok(BatchQueryRequest {
        query: vec![QueryBody {
            query: query_text.to_string(),
            query_context: None,
            start: (!options.summary).then_some(options.start),
            num_results: Some(options.page_size),
            context_config: Some(options.context_config.clone()),
            corpus_key,
            reranking_config,
            summary,
        }],
    })
}
