//! SDK constants
//!
//! Centralized location for endpoints, defaults and protocol constants.

// Endpoints
pub const DEFAULT_BASE_URL: &str = "https://api.vectara.io/v1";
pub const DEFAULT_OAUTH2_URL_TEMPLATE: &str =
    "https://vectara-prod-{customer_id}.auth.us-west-2.amazoncognito.com/oauth2/token";

// Authentication
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5;
pub const API_KEY_CUSTOMER_HEADER: &str = "customer-id";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const OAUTH2_CUSTOMER_HEADER: &str = "Customer-Id";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

// Configuration
pub const HOME_CONFIG_FILE_NAME: &str = ".vectara_config";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Query defaults
pub const DEFAULT_SUMMARIZER: &str = "vectara-summary-ext-v1.2.0";
pub const DEFAULT_RESPONSE_LANG: &str = "en";
pub const DEFAULT_SUMMARY_RESULT_COUNT: u32 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_LEXICAL_LAMBDA: f64 = 0.025;
pub const MMR_RERANKER_ID: u64 = 272_725_718;
pub const MMR_DIVERSITY_BIAS: f64 = 0.3;

// Listing
pub const LIST_DOCUMENTS_PAGE_SIZE: u32 = 100;
pub const LIST_API_KEYS_PAGE_SIZE: u32 = 10;
