//! # Vectara Core
//!
//! Pure SDK logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for authentication, indexing and corpus admin
//! - The batch index coordinator
//! - Corpus lifecycle management
//! - Query request construction and response checks
//!
//! ## Architecture Principles
//! - Only depends on `vectara-domain`
//! - No HTTP, filesystem or database code
//! - All external dependencies via traits

pub mod auth;
pub mod batch;
pub mod corpus;
pub mod query;

pub use auth::{AuthHeaders, AuthStrategy};
pub use batch::{BatchIndexCoordinator, BatchReport, DocumentIndexer, DocumentOutcome};
pub use corpus::{CorpusAdmin, CorpusManager};
pub use query::{build_query_request, evaluate_response, has_citation};
