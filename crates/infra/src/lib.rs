//! # Vectara Infrastructure
//!
//! Infrastructure implementations of the core SDK ports.
//!
//! This crate contains:
//! - The HTTP transport and call transcript
//! - API key and OAuth2 auth strategies
//! - Configuration loading (JSON, files, home directory, environment)
//! - Service facades and the client factory
//! - A local SQLite mirror
//!
//! ## Architecture
//! - Implements traits defined in `vectara-core`
//! - Depends on `vectara-domain` and `vectara-core`
//! - Contains all "impure" code (network, filesystem, database)

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod factory;
pub mod http;
pub mod observability;
pub mod services;

// Re-export commonly used items
pub use auth::{auth_strategy_for, ApiKeyAuth, OAuth2Auth};
pub use config::ConfigLoader;
pub use database::{DbManager, MirrorStore, StoredQuestion};
pub use errors::InfraError;
pub use factory::{Client, ClientFactory};
pub use http::{FileSource, HttpClient, RequestUtil, TranscriptEntry};
pub use observability::init_tracing;
pub use services::{AdminService, DocumentService, IndexerService, QueryService};
