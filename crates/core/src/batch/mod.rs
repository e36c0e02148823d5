//! Concurrent batch indexing
//!
//! This module provides the port for indexing a single document and the
//! coordinator that fans a document list out over worker threads.

pub mod coordinator;
pub mod ports;

pub use coordinator::{BatchIndexCoordinator, BatchReport, DocumentOutcome};
pub use ports::DocumentIndexer;
