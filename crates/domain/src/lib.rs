//! # Vectara Domain
//!
//! Data types shared by every layer of the SDK.
//!
//! This crate contains:
//! - Error taxonomy and the crate-wide `Result`
//! - Client configuration and the auth union
//! - Platform status codes and REST payloads
//! - Endpoint and protocol constants
//!
//! ## Architecture
//! - No dependencies on other SDK crates
//! - No I/O; pure data and validation

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
