//! HTTP transport

pub mod client;
pub mod request_util;
pub mod upload;

pub use client::{HttpClient, HttpClientBuilder};
pub use request_util::{RequestUtil, TranscriptEntry};
pub use upload::{FileSource, ProgressCallback, ProgressReader};
