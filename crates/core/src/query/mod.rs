//! Query construction and response checks
//!
//! Building the request and judging the response are pure functions; the
//! HTTP call itself lives in the infrastructure layer.

pub mod evaluation;
pub mod request;

pub use evaluation::{evaluate_response, has_citation};
pub use request::build_query_request;
