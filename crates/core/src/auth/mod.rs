//! Credential handling

pub mod ports;

pub use ports::{AuthHeaders, AuthStrategy};
