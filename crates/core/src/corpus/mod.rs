//! Corpus lifecycle management

pub mod manager;
pub mod ports;

pub use manager::CorpusManager;
pub use ports::CorpusAdmin;
