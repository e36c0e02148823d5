//! Local SQLite persistence

pub mod manager;
pub mod mirror;

pub use manager::{DbManager, SqliteConnection};
pub use mirror::{MirrorStore, StoredQuestion};
