//! Studio Storage Layer
//!
//! SQLite-backed persistence for workbench state that outlives a page load:
//! the open tab strip, the tab recency history and small settings.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
