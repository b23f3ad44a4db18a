//! Router contract
//!
//! Navigation is fire-and-forget: a push is a request that the router is
//! expected to apply before the next [`Router::location`] read.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::location::{Location, ROOT_PATH};

pub trait Router: Send + Sync {
    /// Current location
    fn location(&self) -> Location;

    /// Request navigation to `path`, adding a history entry
    fn push(&self, path: &str);
}

/// In-process router keeping its history entries in memory
pub struct MemoryRouter {
    /// Visited paths, current last
    entries: Arc<RwLock<Vec<String>>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::starting_at(ROOT_PATH)
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            entries: Arc::new(RwLock::new(vec![path.to_string()])),
        }
    }

    /// Swap the current entry without adding history
    pub fn replace(&self, path: &str) {
        let mut entries = self.entries.write();
        match entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => entries.push(path.to_string()),
        }
    }

    /// All history entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.read().clone()
    }

    /// Number of pushes since construction
    pub fn push_count(&self) -> usize {
        self.entries.read().len().saturating_sub(1)
    }
}

impl Router for MemoryRouter {
    fn location(&self) -> Location {
        let entries = self.entries.read();
        Location::parse(entries.last().map(String::as_str).unwrap_or(ROOT_PATH))
    }

    fn push(&self, path: &str) {
        tracing::info!(path = %path, "Navigation push");
        self.entries.write().push(path.to_string());
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryRouter {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}
