//! Buffer change tracking
//!
//! Each element tab is backed by up to three editor buffers (code, test
//! and style). The tab strip never edits them; it only asks whether any is
//! dirty and releases them when the tab goes away.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::TabError;
use crate::store::HomeState;
use crate::Result;

/// Model store reporting unsaved edits
pub trait ChangeTracker: Send + Sync {
    /// True if the buffer's content differs from what was last saved.
    /// Unknown buffers are never changed.
    fn is_changed(&self, buffer_id: &str) -> bool;

    /// Drop the buffer. Disposing an unknown buffer is a no-op.
    fn dispose(&self, buffer_id: &str);
}

/// Buffer ids behind one tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFiles {
    pub code: Option<String>,
    pub test: Option<String>,
    pub style: Option<String>,
}

impl ElementFiles {
    /// Present buffer ids in code, test, style order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        [&self.code, &self.test, &self.style]
            .into_iter()
            .filter_map(|id| id.as_deref())
    }
}

/// Maps a tab key to the buffers that back it
pub trait FileResolver: Send + Sync {
    fn files_for(&self, home: &HomeState, tab_key: &str) -> Option<ElementFiles>;
}

/// Resolves files from the element catalog: the key itself is the code
/// buffer, test and style come from the entry's companions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFiles;

impl FileResolver for CatalogFiles {
    fn files_for(&self, home: &HomeState, tab_key: &str) -> Option<ElementFiles> {
        let entry = home.element_by_id.get(tab_key)?;
        Some(ElementFiles {
            code: Some(tab_key.to_string()),
            test: entry.test.clone(),
            style: entry.style.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct Buffer {
    saved: String,
    current: String,
}

/// In-memory model manager
pub struct BufferRegistry {
    buffers: Arc<RwLock<HashMap<String, Buffer>>>,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self {
            buffers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a buffer with its on-disk content. Re-opening resets it.
    pub fn open(&self, buffer_id: &str, saved: impl Into<String>) {
        let saved = saved.into();
        self.buffers.write().insert(
            buffer_id.to_string(),
            Buffer {
                current: saved.clone(),
                saved,
            },
        );
    }

    pub fn edit(&self, buffer_id: &str, content: impl Into<String>) -> Result<()> {
        let mut buffers = self.buffers.write();
        let buffer = buffers
            .get_mut(buffer_id)
            .ok_or_else(|| TabError::BufferNotFound(buffer_id.to_string()))?;
        buffer.current = content.into();
        Ok(())
    }

    /// Record the current content as saved
    pub fn mark_saved(&self, buffer_id: &str) -> Result<()> {
        let mut buffers = self.buffers.write();
        let buffer = buffers
            .get_mut(buffer_id)
            .ok_or_else(|| TabError::BufferNotFound(buffer_id.to_string()))?;
        buffer.saved = buffer.current.clone();
        Ok(())
    }

    pub fn content(&self, buffer_id: &str) -> Option<String> {
        self.buffers.read().get(buffer_id).map(|b| b.current.clone())
    }

    pub fn contains(&self, buffer_id: &str) -> bool {
        self.buffers.read().contains_key(buffer_id)
    }

    pub fn len(&self) -> usize {
        self.buffers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.read().is_empty()
    }
}

impl ChangeTracker for BufferRegistry {
    fn is_changed(&self, buffer_id: &str) -> bool {
        self.buffers
            .read()
            .get(buffer_id)
            .is_some_and(|b| b.current != b.saved)
    }

    fn dispose(&self, buffer_id: &str) {
        if self.buffers.write().remove(buffer_id).is_some() {
            tracing::debug!(buffer_id = %buffer_id, "Disposed buffer");
        }
    }
}

impl Default for BufferRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BufferRegistry {
    fn clone(&self) -> Self {
        Self {
            buffers: Arc::clone(&self.buffers),
        }
    }
}

/// Saved editor view state (cursor, scroll, folds) keyed by buffer id
pub struct EditorStateCache {
    states: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl EditorStateCache {
    pub fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn insert(&self, buffer_id: &str, state: serde_json::Value) {
        self.states.write().insert(buffer_id.to_string(), state);
    }

    pub fn get(&self, buffer_id: &str) -> Option<serde_json::Value> {
        self.states.read().get(buffer_id).cloned()
    }

    /// Remove an entry; absent keys are ignored
    pub fn remove(&self, buffer_id: &str) -> Option<serde_json::Value> {
        self.states.write().remove(buffer_id)
    }

    pub fn contains(&self, buffer_id: &str) -> bool {
        self.states.read().contains_key(buffer_id)
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

impl Default for EditorStateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EditorStateCache {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementEntry;
    use serde_json::json;

    #[test]
    fn test_buffer_change_tracking() {
        let buffers = BufferRegistry::new();
        buffers.open("src/App.js", "export default 1;");
        assert!(!buffers.is_changed("src/App.js"));

        buffers.edit("src/App.js", "export default 2;").unwrap();
        assert!(buffers.is_changed("src/App.js"));

        // Editing back to the saved text is clean again
        buffers.edit("src/App.js", "export default 1;").unwrap();
        assert!(!buffers.is_changed("src/App.js"));

        buffers.edit("src/App.js", "export default 3;").unwrap();
        buffers.mark_saved("src/App.js").unwrap();
        assert!(!buffers.is_changed("src/App.js"));
        assert_eq!(buffers.content("src/App.js").as_deref(), Some("export default 3;"));
    }

    #[test]
    fn test_unknown_buffers() {
        let buffers = BufferRegistry::new();
        assert!(!buffers.is_changed("missing.js"));
        assert!(matches!(
            buffers.edit("missing.js", ""),
            Err(TabError::BufferNotFound(_))
        ));
        assert!(buffers.mark_saved("missing.js").is_err());
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let buffers = BufferRegistry::new();
        buffers.open("a.js", "a");
        buffers.open("b.js", "b");

        buffers.dispose("a.js");
        buffers.dispose("a.js");
        buffers.dispose("never-opened.js");

        assert!(!buffers.contains("a.js"));
        assert!(buffers.contains("b.js"));
        assert_eq!(buffers.len(), 1);
    }

    #[test]
    fn test_editor_state_remove_absent_leaves_others() {
        let cache = EditorStateCache::new();
        cache.insert("a.js", json!({"line": 10}));
        cache.insert("b.js", json!({"line": 3}));

        assert!(cache.remove("missing.js").is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a.js"), Some(json!({"line": 10})));

        assert!(cache.remove("a.js").is_some());
        assert!(cache.remove("a.js").is_none());
        assert!(cache.contains("b.js"));
    }

    #[test]
    fn test_catalog_files() {
        let mut home = HomeState::default();
        home.element_by_id.insert(
            "src/features/home/App.js".to_string(),
            ElementEntry::new("App")
                .with_feature("home")
                .with_test("tests/features/home/App.test.js")
                .with_style("src/features/home/App.less"),
        );
        home.element_by_id
            .insert("src/utils/a.js".to_string(), ElementEntry::new("a"));

        let files = CatalogFiles
            .files_for(&home, "src/features/home/App.js")
            .unwrap();
        assert_eq!(
            files.ids().collect::<Vec<_>>(),
            vec![
                "src/features/home/App.js",
                "tests/features/home/App.test.js",
                "src/features/home/App.less"
            ]
        );

        let plain = CatalogFiles.files_for(&home, "src/utils/a.js").unwrap();
        assert_eq!(plain.ids().count(), 1);

        assert!(CatalogFiles.files_for(&home, "#routes").is_none());
    }
}
