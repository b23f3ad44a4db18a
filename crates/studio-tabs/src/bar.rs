//! Tab bar controller
//!
//! Entry point for the rendering layer. Everything the bar needs from the
//! outside world is injected: the home store, the router, the buffer change
//! tracker, file resolution and the editor view-state cache.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use studio_navigation::{Router, WELCOME_PATH};

use crate::changes::{ChangeTracker, EditorStateCache, FileResolver};
use crate::close::ConfirmationQueue;
use crate::element::{resolve_element, ElementMeta};
use crate::store::{HomeState, TabStore};
use crate::sync::open_tab;
use crate::tab::Tab;
use crate::Result;

/// Per-tab presentation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabView {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub tooltip: String,
    pub active: bool,
    pub changed: bool,
}

pub struct TabsBar {
    store: Arc<dyn TabStore>,
    router: Arc<dyn Router>,
    tracker: Arc<dyn ChangeTracker>,
    files: Arc<dyn FileResolver>,
    editor_state: EditorStateCache,
    /// Discard prompts, answered front first
    confirmations: Arc<Mutex<ConfirmationQueue>>,
    welcome_path: String,
}

impl TabsBar {
    pub fn new(
        store: Arc<dyn TabStore>,
        router: Arc<dyn Router>,
        tracker: Arc<dyn ChangeTracker>,
        files: Arc<dyn FileResolver>,
        editor_state: EditorStateCache,
    ) -> Self {
        Self {
            store,
            router,
            tracker,
            files,
            editor_state,
            confirmations: Arc::new(Mutex::new(ConfirmationQueue::default())),
            welcome_path: WELCOME_PATH.to_string(),
        }
    }

    /// Where to go once the last tab is closed
    pub fn with_welcome_path(mut self, path: impl Into<String>) -> Self {
        self.welcome_path = path.into();
        self
    }

    pub fn is_active(&self, tab: &Tab) -> bool {
        tab.is_active(&self.router.location())
    }

    /// True if any buffer behind the tab has unsaved edits
    pub fn is_changed(&self, tab: &Tab) -> bool {
        self.has_changes(&self.store.home(), &tab.key)
    }

    pub fn tooltip<'a>(&self, tab: &'a Tab) -> &'a str {
        tab.tooltip()
    }

    /// Navigate to an open tab and make it the current one
    pub fn open_tab(&self, key: &str) -> Result<bool> {
        self.navigate(&self.store.home(), key)
    }

    /// Catalog data for the element shown at the current location
    pub fn current_element(&self) -> Option<ElementMeta> {
        let home = self.store.home();
        let location = self.router.location();
        resolve_element(
            location.active_element(),
            &home.project_root,
            &home.element_by_id,
        )
    }

    /// Presentation state for every open tab, in strip order
    pub fn tab_views(&self) -> Vec<TabView> {
        let home = self.store.home();
        let location = self.router.location();

        home.open_tabs
            .iter()
            .map(|tab| TabView {
                key: tab.key.clone(),
                name: tab.name.clone(),
                icon: tab.icon().to_string(),
                tooltip: tab.tooltip().to_string(),
                active: tab.is_active(&location),
                changed: self.has_changes(&home, &tab.key),
            })
            .collect()
    }

    pub fn editor_state(&self) -> &EditorStateCache {
        &self.editor_state
    }

    pub fn welcome_path(&self) -> &str {
        &self.welcome_path
    }

    /// Navigate to `key` as found in `home`, then record it as current
    pub(crate) fn navigate(&self, home: &HomeState, key: &str) -> Result<bool> {
        let pushed = open_tab(home, self.router.as_ref(), key)?;
        self.store.activate(key);
        Ok(pushed)
    }

    fn has_changes(&self, home: &HomeState, key: &str) -> bool {
        self.files
            .files_for(home, key)
            .is_some_and(|files| files.ids().any(|id| self.tracker.is_changed(id)))
    }

    pub(crate) fn store(&self) -> &dyn TabStore {
        self.store.as_ref()
    }

    pub(crate) fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    pub(crate) fn tracker(&self) -> &dyn ChangeTracker {
        self.tracker.as_ref()
    }

    pub(crate) fn files(&self) -> &dyn FileResolver {
        self.files.as_ref()
    }

    pub(crate) fn confirmations(&self) -> &Mutex<ConfirmationQueue> {
        &self.confirmations
    }
}

impl Clone for TabsBar {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            router: Arc::clone(&self.router),
            tracker: Arc::clone(&self.tracker),
            files: Arc::clone(&self.files),
            editor_state: self.editor_state.clone(),
            confirmations: Arc::clone(&self.confirmations),
            welcome_path: self.welcome_path.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::collections::HashMap;
    use std::sync::Arc;

    use studio_navigation::MemoryRouter;

    use super::TabsBar;
    use crate::changes::{BufferRegistry, CatalogFiles, EditorStateCache};
    use crate::element::ElementEntry;
    use crate::store::{HomeState, HomeStore};
    use crate::tab::Tab;

    /// A tab bar over in-memory services, each file backed by code, test
    /// and style buffers
    pub(crate) struct Fixture {
        pub bar: TabsBar,
        pub store: HomeStore,
        pub router: MemoryRouter,
        pub buffers: BufferRegistry,
    }

    impl Fixture {
        pub fn with_files(files: &[&str]) -> Self {
            let buffers = BufferRegistry::new();
            let mut element_by_id = HashMap::new();
            for &file in files {
                let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file);
                element_by_id.insert(
                    file.to_string(),
                    ElementEntry::new(stem)
                        .with_feature("home")
                        .with_test(format!("tests/{}.test.js", stem))
                        .with_style(format!("styles/{}.less", stem)),
                );
                buffers.open(file, format!("// {}", file));
            }

            let store = HomeStore::new(HomeState {
                element_by_id,
                project_root: "/proj/".to_string(),
                ..Default::default()
            });
            let router = MemoryRouter::new();
            let bar = TabsBar::new(
                Arc::new(store.clone()),
                Arc::new(router.clone()),
                Arc::new(buffers.clone()),
                Arc::new(CatalogFiles),
                EditorStateCache::new(),
            );

            Self {
                bar,
                store,
                router,
                buffers,
            }
        }

        /// Open `file` in the store and navigate to it
        pub fn open(&self, file: &str) -> Tab {
            let tab = Tab::element(file, "code");
            self.store.open_tab(tab.clone()).unwrap();
            self.bar.open_tab(file).unwrap();
            tab
        }
    }
}
