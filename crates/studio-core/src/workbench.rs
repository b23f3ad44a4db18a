//! Workbench state container
//!
//! Owns the home store, router and buffer services and hands them to the
//! tab bar. The rendering layer talks to [`TabsBar`] through
//! [`Workbench::tabs`].

use std::collections::HashMap;
use std::sync::Arc;

use studio_navigation::{MemoryRouter, Router};
use studio_storage::Database;
use studio_tabs::{
    BufferRegistry, CatalogFiles, EditorStateCache, ElementEntry, HomeState, HomeStore, Tab,
    TabStore, TabsBar,
};

use crate::config::Config;
use crate::Result;

pub struct Workbench {
    config: Config,
    store: HomeStore,
    router: MemoryRouter,
    buffers: BufferRegistry,
    tabs: TabsBar,
}

impl Workbench {
    /// Build a workbench, restoring the persisted tab strip if enabled
    pub fn new(config: Config) -> Result<Self> {
        let store = if config.persist_tabs {
            let db = Database::open(&config.database_path)?;
            HomeStore::load(db, config.project_root.clone())?
        } else {
            HomeStore::new(HomeState {
                project_root: config.project_root.clone(),
                ..Default::default()
            })
        };

        Ok(Self::assemble(config, store))
    }

    /// Workbench without persistence
    pub fn in_memory(project_root: impl Into<String>) -> Self {
        let config = Config {
            project_root: project_root.into(),
            persist_tabs: false,
            ..Config::default()
        };

        let store = HomeStore::new(HomeState {
            project_root: config.project_root.clone(),
            ..Default::default()
        });
        Self::assemble(config, store)
    }

    fn assemble(config: Config, store: HomeStore) -> Self {
        let router = MemoryRouter::new();
        let buffers = BufferRegistry::new();
        let tabs = TabsBar::new(
            Arc::new(store.clone()),
            Arc::new(router.clone()),
            Arc::new(buffers.clone()),
            Arc::new(CatalogFiles),
            EditorStateCache::new(),
        )
        .with_welcome_path(config.welcome_path.clone());

        Self {
            config,
            store,
            router,
            buffers,
            tabs,
        }
    }

    /// Show the most recently used tab, or the welcome page if none is open
    pub fn initialize(&self) -> Result<()> {
        let home = self.store.home();
        match home.history_tabs.first() {
            Some(key) => {
                self.tabs.open_tab(key)?;
            }
            None => {
                if self.router.location().pathname() != self.config.welcome_path {
                    self.router.push(&self.config.welcome_path);
                }
            }
        }

        tracing::info!(tabs = home.open_tabs.len(), "Workbench initialized");
        Ok(())
    }

    /// Replace the project catalog
    pub fn set_catalog(&self, element_by_id: HashMap<String, ElementEntry>) {
        self.store.set_element_index(element_by_id);
    }

    /// Open an editor tab for `file` and navigate to it
    pub fn open_element(&self, file: &str, sub_tab: &str) -> Result<Tab> {
        let tab = Tab::element(file, sub_tab);
        self.open(tab.clone())?;
        Ok(tab)
    }

    /// Add `tab` to the strip (or refresh it) and navigate to it
    pub fn open(&self, tab: Tab) -> Result<()> {
        let key = tab.key.clone();
        self.store.open_tab(tab)?;
        self.tabs.open_tab(&key)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &HomeStore {
        &self.store
    }

    pub fn router(&self) -> &MemoryRouter {
        &self.router
    }

    pub fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }

    pub fn tabs(&self) -> &TabsBar {
        &self.tabs
    }
}
