//! Home store
//!
//! Owns the open tab strip and the recency history. The tab strip reads
//! snapshots and only ever asks the store to close a tab; opening tabs and
//! catalog updates come from the rest of the workbench.

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use studio_storage::Database;

use crate::element::ElementEntry;
use crate::error::TabError;
use crate::tab::{Tab, TabKind};
use crate::Result;

const SIDE_PANEL_WIDTH_SETTING: &str = "side_panel_width";
const DEFAULT_SIDE_PANEL_WIDTH: f64 = 260.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeState {
    /// Tabs in strip order
    pub open_tabs: Vec<Tab>,
    /// Tab keys, most recently active first
    pub history_tabs: Vec<String>,
    /// Project catalog keyed by project-relative file
    pub element_by_id: HashMap<String, ElementEntry>,
    pub project_root: String,
    pub side_panel_width: f64,
}

impl HomeState {
    pub fn find_tab(&self, key: &str) -> Option<&Tab> {
        self.open_tabs.iter().find(|t| t.key == key)
    }

    pub fn tab_index(&self, key: &str) -> Option<usize> {
        self.open_tabs.iter().position(|t| t.key == key)
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            open_tabs: Vec::new(),
            history_tabs: Vec::new(),
            element_by_id: HashMap::new(),
            project_root: String::new(),
            side_panel_width: DEFAULT_SIDE_PANEL_WIDTH,
        }
    }
}

/// Store contract consumed by the tab strip
pub trait TabStore: Send + Sync {
    /// Snapshot of the current home state
    fn home(&self) -> HomeState;

    /// Record `key` as the current tab, moving it to the front of the
    /// history. Unknown keys are ignored.
    fn activate(&self, key: &str);

    /// Request removal of a tab. Closing an unknown key is a no-op.
    fn close_tab(&self, key: &str);
}

pub struct HomeStore {
    state: Arc<RwLock<HomeState>>,
    /// Persistence for the tab strip, if enabled
    db: Option<Database>,
}

impl HomeStore {
    pub fn new(state: HomeState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            db: None,
        }
    }

    /// Restore the tab strip persisted in `db` and keep saving to it
    pub fn load(db: Database, project_root: String) -> Result<Self> {
        let rows: Vec<(String, String, Option<String>, String)> = db.with_connection(|conn| {
            let mut stmt = conn
                .prepare("SELECT key, name, icon, kind FROM open_tabs ORDER BY position")?;
            let rows: Vec<(String, String, Option<String>, String)> = stmt
                .query_map([], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })?
                .filter_map(|r| r.ok())
                .collect();
            Ok(rows)
        })?;

        let open_tabs: Vec<Tab> = rows
            .into_iter()
            .filter_map(|(key, name, icon, kind)| {
                match serde_json::from_str::<TabKind>(&kind) {
                    Ok(kind) => Some(Tab {
                        key,
                        name,
                        icon,
                        kind,
                    }),
                    Err(e) => {
                        tracing::warn!(tab_key = %key, error = %e, "Skipping stored tab with unknown type");
                        None
                    }
                }
            })
            .collect();

        let history: Vec<String> = db.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM history_tabs ORDER BY position")?;
            let keys: Vec<String> = stmt
                .query_map([], |row| row.get(0))?
                .filter_map(|r| r.ok())
                .collect();
            Ok(keys)
        })?;

        let history_tabs = history
            .into_iter()
            .filter(|k| open_tabs.iter().any(|t| &t.key == k))
            .collect();

        let side_panel_width = db
            .get_setting_json::<f64>(SIDE_PANEL_WIDTH_SETTING)?
            .unwrap_or(DEFAULT_SIDE_PANEL_WIDTH);

        let state = HomeState {
            open_tabs,
            history_tabs,
            element_by_id: HashMap::new(),
            project_root,
            side_panel_width,
        };

        tracing::info!(
            tabs = state.open_tabs.len(),
            "Restored tab strip"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            db: Some(db),
        })
    }

    /// Open a tab, or refresh it in place if already open, and make it the
    /// most recent entry in the history.
    pub fn open_tab(&self, tab: Tab) -> Result<()> {
        if tab.key.is_empty() {
            return Err(TabError::InvalidKey(tab.key));
        }

        let snapshot = {
            let mut state = self.state.write();
            let key = tab.key.clone();
            match state.tab_index(&key) {
                Some(index) => state.open_tabs[index] = tab,
                None => state.open_tabs.push(tab),
            }
            state.history_tabs.retain(|k| k != &key);
            state.history_tabs.insert(0, key);
            state.clone()
        };

        self.persist(&snapshot)
    }

    pub fn set_element_index(&self, element_by_id: HashMap<String, ElementEntry>) {
        self.state.write().element_by_id = element_by_id;
    }

    pub fn set_project_root(&self, project_root: String) {
        self.state.write().project_root = project_root;
    }

    pub fn set_side_panel_width(&self, width: f64) -> Result<()> {
        self.state.write().side_panel_width = width;
        if let Some(db) = &self.db {
            db.set_setting_json(SIDE_PANEL_WIDTH_SETTING, &width)?;
        }
        Ok(())
    }

    fn persist(&self, state: &HomeState) -> Result<()> {
        let Some(db) = &self.db else {
            return Ok(());
        };

        let kinds = state
            .open_tabs
            .iter()
            .map(|tab| serde_json::to_string(&tab.kind))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let updated_at = Utc::now().to_rfc3339();

        db.transaction(|conn| {
            conn.execute("DELETE FROM open_tabs", [])?;
            conn.execute("DELETE FROM history_tabs", [])?;

            for (position, (tab, kind)) in state.open_tabs.iter().zip(&kinds).enumerate() {
                conn.execute(
                    "INSERT INTO open_tabs (key, position, name, icon, kind, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![
                        tab.key,
                        position as i64,
                        tab.name,
                        tab.icon,
                        kind,
                        updated_at
                    ],
                )?;
            }

            for (position, key) in state.history_tabs.iter().enumerate() {
                conn.execute(
                    "INSERT INTO history_tabs (key, position) VALUES (?1, ?2)",
                    rusqlite::params![key, position as i64],
                )?;
            }

            Ok(())
        })?;

        Ok(())
    }
}

impl TabStore for HomeStore {
    fn home(&self) -> HomeState {
        self.state.read().clone()
    }

    fn activate(&self, key: &str) {
        let snapshot = {
            let mut state = self.state.write();
            if state.find_tab(key).is_none() {
                tracing::debug!(tab_key = %key, "Activate requested for tab that is not open");
                return;
            }
            if state.history_tabs.first().map(String::as_str) == Some(key) {
                return;
            }
            state.history_tabs.retain(|k| k != key);
            state.history_tabs.insert(0, key.to_string());
            state.clone()
        };

        if let Err(e) = self.persist(&snapshot) {
            tracing::warn!(tab_key = %key, error = %e, "Failed to persist tab strip");
        }
    }

    fn close_tab(&self, key: &str) {
        let snapshot = {
            let mut state = self.state.write();
            let before = state.open_tabs.len();
            state.open_tabs.retain(|t| t.key != key);
            state.history_tabs.retain(|k| k != key);
            if state.open_tabs.len() == before {
                tracing::debug!(tab_key = %key, "Close requested for tab that is not open");
                return;
            }
            state.clone()
        };

        tracing::info!(tab_key = %key, "Closed tab");

        if let Err(e) = self.persist(&snapshot) {
            tracing::warn!(tab_key = %key, error = %e, "Failed to persist tab strip");
        }
    }
}

impl Default for HomeStore {
    fn default() -> Self {
        Self::new(HomeState::default())
    }
}

impl Clone for HomeStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            db: self.db.clone(),
        }
    }
}
