//! Close protocol
//!
//! ```text
//! handle_close
//!   ├─ clean ──────────────────────────────► cleanup
//!   └─ dirty ─► queued prompt ─┬─ confirm ─► cleanup
//!                              └─ cancel ──► (nothing)
//! ```
//!
//! Cleanup releases the tab's editor buffers, asks the store to drop the
//! tab, and moves the router to the previously used tab (or the welcome
//! page once nothing is left). Every step tolerates running against a tab
//! that is already gone.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::bar::TabsBar;
use crate::changes::ElementFiles;
use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseOutcome {
    /// The tab was cleaned up immediately
    Closed,
    /// The tab has unsaved buffers; a prompt with this id is queued
    AwaitingConfirmation(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    pub title: String,
    pub content: String,
    pub ok_text: String,
}

impl ConfirmPrompt {
    /// Discard prompt naming the code buffer, or the first dirty buffer
    /// when the tab has no code buffer.
    fn discard_changes(files: &ElementFiles, dirty: &[String]) -> Self {
        let file = files
            .code
            .as_deref()
            .or_else(|| dirty.first().map(String::as_str))
            .unwrap_or_default();

        Self {
            title: "Discard changes?".to_string(),
            content: format!("Do you want to discard changes you made to {}?", file),
            ok_text: "Discard".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClose {
    pub id: Uuid,
    pub tab: Tab,
    pub prompt: ConfirmPrompt,
    /// Buffers captured when the close was requested
    files: ElementFiles,
}

/// Prompts waiting for an answer; the front one is on screen
#[derive(Debug, Default)]
pub(crate) struct ConfirmationQueue {
    pending: VecDeque<PendingClose>,
}

impl ConfirmationQueue {
    /// Queue a prompt for `tab`. A tab already waiting keeps its prompt.
    fn enqueue(&mut self, tab: &Tab, files: ElementFiles, prompt: ConfirmPrompt) -> Uuid {
        if let Some(existing) = self.pending.iter().find(|p| p.tab.key == tab.key) {
            return existing.id;
        }

        let id = Uuid::new_v4();
        self.pending.push_back(PendingClose {
            id,
            tab: tab.clone(),
            prompt,
            files,
        });
        id
    }

    fn take(&mut self, id: Uuid) -> Option<PendingClose> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        self.pending.remove(index)
    }

    /// Drop any prompt for `key`; returns whether one was queued
    fn discard_key(&mut self, key: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.tab.key != key);
        self.pending.len() != before
    }

    pub(crate) fn front(&self) -> Option<&PendingClose> {
        self.pending.front()
    }

    pub(crate) fn ids(&self) -> Vec<Uuid> {
        self.pending.iter().map(|p| p.id).collect()
    }
}

impl TabsBar {
    /// Close `tab`, asking first if any of its buffers has unsaved edits
    pub fn handle_close(&self, tab: &Tab) -> CloseOutcome {
        tracing::info!(tab_key = %tab.key, "Close tab requested");

        let home = self.store().home();
        let files = self.files().files_for(&home, &tab.key);

        let dirty: Vec<String> = files
            .iter()
            .flat_map(|f| f.ids())
            .filter(|id| self.tracker().is_changed(id))
            .map(str::to_string)
            .collect();

        match files {
            Some(files) if !dirty.is_empty() => {
                let prompt = ConfirmPrompt::discard_changes(&files, &dirty);
                let id = self.confirmations().lock().enqueue(tab, files, prompt);
                tracing::debug!(tab_key = %tab.key, %id, dirty = dirty.len(), "Awaiting discard confirmation");
                CloseOutcome::AwaitingConfirmation(id)
            }
            files => {
                self.do_close(tab, files.as_ref());
                CloseOutcome::Closed
            }
        }
    }

    /// Prompt currently awaiting an answer
    pub fn pending_prompt(&self) -> Option<PendingClose> {
        self.confirmations().lock().front().cloned()
    }

    /// Ids of every queued prompt, front first
    pub fn pending_confirmations(&self) -> Vec<Uuid> {
        self.confirmations().lock().ids()
    }

    /// Discard the tab's changes and close it. A prompt whose tab is no
    /// longer open, or now resolves to other buffers, is dropped unanswered.
    pub fn confirm(&self, id: Uuid) -> Result<()> {
        let pending = self
            .confirmations()
            .lock()
            .take(id)
            .ok_or(TabError::UnknownConfirmation(id))?;

        let home = self.store().home();
        let current = home
            .find_tab(&pending.tab.key)
            .and_then(|_| self.files().files_for(&home, &pending.tab.key));
        if current.as_ref() != Some(&pending.files) {
            tracing::warn!(tab_key = %pending.tab.key, %id, "Dropping stale discard confirmation");
            return Ok(());
        }

        tracing::info!(tab_key = %pending.tab.key, "Discarding changes");
        self.do_close(&pending.tab, Some(&pending.files));
        Ok(())
    }

    /// Keep the tab open; nothing else changes
    pub fn cancel(&self, id: Uuid) -> Result<()> {
        let pending = self
            .confirmations()
            .lock()
            .take(id)
            .ok_or(TabError::UnknownConfirmation(id))?;

        tracing::debug!(tab_key = %pending.tab.key, "Close cancelled");
        Ok(())
    }

    /// Release the tab's buffers, remove it, and move focus if it was the
    /// current tab. The successor is the first key of the pre-removal history
    /// other than the closed one, which is `history[1]` whenever the closed
    /// tab is the current one at `history[0]`.
    fn do_close(&self, tab: &Tab, files: Option<&ElementFiles>) {
        if self.confirmations().lock().discard_key(&tab.key) {
            tracing::debug!(tab_key = %tab.key, "Dropped prompt for closed tab");
        }

        if let Some(files) = files {
            for id in files.ids() {
                self.editor_state().remove(id);
                self.tracker().dispose(id);
            }
        }

        let before = self.store().home();
        let was_active = tab.is_active(&self.router().location());

        self.store().close_tab(&tab.key);

        let next_key = before.history_tabs.iter().find(|k| **k != tab.key);

        match next_key {
            None => {
                tracing::debug!(tab_key = %tab.key, "Closed last tab");
                self.router().push(self.welcome_path());
            }
            Some(next_key) if was_active => {
                if let Err(e) = self.navigate(&before, next_key) {
                    tracing::warn!(tab_key = %next_key, error = %e, "Could not open next tab");
                }
            }
            Some(_) => {}
        }
    }
}
