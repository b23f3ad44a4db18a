//! Studio Tabs
//!
//! The tab strip of the editor workbench. Tabs are views onto the router:
//! a tab is "active" when the current location points at it, opening a tab
//! is a navigation, and closing a tab releases its editor buffers before
//! handing focus to the previously used tab.
//!
//! Closing a tab with unsaved buffers goes through a confirmation queue;
//! prompts are answered one at a time with [`TabsBar::confirm`] or
//! [`TabsBar::cancel`].

mod bar;
mod changes;
mod close;
mod element;
mod error;
mod menu;
mod store;
mod sync;
mod tab;

pub use bar::{TabView, TabsBar};
pub use changes::{
    BufferRegistry, CatalogFiles, ChangeTracker, EditorStateCache, ElementFiles, FileResolver,
};
pub use close::{CloseOutcome, ConfirmPrompt, PendingClose};
pub use element::{resolve_element, ElementEntry, ElementMeta, SurfaceFlags};
pub use error::TabError;
pub use menu::MenuCommand;
pub use store::{HomeState, HomeStore, TabStore};
pub use sync::open_tab;
pub use tab::{Tab, TabKind, DEFAULT_ICON};

pub type Result<T> = std::result::Result<T, TabError>;
