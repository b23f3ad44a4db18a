//! Studio Core
//!
//! Composition root for the editor workbench: configuration, logging and
//! the [`Workbench`] that wires the tab bar to its store, router and
//! buffer services.

mod config;
mod error;
mod workbench;

pub use config::Config;
pub use error::CoreError;
pub use workbench::Workbench;

// Re-export core components
pub use studio_navigation::{Location, MemoryRouter, NavigationError, Router};
pub use studio_storage::{Database, StorageError};
pub use studio_tabs::{
    BufferRegistry, CatalogFiles, ChangeTracker, CloseOutcome, ConfirmPrompt, EditorStateCache,
    ElementEntry, ElementFiles, ElementMeta, FileResolver, HomeState, HomeStore, MenuCommand,
    PendingClose, SurfaceFlags, Tab, TabError, TabKind, TabStore, TabView, TabsBar,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
