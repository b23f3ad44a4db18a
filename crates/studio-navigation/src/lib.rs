//! Studio Navigation
//!
//! The workbench is driven by a path-based router:
//! - `/` → home
//! - `/element/{file}/{sub_tab}` → an element editor
//! - `/{route}/...` → a routes panel
//! - `/tools/{tests|coverage|build}` → tool panels
//! - `/welcome` → shown when nothing is open
//!
//! This crate owns the typed [`Location`] parsed from a pathname, the URI
//! component codec used to embed file keys in paths, and the [`Router`]
//! contract tabs navigate through.

mod codec;
mod error;
mod location;
mod router;

pub use codec::{decode_component, encode_component};
pub use error::NavigationError;
pub use location::{Location, ELEMENT_SEGMENT, ROOT_PATH, WELCOME_PATH};
pub use router::{MemoryRouter, Router};

pub type Result<T> = std::result::Result<T, NavigationError>;
