//! Typed navigation location
//!
//! A pathname is parsed exactly once into a [`Location`]; everything that
//! needs "which element is open" reads [`Location::active_element`] instead
//! of splitting strings again.

use serde::{Deserialize, Serialize};

use crate::codec::decode_component;

/// Root of the workbench (the home tab)
pub const ROOT_PATH: &str = "/";

/// Where the router lands once the last tab is closed
pub const WELCOME_PATH: &str = "/welcome";

/// First path segment of element editor locations
pub const ELEMENT_SEGMENT: &str = "element";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Raw pathname as reported by the router
    pathname: String,
    /// Non-empty, decoded path segments
    segments: Vec<String>,
    /// File key of the element being edited, if this is an element location
    active_element: Option<String>,
}

impl Location {
    /// Parse a pathname. Query strings and fragments are not part of the
    /// pathname and are dropped.
    pub fn parse(pathname: &str) -> Self {
        let pathname = pathname
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string();

        let segments: Vec<String> = pathname
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match decode_component(s) {
                Ok(decoded) => decoded,
                Err(e) => {
                    tracing::debug!(segment = %s, error = %e, "Keeping undecodable path segment");
                    s.to_string()
                }
            })
            .collect();

        let active_element = match segments.as_slice() {
            [first, file, ..] if first == ELEMENT_SEGMENT => Some(file.clone()),
            _ => None,
        };

        Self {
            pathname,
            segments,
            active_element,
        }
    }

    pub fn root() -> Self {
        Self::parse(ROOT_PATH)
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Decoded file key of the current element page
    pub fn active_element(&self) -> Option<&str> {
        self.active_element.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.pathname == ROOT_PATH
    }

    /// Plain string prefix test against the raw pathname
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.pathname.starts_with(prefix)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pathname)
    }
}

impl From<&str> for Location {
    fn from(pathname: &str) -> Self {
        Self::parse(pathname)
    }
}
