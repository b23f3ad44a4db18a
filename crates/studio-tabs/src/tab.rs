//! Tab data structure
//!
//! A tab is keyed either by a project-relative file path or, for panels
//! that are not files, by a virtual key starting with `#`. The variant
//! decides how the key maps to a router location and back.

use serde::{Deserialize, Serialize};
use studio_navigation::{encode_component, Location, ELEMENT_SEGMENT, ROOT_PATH};

/// Icon shown when a tab does not carry its own
pub const DEFAULT_ICON: &str = "file";

const TESTS_PATH: &str = "/tools/tests";
const COVERAGE_PATH: &str = "/tools/coverage";
const BUILD_PATH: &str = "/tools/build";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// File path, or a `#`-prefixed virtual key
    pub key: String,
    /// Display label
    pub name: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub kind: TabKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TabKind {
    /// Project overview at the root path
    Home,
    /// Editor for a single project file
    Element {
        #[serde(rename = "subTab", default = "default_element_sub_tab")]
        sub_tab: String,
    },
    /// Route configuration panel
    Routes {
        #[serde(rename = "subTab", default, skip_serializing_if = "Option::is_none")]
        sub_tab: Option<String>,
    },
    Tests {
        pathname: String,
    },
    Coverage {
        pathname: String,
    },
    Build {
        pathname: String,
    },
}

fn default_element_sub_tab() -> String {
    "code".to_string()
}

impl TabKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabKind::Home => "home",
            TabKind::Element { .. } => "element",
            TabKind::Routes { .. } => "routes",
            TabKind::Tests { .. } => "tests",
            TabKind::Coverage { .. } => "coverage",
            TabKind::Build { .. } => "build",
        }
    }
}

impl std::fmt::Display for TabKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Tab {
    pub fn home() -> Self {
        Self {
            key: "#home".to_string(),
            name: "Dashboard".to_string(),
            icon: Some("home".to_string()),
            kind: TabKind::Home,
        }
    }

    /// Editor tab for a project file, labelled with its file name
    pub fn element(file: impl Into<String>, sub_tab: impl Into<String>) -> Self {
        let key = file.into();
        let name = key.rsplit('/').next().unwrap_or(&key).to_string();
        Self {
            key,
            name,
            icon: None,
            kind: TabKind::Element {
                sub_tab: sub_tab.into(),
            },
        }
    }

    pub fn routes(key: impl Into<String>, name: impl Into<String>, sub_tab: Option<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            icon: Some("share-alt".to_string()),
            kind: TabKind::Routes { sub_tab },
        }
    }

    pub fn tests(pathname: impl Into<String>) -> Self {
        Self {
            key: "#tests".to_string(),
            name: "Run Tests".to_string(),
            icon: Some("appstore-o".to_string()),
            kind: TabKind::Tests {
                pathname: pathname.into(),
            },
        }
    }

    pub fn coverage() -> Self {
        Self {
            key: "#coverage".to_string(),
            name: "Test Coverage".to_string(),
            icon: Some("pie-chart".to_string()),
            kind: TabKind::Coverage {
                pathname: COVERAGE_PATH.to_string(),
            },
        }
    }

    pub fn build() -> Self {
        Self {
            key: "#build".to_string(),
            name: "Build".to_string(),
            icon: Some("play-circle-o".to_string()),
            kind: TabKind::Build {
                pathname: BUILD_PATH.to_string(),
            },
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Virtual tabs are not backed by a file
    pub fn is_virtual(&self) -> bool {
        self.key.starts_with('#')
    }

    pub fn icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }

    /// Hover text: the full path for files, the label for virtual tabs
    pub fn tooltip(&self) -> &str {
        if self.is_virtual() {
            &self.name
        } else {
            &self.key
        }
    }

    /// Whether `location` shows this tab
    pub fn is_active(&self, location: &Location) -> bool {
        match &self.kind {
            TabKind::Home => location.is_root(),
            TabKind::Element { .. } => location.active_element() == Some(self.key.as_str()),
            TabKind::Routes { .. } => location.starts_with(&format!("/{}", self.key)),
            TabKind::Tests { .. } => location.starts_with(TESTS_PATH),
            TabKind::Coverage { .. } => location.starts_with(COVERAGE_PATH),
            TabKind::Build { .. } => location.starts_with(BUILD_PATH),
        }
    }

    /// Path the router should show when this tab is opened
    pub fn target_path(&self) -> String {
        match &self.kind {
            TabKind::Home => ROOT_PATH.to_string(),
            TabKind::Element { sub_tab } => format!(
                "/{}/{}/{}",
                ELEMENT_SEGMENT,
                encode_component(&self.key),
                sub_tab
            ),
            TabKind::Routes { sub_tab } => {
                format!("/{}/{}", self.key, sub_tab.as_deref().unwrap_or(""))
            }
            TabKind::Tests { pathname }
            | TabKind::Coverage { pathname }
            | TabKind::Build { pathname } => pathname.clone(),
        }
    }
}
