//! Element resolution
//!
//! Classifies the current element by file extension so the editor knows
//! which sub views (diagram, code, test, picture) it can offer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use studio_navigation::decode_component;

const DIAGRAM_EXTENSIONS: &[&str] = &["js", "jsx"];
const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "html", "css", "less", "scss", "txt", "json", "sass", "md", "log", "pl", "py",
    "sh", "cmd",
];
const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Project catalog entry for a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementEntry {
    #[serde(default)]
    pub name: String,
    /// Feature the file belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Companion test file key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// Companion style file key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Any other catalog fields, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ElementEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn declares_feature(&self) -> bool {
        self.feature.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// Editable surfaces available for an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceFlags {
    pub has_diagram: bool,
    pub has_test: bool,
    pub has_code: bool,
    pub is_pic: bool,
}

impl SurfaceFlags {
    pub fn classify(extension: Option<&str>, has_feature: bool) -> Self {
        let is = |class: &[&str]| {
            extension.is_some_and(|ext| class.iter().any(|c| c.eq_ignore_ascii_case(ext)))
        };

        Self {
            has_diagram: is(DIAGRAM_EXTENSIONS),
            has_test: has_feature && is(DIAGRAM_EXTENSIONS),
            has_code: is(CODE_EXTENSIONS),
            is_pic: is(PICTURE_EXTENSIONS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Decoded project-relative file key
    pub file: String,
    pub extension: Option<String>,
    pub entry: ElementEntry,
    #[serde(flatten)]
    pub flags: SurfaceFlags,
}

/// Resolve catalog data and surface flags for `file`.
///
/// Returns `None` when there is no file or the catalog does not know it.
pub fn resolve_element(
    file: Option<&str>,
    project_root: &str,
    element_by_id: &HashMap<String, ElementEntry>,
) -> Option<ElementMeta> {
    let raw = file.filter(|f| !f.is_empty())?;
    let file = decode_component(raw).unwrap_or_else(|_| raw.to_string());

    let full_path = format!("{}{}", project_root, file);
    let extension = full_path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string());

    let entry = element_by_id.get(&file)?;
    let flags = SurfaceFlags::classify(extension.as_deref(), entry.declares_feature());

    Some(ElementMeta {
        file,
        extension,
        entry: entry.clone(),
        flags,
    })
}
