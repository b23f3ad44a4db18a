//! Navigation synchronization
//!
//! Opening a tab means navigating to it. Navigation is skipped when the
//! router already shows the tab's path, so repeated opens leave no extra
//! history entries.

use studio_navigation::Router;

use crate::error::TabError;
use crate::store::HomeState;
use crate::Result;

/// Navigate to the open tab `key`. Returns whether a push was issued.
pub fn open_tab(home: &HomeState, router: &dyn Router, key: &str) -> Result<bool> {
    let tab = home
        .find_tab(key)
        .ok_or_else(|| TabError::NotFound(key.to_string()))?;

    let path = tab.target_path();
    if router.location().pathname() == path {
        tracing::debug!(tab_key = %key, path = %path, "Tab already shown");
        return Ok(false);
    }

    router.push(&path);
    Ok(true)
}
