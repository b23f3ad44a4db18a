//! Tab context menu
//!
//! Batch commands expand into single-tab closes in strip order. Each close
//! runs the full close protocol on its own, so a dirty tab in the batch
//! queues its own confirmation without holding up the rest.

use serde::{Deserialize, Serialize};

use crate::bar::TabsBar;
use crate::close::CloseOutcome;
use crate::error::TabError;
use crate::tab::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCommand {
    /// Close every tab except the target
    CloseOthers,
    /// Close every tab after the target
    CloseRight,
    /// Close the target
    CloseSelf,
}

impl MenuCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCommand::CloseOthers => "close-others",
            MenuCommand::CloseRight => "close-right",
            MenuCommand::CloseSelf => "close-self",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::CloseOthers => "Close others",
            MenuCommand::CloseRight => "Close to the right",
            MenuCommand::CloseSelf => "Close",
        }
    }

    pub fn all() -> [MenuCommand; 3] {
        [
            MenuCommand::CloseOthers,
            MenuCommand::CloseRight,
            MenuCommand::CloseSelf,
        ]
    }
}

impl std::fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MenuCommand {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close-others" => Ok(MenuCommand::CloseOthers),
            "close-right" => Ok(MenuCommand::CloseRight),
            "close-self" => Ok(MenuCommand::CloseSelf),
            _ => Err(TabError::UnknownCommand(s.to_string())),
        }
    }
}

impl TabsBar {
    /// Run a context menu command against `tab`, returning one outcome per
    /// tab the command closed (in close order).
    pub fn handle_menu_click(&self, tab: &Tab, command: MenuCommand) -> Vec<CloseOutcome> {
        let open_tabs = self.store().home().open_tabs;

        let targets: Vec<Tab> = match command {
            MenuCommand::CloseOthers => open_tabs
                .into_iter()
                .filter(|t| t.key != tab.key)
                .collect(),
            MenuCommand::CloseRight => match open_tabs.iter().position(|t| t.key == tab.key) {
                Some(index) => open_tabs.into_iter().skip(index + 1).collect(),
                None => {
                    tracing::debug!(tab_key = %tab.key, "Close to the right of a tab that is not open");
                    Vec::new()
                }
            },
            MenuCommand::CloseSelf => vec![tab.clone()],
        };

        tracing::debug!(
            tab_key = %tab.key,
            command = %command,
            count = targets.len(),
            "Menu command"
        );

        targets.iter().map(|t| self.handle_close(t)).collect()
    }
}
