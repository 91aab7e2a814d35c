//! Effects produced by state transitions

use crate::catalog::Menu;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the new session state back to the store
    PersistState,

    /// Send a prompt to the user
    SendText { text: String, links_enabled: bool },

    /// Send a prompt with a menu of selectable options
    SendMenu { text: String, menu: Menu },

    /// Forward a completed booking to the operator
    NotifyOperator { text: String },
}

impl Effect {
    pub fn text(text: impl Into<String>) -> Self {
        Effect::SendText {
            text: text.into(),
            links_enabled: false,
        }
    }

    pub fn text_with_links(text: impl Into<String>) -> Self {
        Effect::SendText {
            text: text.into(),
            links_enabled: true,
        }
    }

    pub fn menu(text: impl Into<String>, menu: Menu) -> Self {
        Effect::SendMenu {
            text: text.into(),
            menu,
        }
    }
}
