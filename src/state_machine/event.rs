//! Events that drive a booking conversation

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    TextMessage { text: String },
    MenuSelection { token: String },

    // Commands, accepted at any step
    /// `/start`: drop whatever is in progress and show the main menu
    SessionStart,
    /// `/book`: start a new booking from scratch
    BeginBooking,
    /// `/info`: describe the rooms without touching the session
    ShowInfo,

    // Notification events, produced by the runtime after `NotifyOperator`
    NotificationDelivered,
    NotificationFailed { reason: String },
}

impl Event {
    pub fn text(text: impl Into<String>) -> Self {
        Event::TextMessage { text: text.into() }
    }

    pub fn selection(token: impl Into<String>) -> Self {
        Event::MenuSelection {
            token: token.into(),
        }
    }
}
