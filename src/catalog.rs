//! Static booking catalog: rooms, menu tokens and the fixed menus
//!
//! Every selectable option the bot ever shows is built here, so the
//! transition function only has to compare tokens against this module.

use serde::{Deserialize, Serialize};

// ============================================================================
// Menu tokens
// ============================================================================

pub const START_BOOKING_TOKEN: &str = "start_booking";
pub const SHOW_INFO_TOKEN: &str = "show_info";
pub const CUSTOM_TIME_TOKEN: &str = "customTime";
pub const POSTER_YES_TOKEN: &str = "poster_yes";
pub const POSTER_NO_TOKEN: &str = "poster_no";
pub const CONFIRM_TOKEN: &str = "confirm_booking";
pub const CANCEL_TOKEN: &str = "cancel_booking";

/// First hour offered in the time menus
pub const FIRST_HOUR: u32 = 9;
/// Last hour offered in the time menus (inclusive)
pub const LAST_HOUR: u32 = 22;
/// Hour buttons per keyboard row
const HOUR_MENU_COLUMNS: usize = 4;

// ============================================================================
// Rooms
// ============================================================================

/// A bookable room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    SmallRoom,
    LargeHall,
}

impl Room {
    pub const ALL: [Room; 2] = [Room::SmallRoom, Room::LargeHall];

    /// Callback token carried by the room button
    pub fn token(self) -> &'static str {
        match self {
            Room::SmallRoom => "cabinet13",
            Room::LargeHall => "hall17",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|room| room.token() == token)
    }

    /// Display name used in summaries and operator notifications
    pub fn label(self) -> &'static str {
        match self {
            Room::SmallRoom => "Кабинет 13м²🔴",
            Room::LargeHall => "Зал 17м²🔵",
        }
    }

    fn button_label(self) -> &'static str {
        match self {
            Room::SmallRoom => "Кабинет (13м²)🔴",
            Room::LargeHall => "Зал (17м²)🔵",
        }
    }
}

// ============================================================================
// Menus
// ============================================================================

/// One selectable option: what the user sees and what comes back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub token: String,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Ordered rows of options shown under a prompt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    rows: Vec<Vec<MenuOption>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn row(mut self, options: impl IntoIterator<Item = MenuOption>) -> Self {
        let row: Vec<MenuOption> = options.into_iter().collect();
        if !row.is_empty() {
            self.rows.push(row);
        }
        self
    }

    pub fn rows(&self) -> &[Vec<MenuOption>] {
        &self.rows
    }

    /// All options in display order
    #[cfg(test)]
    pub fn options(&self) -> impl Iterator<Item = &MenuOption> {
        self.rows.iter().flatten()
    }

    #[cfg(test)]
    pub fn contains_token(&self, token: &str) -> bool {
        self.options().any(|option| option.token == token)
    }
}

/// Tokens of the hour menu, `09:00` through `22:00`
pub fn hour_tokens() -> impl Iterator<Item = String> {
    (FIRST_HOUR..=LAST_HOUR).map(|hour| format!("{hour:02}:00"))
}

pub fn is_hour_token(token: &str) -> bool {
    hour_tokens().any(|hour| hour == token)
}

pub fn main_menu() -> Menu {
    Menu::new().row([
        MenuOption::new("📅 Забронировать", START_BOOKING_TOKEN),
        MenuOption::new("ℹ️ О помещениях", SHOW_INFO_TOKEN),
    ])
}

pub fn room_menu() -> Menu {
    Menu::new().row(
        Room::ALL
            .into_iter()
            .map(|room| MenuOption::new(room.button_label(), room.token())),
    )
}

/// Hour buttons four per row, with the "other time" option on its own row
pub fn hour_menu() -> Menu {
    let hours: Vec<MenuOption> = hour_tokens()
        .map(|hour| MenuOption::new(hour.clone(), hour))
        .collect();

    let menu = hours
        .chunks(HOUR_MENU_COLUMNS)
        .fold(Menu::new(), |menu, chunk| menu.row(chunk.iter().cloned()));

    menu.row([MenuOption::new("Другое время", CUSTOM_TIME_TOKEN)])
}

pub fn poster_menu() -> Menu {
    Menu::new().row([
        MenuOption::new("Да", POSTER_YES_TOKEN),
        MenuOption::new("Нет", POSTER_NO_TOKEN),
    ])
}

pub fn confirm_menu() -> Menu {
    Menu::new().row([
        MenuOption::new("✅ Подтвердить", CONFIRM_TOKEN),
        MenuOption::new("❌ Отменить", CANCEL_TOKEN),
    ])
}
