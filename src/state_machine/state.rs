//! Booking session state types

use crate::catalog::Room;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key of a conversation (the Telegram chat id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(pub i64);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Steps
// ============================================================================

/// Position in the booking conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// No booking in progress
    #[default]
    Idle,
    AskName,
    AskContact,
    AskAppointmentPurpose,
    ChooseRoom,
    AskDate,
    ChooseStartTime,
    ChooseEndTime,
    /// Side branch entered through the "other time" button
    AskCustomTime,
    AskNeedsPoster,
    /// Summary shown, waiting for confirm or cancel
    ConfirmBooking,
}

// ============================================================================
// Booking form
// ============================================================================

/// Fields collected during one booking attempt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingForm {
    pub client_name: String,
    pub contact_info: String,
    pub appointment_purpose: String,
    pub room: Option<Room>,
    /// Accepted date, kept exactly as typed (`DD/MM/YYYY`)
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Free-text `HH:MM-HH:MM`; excludes `start_time`/`end_time`
    pub custom_time_range: Option<String>,
    pub wants_poster: Option<bool>,
}

/// The time part of a booking, whichever way it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow<'a> {
    Hours { start: &'a str, end: &'a str },
    Custom(&'a str),
}

impl BookingForm {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn time_window(&self) -> Option<TimeWindow<'_>> {
        if let Some(range) = &self.custom_time_range {
            return Some(TimeWindow::Custom(range));
        }
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Some(TimeWindow::Hours { start, end }),
            _ => None,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Everything known about one user's conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub identity: Identity,
    pub step: Step,
    pub form: BookingForm,
}

impl SessionState {
    /// Fresh session: idle with an empty form
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            step: Step::Idle,
            form: BookingForm::default(),
        }
    }

    #[must_use]
    pub fn at(&self, step: Step) -> Self {
        Self {
            identity: self.identity,
            step,
            form: self.form.clone(),
        }
    }
}

/// Inputs to a transition that the state machine must not look up itself
#[derive(Debug, Clone, Copy)]
pub struct BookingContext {
    /// Today in the operator's time zone
    pub today: NaiveDate,
}

impl BookingContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}
