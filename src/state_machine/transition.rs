//! Pure state transition function
//!
//! Every (step, event) pair is matched explicitly, so adding a step or an
//! event is a compile error until it is handled here.

use super::state::{BookingContext, SessionState, Step};
use super::validate::{self, DateRejection};
use super::{Effect, Event};
use crate::catalog::{self, Room};
use crate::notification;
use crate::prompts;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same session, context and event it always produces the same
/// result. Sending prompts, storing the session and notifying the operator
/// are left to the caller through the returned effects.
#[allow(clippy::too_many_lines)] // One arm per row of the step table
pub fn transition(state: &SessionState, context: &BookingContext, event: Event) -> TransitionResult {
    match (state.step, event) {
        // ============================================================
        // Commands (any step)
        // ============================================================
        (_, Event::SessionStart) => TransitionResult::new(SessionState::new(state.identity))
            .with_effect(Effect::PersistState)
            .with_effect(Effect::menu(prompts::welcome(), catalog::main_menu())),

        (_, Event::BeginBooking) => begin_booking(state),

        (_, Event::ShowInfo) => unchanged(state).with_effect(Effect::text_with_links(prompts::info())),

        // ============================================================
        // Idle
        // ============================================================
        (Step::Idle, Event::MenuSelection { token }) if token == catalog::START_BOOKING_TOKEN => {
            begin_booking(state)
        }

        (Step::Idle, Event::MenuSelection { token }) if token == catalog::SHOW_INFO_TOKEN => {
            unchanged(state).with_effect(Effect::text_with_links(prompts::info()))
        }

        (Step::Idle, Event::TextMessage { .. } | Event::MenuSelection { .. }) => restart_hint(state),

        // ============================================================
        // Free-text fields
        // ============================================================
        (Step::AskName, Event::TextMessage { text }) => {
            let name = text.trim();
            if name.is_empty() {
                return unchanged(state).with_effect(Effect::text(prompts::ASK_NAME_AGAIN));
            }
            let mut next = state.at(Step::AskContact);
            next.form.client_name = name.to_string();
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::text(prompts::ASK_CONTACT))
        }

        (Step::AskContact, Event::TextMessage { text }) => {
            let mut next = state.at(Step::AskAppointmentPurpose);
            next.form.contact_info = text.trim().to_string();
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::text(prompts::ASK_PURPOSE))
        }

        (Step::AskAppointmentPurpose, Event::TextMessage { text }) => {
            let mut next = state.at(Step::ChooseRoom);
            next.form.appointment_purpose = text.trim().to_string();
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::menu(prompts::CHOOSE_ROOM, catalog::room_menu()))
        }

        (Step::AskDate, Event::TextMessage { text }) => {
            match validate::parse_booking_date(&text, context.today) {
                Ok(_) => {
                    let mut next = state.at(Step::ChooseStartTime);
                    next.form.date = Some(text);
                    TransitionResult::new(next)
                        .with_effect(Effect::PersistState)
                        .with_effect(Effect::menu(prompts::CHOOSE_START_TIME, catalog::hour_menu()))
                }
                Err(DateRejection::Malformed) => {
                    unchanged(state).with_effect(Effect::text(prompts::DATE_FORMAT_HINT))
                }
                Err(DateRejection::InPast) => {
                    unchanged(state).with_effect(Effect::text(prompts::DATE_IN_PAST))
                }
            }
        }

        (Step::AskCustomTime, Event::TextMessage { text }) => {
            if !validate::is_custom_time_range(&text) {
                return unchanged(state).with_effect(Effect::text(prompts::CUSTOM_TIME_HINT));
            }
            let mut next = state.at(Step::AskNeedsPoster);
            next.form.start_time = None;
            next.form.end_time = None;
            next.form.custom_time_range = Some(text);
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::menu(prompts::ASK_POSTER, catalog::poster_menu()))
        }

        // ============================================================
        // Menu selections
        // ============================================================
        (Step::ChooseRoom, Event::MenuSelection { token }) => match Room::from_token(&token) {
            Some(room) => {
                let mut next = state.at(Step::AskDate);
                next.form.room = Some(room);
                TransitionResult::new(next)
                    .with_effect(Effect::PersistState)
                    .with_effect(Effect::text(prompts::ASK_DATE))
            }
            None => unchanged(state),
        },

        (Step::ChooseStartTime | Step::ChooseEndTime, Event::MenuSelection { token })
            if token == catalog::CUSTOM_TIME_TOKEN =>
        {
            TransitionResult::new(state.at(Step::AskCustomTime))
                .with_effect(Effect::PersistState)
                .with_effect(Effect::text(prompts::ASK_CUSTOM_TIME))
        }

        (Step::ChooseStartTime, Event::MenuSelection { token }) if catalog::is_hour_token(&token) => {
            let mut next = state.at(Step::ChooseEndTime);
            next.form.custom_time_range = None;
            next.form.end_time = None;
            let prompt = prompts::choose_end_time(&token);
            next.form.start_time = Some(token);
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::menu(prompt, catalog::hour_menu()))
        }

        (Step::ChooseEndTime, Event::MenuSelection { token }) if catalog::is_hour_token(&token) => {
            let mut next = state.at(Step::AskNeedsPoster);
            next.form.end_time = Some(token);
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::menu(prompts::ASK_POSTER, catalog::poster_menu()))
        }

        (Step::AskNeedsPoster, Event::MenuSelection { token }) => {
            let wants_poster = match token.as_str() {
                catalog::POSTER_YES_TOKEN => true,
                catalog::POSTER_NO_TOKEN => false,
                _ => return unchanged(state),
            };
            let mut next = state.at(Step::ConfirmBooking);
            next.form.wants_poster = Some(wants_poster);
            let summary = prompts::confirmation(&next.form);
            TransitionResult::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::menu(summary, catalog::confirm_menu()))
        }

        // Step stays at ConfirmBooking until the operator channel answers
        (Step::ConfirmBooking, Event::MenuSelection { token }) if token == catalog::CONFIRM_TOKEN => {
            unchanged(state).with_effect(Effect::NotifyOperator {
                text: notification::render_operator_message(&state.form),
            })
        }

        (Step::ConfirmBooking, Event::MenuSelection { token }) if token == catalog::CANCEL_TOKEN => {
            TransitionResult::new(SessionState::new(state.identity))
                .with_effect(Effect::PersistState)
                .with_effect(Effect::text(prompts::BOOKING_CANCELLED))
        }

        // Unrecognized tokens leave the session untouched
        (
            Step::ChooseStartTime | Step::ChooseEndTime | Step::ConfirmBooking,
            Event::MenuSelection { .. },
        ) => unchanged(state),

        // ============================================================
        // Notification outcome
        // ============================================================
        (Step::ConfirmBooking, Event::NotificationDelivered) => {
            TransitionResult::new(SessionState::new(state.identity))
                .with_effect(Effect::PersistState)
                .with_effect(Effect::text_with_links(prompts::booking_sent()))
        }

        // Keep the form so the user can press confirm again
        (Step::ConfirmBooking, Event::NotificationFailed { .. }) => {
            unchanged(state).with_effect(Effect::text(prompts::booking_failed()))
        }

        (_, Event::NotificationDelivered | Event::NotificationFailed { .. }) => unchanged(state),

        // ============================================================
        // Input of the wrong kind for the step
        // ============================================================
        (
            Step::ChooseRoom
            | Step::ChooseStartTime
            | Step::ChooseEndTime
            | Step::AskNeedsPoster
            | Step::ConfirmBooking,
            Event::TextMessage { .. },
        ) => restart_hint(state),

        (
            Step::AskName
            | Step::AskContact
            | Step::AskAppointmentPurpose
            | Step::AskDate
            | Step::AskCustomTime,
            Event::MenuSelection { .. },
        ) => unchanged(state),
    }
}

// Helper functions

fn begin_booking(state: &SessionState) -> TransitionResult {
    let mut next = SessionState::new(state.identity);
    next.step = Step::AskName;
    TransitionResult::new(next)
        .with_effect(Effect::PersistState)
        .with_effect(Effect::text_with_links(prompts::booking_intro()))
}

/// Same session, no effects yet
fn unchanged(state: &SessionState) -> TransitionResult {
    TransitionResult::new(state.clone())
}

fn restart_hint(state: &SessionState) -> TransitionResult {
    unchanged(state).with_effect(Effect::text(prompts::RESTART_HINT))
}
