//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::error::{GatewayError, NotifyError};
use super::executor::ConversationRuntime;
use super::traits::*;
use crate::catalog::Menu;
use crate::session_store::InMemorySessionStore;
use crate::state_machine::Identity;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Gateway
// ============================================================================

/// Something the runtime sent to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        identity: Identity,
        text: String,
        links_enabled: bool,
    },
    Menu {
        identity: Identity,
        text: String,
        tokens: Vec<String>,
    },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::Text { text, .. } | Outbound::Menu { text, .. } => text,
        }
    }

    pub fn identity(&self) -> Identity {
        match self {
            Outbound::Text { identity, .. } | Outbound::Menu { identity, .. } => *identity,
        }
    }
}

/// Gateway that records every outbound message
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Outbound>>,
    /// Identities whose messages fail to deliver
    unreachable: Mutex<HashSet<Identity>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_unreachable(&self, identity: Identity) {
        self.unreachable.lock().unwrap().insert(identity);
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, identity: Identity) -> Vec<Outbound> {
        self.sent()
            .into_iter()
            .filter(|msg| msg.identity() == identity)
            .collect()
    }

    pub fn last_to(&self, identity: Identity) -> Option<Outbound> {
        self.sent_to(identity).pop()
    }

    fn record(&self, identity: Identity, outbound: Outbound) -> Result<(), GatewayError> {
        if self.unreachable.lock().unwrap().contains(&identity) {
            return Err(GatewayError::new(identity, "chat not found"));
        }
        self.sent.lock().unwrap().push(outbound);
        Ok(())
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    async fn send_text(
        &self,
        identity: Identity,
        text: &str,
        links_enabled: bool,
    ) -> Result<(), GatewayError> {
        self.record(
            identity,
            Outbound::Text {
                identity,
                text: text.to_string(),
                links_enabled,
            },
        )
    }

    async fn send_menu(
        &self,
        identity: Identity,
        text: &str,
        menu: &Menu,
    ) -> Result<(), GatewayError> {
        self.record(
            identity,
            Outbound::Menu {
                identity,
                text: text.to_string(),
                tokens: menu.options().map(|o| o.token.clone()).collect(),
            },
        )
    }
}

// ============================================================================
// Scripted Notifier
// ============================================================================

/// Operator channel that records deliveries and can be told to fail
#[derive(Default)]
pub struct ScriptedNotifier {
    delivered: Mutex<Vec<String>>,
    failures_left: Mutex<usize>,
}

impl ScriptedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `count` notifications fail
    pub fn fail_next(&self, count: usize) {
        *self.failures_left.lock().unwrap() = count;
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl OperatorNotifier for ScriptedNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(NotifyError("operator chat unavailable".to_string()));
            }
        }
        self.delivered.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Fixed Clock
// ============================================================================

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

pub type TestConversationRuntime = ConversationRuntime<
    Arc<InMemorySessionStore>,
    Arc<RecordingGateway>,
    Arc<ScriptedNotifier>,
    FixedClock,
>;

/// Runtime wired to mocks, with handles kept for assertions
pub struct TestRuntime {
    pub runtime: TestConversationRuntime,
    pub store: Arc<InMemorySessionStore>,
    pub gateway: Arc<RecordingGateway>,
    pub notifier: Arc<ScriptedNotifier>,
}

impl TestRuntime {
    pub fn new(today: NaiveDate) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let gateway = Arc::new(RecordingGateway::new());
        let notifier = Arc::new(ScriptedNotifier::new());
        let runtime = ConversationRuntime::new(
            store.clone(),
            gateway.clone(),
            notifier.clone(),
            FixedClock(today),
        );
        Self {
            runtime,
            store,
            gateway,
            notifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Room};
    use crate::prompts;
    use crate::runtime::RuntimeManager;
    use crate::state_machine::{BookingForm, Event, SessionState, Step};

    const USER: Identity = Identity(1001);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    async fn send(rt: &TestRuntime, identity: Identity, event: Event) {
        rt.runtime.process_event(identity, event).await;
    }

    /// Drive a user from /book up to the confirmation summary
    async fn fill_form_to_confirmation(rt: &TestRuntime, identity: Identity) {
        for event in [
            Event::BeginBooking,
            Event::text("Anna"),
            Event::text("anna@mail.com +7(900)1234567"),
            Event::text("Workshop"),
            Event::selection(Room::SmallRoom.token()),
            Event::text("25/12/2030"),
            Event::selection("10:00"),
            Event::selection("12:00"),
            Event::selection(catalog::POSTER_NO_TOKEN),
        ] {
            send(rt, identity, event).await;
        }
    }

    #[tokio::test]
    async fn test_mock_gateway_records_menu_tokens() {
        let gateway = RecordingGateway::new();
        gateway
            .send_menu(USER, "pick", &catalog::poster_menu())
            .await
            .unwrap();

        assert_eq!(
            gateway.sent(),
            vec![Outbound::Menu {
                identity: USER,
                text: "pick".to_string(),
                tokens: vec![
                    catalog::POSTER_YES_TOKEN.to_string(),
                    catalog::POSTER_NO_TOKEN.to_string()
                ],
            }]
        );
    }

    #[tokio::test]
    async fn test_scripted_notifier_fails_then_recovers() {
        let notifier = ScriptedNotifier::new();
        notifier.fail_next(1);

        assert!(notifier.notify("first").await.is_err());
        assert!(notifier.notify("second").await.is_ok());
        assert_eq!(notifier.delivered(), vec!["second".to_string()]);
    }

    #[tokio::test]
    async fn test_start_sends_welcome_with_main_menu() {
        let rt = TestRuntime::new(today());
        send(&rt, USER, Event::SessionStart).await;

        let Some(Outbound::Menu { text, tokens, .. }) = rt.gateway.last_to(USER) else {
            panic!("expected a menu");
        };
        assert_eq!(text, prompts::welcome());
        assert_eq!(
            tokens,
            vec![
                catalog::START_BOOKING_TOKEN.to_string(),
                catalog::SHOW_INFO_TOKEN.to_string()
            ]
        );
        assert_eq!(rt.store.get(USER).await, SessionState::new(USER));
    }

    #[tokio::test]
    async fn test_full_booking_notifies_operator_once() {
        let rt = TestRuntime::new(today());
        fill_form_to_confirmation(&rt, USER).await;

        let state = rt.store.get(USER).await;
        assert_eq!(state.step, Step::ConfirmBooking);
        assert!(rt.notifier.delivered().is_empty());

        send(&rt, USER, Event::selection(catalog::CONFIRM_TOKEN)).await;

        let delivered = rt.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        let message = &delivered[0];
        for expected in [
            "Anna",
            "anna@mail.com",
            "Workshop",
            Room::SmallRoom.label(),
            "25/12/2030",
            "10:00",
            "12:00",
            "Нет",
        ] {
            assert!(message.contains(expected), "missing {expected} in {message}");
        }

        let state = rt.store.get(USER).await;
        assert_eq!(state.step, Step::Idle);
        assert_eq!(state.form, BookingForm::default());

        let last = rt.gateway.last_to(USER).unwrap();
        assert_eq!(
            last,
            Outbound::Text {
                identity: USER,
                text: prompts::booking_sent(),
                links_enabled: true,
            }
        );
    }

    #[tokio::test]
    async fn test_cancel_never_notifies() {
        let rt = TestRuntime::new(today());
        fill_form_to_confirmation(&rt, USER).await;
        send(&rt, USER, Event::selection(catalog::CANCEL_TOKEN)).await;

        assert!(rt.notifier.delivered().is_empty());
        assert_eq!(rt.store.get(USER).await, SessionState::new(USER));
        assert_eq!(
            rt.gateway.last_to(USER).unwrap().text(),
            prompts::BOOKING_CANCELLED
        );
    }

    #[tokio::test]
    async fn test_failed_notification_keeps_form_for_retry() {
        let rt = TestRuntime::new(today());
        fill_form_to_confirmation(&rt, USER).await;

        rt.notifier.fail_next(1);
        send(&rt, USER, Event::selection(catalog::CONFIRM_TOKEN)).await;

        let state = rt.store.get(USER).await;
        assert_eq!(state.step, Step::ConfirmBooking);
        assert_eq!(state.form.client_name, "Anna");
        assert_eq!(
            rt.gateway.last_to(USER).unwrap().text(),
            prompts::booking_failed()
        );

        send(&rt, USER, Event::selection(catalog::CONFIRM_TOKEN)).await;
        assert_eq!(rt.notifier.delivered().len(), 1);
        assert_eq!(rt.store.get(USER).await.step, Step::Idle);
    }

    #[tokio::test]
    async fn test_custom_time_branch_reaches_operator() {
        let rt = TestRuntime::new(today());
        for event in [
            Event::BeginBooking,
            Event::text("Boris"),
            Event::text("boris@mail.com"),
            Event::text("Lecture"),
            Event::selection(Room::LargeHall.token()),
            Event::text("19/10/2026"),
            Event::selection(catalog::CUSTOM_TIME_TOKEN),
            Event::text("9:30-11"),
            Event::text("09:30-11:00"),
            Event::selection(catalog::POSTER_YES_TOKEN),
            Event::selection(catalog::CONFIRM_TOKEN),
        ] {
            send(&rt, USER, event).await;
        }

        let delivered = rt.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].contains("09:30-11:00"));
        assert!(delivered[0].contains(Room::LargeHall.label()));
        assert!(delivered[0].contains("Да"));

        // The malformed range got the format hint once
        let hints = rt
            .gateway
            .sent_to(USER)
            .into_iter()
            .filter(|msg| msg.text() == prompts::CUSTOM_TIME_HINT)
            .count();
        assert_eq!(hints, 1);
    }

    #[tokio::test]
    async fn test_past_date_is_rejected_without_advancing() {
        let rt = TestRuntime::new(today());
        for event in [
            Event::BeginBooking,
            Event::text("Anna"),
            Event::text("anna@mail.com"),
            Event::text("Workshop"),
            Event::selection(Room::SmallRoom.token()),
            Event::text("18/10/2026"),
        ] {
            send(&rt, USER, event).await;
        }

        let state = rt.store.get(USER).await;
        assert_eq!(state.step, Step::AskDate);
        assert_eq!(state.form.date, None);
        assert_eq!(rt.gateway.last_to(USER).unwrap().text(), prompts::DATE_IN_PAST);
    }

    #[tokio::test]
    async fn test_gateway_failure_does_not_stop_the_flow() {
        let rt = TestRuntime::new(today());
        rt.gateway.make_unreachable(USER);

        send(&rt, USER, Event::BeginBooking).await;
        send(&rt, USER, Event::text("Anna")).await;

        assert!(rt.gateway.sent().is_empty());
        let state = rt.store.get(USER).await;
        assert_eq!(state.step, Step::AskContact);
        assert_eq!(state.form.client_name, "Anna");
    }

    #[tokio::test]
    async fn test_manager_keeps_users_apart() {
        let TestRuntime {
            runtime,
            store,
            gateway,
            notifier,
        } = TestRuntime::new(today());
        let manager = RuntimeManager::new(runtime);
        let anna = Identity(1);
        let boris = Identity(2);

        manager.send_event(anna, Event::BeginBooking).await.unwrap();
        manager.send_event(boris, Event::BeginBooking).await.unwrap();
        manager.send_event(anna, Event::text("Anna")).await.unwrap();
        manager.send_event(boris, Event::text("Boris")).await.unwrap();
        manager
            .send_event(boris, Event::text("boris@mail.com"))
            .await
            .unwrap();

        // Shutdown drains every queued event before returning
        manager.shutdown().await;

        let anna_state = store.get(anna).await;
        assert_eq!(anna_state.step, Step::AskContact);
        assert_eq!(anna_state.form.client_name, "Anna");
        assert_eq!(anna_state.form.contact_info, "");

        let boris_state = store.get(boris).await;
        assert_eq!(boris_state.step, Step::AskAppointmentPurpose);
        assert_eq!(boris_state.form.client_name, "Boris");
        assert_eq!(boris_state.form.contact_info, "boris@mail.com");

        assert_eq!(gateway.sent_to(anna).len(), 2);
        assert_eq!(gateway.sent_to(boris).len(), 3);
        assert!(notifier.delivered().is_empty());
        assert_eq!(store.len().await, 2);
    }
}
