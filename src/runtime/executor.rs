//! Conversation runtime executor

use super::traits::{Clock, MessageGateway, OperatorNotifier, SessionStore};
use crate::state_machine::{transition, BookingContext, Effect, Event, Identity, SessionState};

/// Generic conversation runtime that can work with any store, gateway,
/// notifier and clock implementations
pub struct ConversationRuntime<S, G, N, C>
where
    S: SessionStore,
    G: MessageGateway,
    N: OperatorNotifier,
    C: Clock,
{
    store: S,
    gateway: G,
    notifier: N,
    clock: C,
}

impl<S, G, N, C> ConversationRuntime<S, G, N, C>
where
    S: SessionStore,
    G: MessageGateway,
    N: OperatorNotifier,
    C: Clock,
{
    pub fn new(store: S, gateway: G, notifier: N, clock: C) -> Self {
        Self {
            store,
            gateway,
            notifier,
            clock,
        }
    }

    /// Run one inbound event to completion, including any events generated
    /// by its effects. Callers must not process two events for the same
    /// identity concurrently.
    pub async fn process_event(&self, identity: Identity, event: Event) {
        let mut state = self.store.get(identity).await;
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let context = BookingContext::new(self.clock.today());
            let from = state.step;

            // Pure state transition
            let result = transition(&state, &context, current_event);
            state = result.new_state;

            tracing::debug!(
                identity = %identity,
                from = ?from,
                to = ?state.step,
                effects = result.effects.len(),
                "Transition"
            );

            // Execute effects and collect generated events
            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(&state, effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }
    }

    /// Execute an effect and optionally return a generated event
    async fn execute_effect(&self, state: &SessionState, effect: Effect) -> Option<Event> {
        let identity = state.identity;
        match effect {
            Effect::PersistState => {
                self.store.replace(identity, state.clone()).await;
                None
            }

            Effect::SendText {
                text,
                links_enabled,
            } => {
                if let Err(e) = self.gateway.send_text(identity, &text, links_enabled).await {
                    tracing::warn!(error = %e, "Failed to send prompt");
                }
                None
            }

            Effect::SendMenu { text, menu } => {
                if let Err(e) = self.gateway.send_menu(identity, &text, &menu).await {
                    tracing::warn!(error = %e, "Failed to send menu");
                }
                None
            }

            Effect::NotifyOperator { text } => match self.notifier.notify(&text).await {
                Ok(()) => {
                    tracing::info!(identity = %identity, "Booking forwarded to operator");
                    Some(Event::NotificationDelivered)
                }
                Err(e) => {
                    tracing::error!(identity = %identity, error = %e, "Failed to notify operator");
                    Some(Event::NotificationFailed {
                        reason: e.to_string(),
                    })
                }
            },
        }
    }
}
