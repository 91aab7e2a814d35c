//! In-memory session store
//!
//! Sessions live for the lifetime of the process. The map lock is only held
//! for a lookup or an insert, never across a transition.

use crate::runtime::SessionStore;
use crate::state_machine::{Identity, SessionState};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Thread-safe map from identity to its session
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Identity, SessionState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, identity: Identity) -> SessionState {
        if let Some(state) = self.sessions.read().await.get(&identity) {
            return state.clone();
        }

        self.sessions
            .write()
            .await
            .entry(identity)
            .or_insert_with(|| {
                tracing::debug!(identity = %identity, "Created session");
                SessionState::new(identity)
            })
            .clone()
    }

    async fn replace(&self, identity: Identity, state: SessionState) {
        self.sessions.write().await.insert(identity, state);
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
