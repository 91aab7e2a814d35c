//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use super::error::{GatewayError, NotifyError};
use crate::catalog::Menu;
use crate::state_machine::{Identity, SessionState};
use async_trait::async_trait;
use chrono::{FixedOffset, Local, NaiveDate, Utc};
use std::sync::Arc;

/// Storage for per-user session state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session, created idle on first access
    async fn get(&self, identity: Identity) -> SessionState;

    /// Overwrite the stored session
    async fn replace(&self, identity: Identity, state: SessionState);

    /// Number of known sessions
    async fn len(&self) -> usize;
}

/// Outbound channel to the user
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send_text(
        &self,
        identity: Identity,
        text: &str,
        links_enabled: bool,
    ) -> Result<(), GatewayError>;

    async fn send_menu(&self, identity: Identity, text: &str, menu: &Menu)
        -> Result<(), GatewayError>;
}

/// Channel delivering completed bookings to the operator
#[async_trait]
pub trait OperatorNotifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Source of "today" in the operator's time zone
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get(&self, identity: Identity) -> SessionState {
        (**self).get(identity).await
    }

    async fn replace(&self, identity: Identity, state: SessionState) {
        (**self).replace(identity, state).await;
    }

    async fn len(&self) -> usize {
        (**self).len().await
    }
}

#[async_trait]
impl<T: MessageGateway + ?Sized> MessageGateway for Arc<T> {
    async fn send_text(
        &self,
        identity: Identity,
        text: &str,
        links_enabled: bool,
    ) -> Result<(), GatewayError> {
        (**self).send_text(identity, text, links_enabled).await
    }

    async fn send_menu(
        &self,
        identity: Identity,
        text: &str,
        menu: &Menu,
    ) -> Result<(), GatewayError> {
        (**self).send_menu(identity, text, menu).await
    }
}

#[async_trait]
impl<T: OperatorNotifier + ?Sized> OperatorNotifier for Arc<T> {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        (**self).notify(text).await
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Wall clock, optionally pinned to the operator's UTC offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// `None` uses the process local time zone
    pub fn new(offset: Option<FixedOffset>) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}
