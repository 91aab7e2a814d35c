//! Runtime error types

use crate::state_machine::Identity;
use thiserror::Error;

/// A prompt could not be delivered to the user
#[derive(Debug, Error)]
#[error("failed to deliver message to {identity}: {message}")]
pub struct GatewayError {
    pub identity: Identity,
    pub message: String,
}

impl GatewayError {
    pub fn new(identity: Identity, message: impl Into<String>) -> Self {
        Self {
            identity,
            message: message.into(),
        }
    }
}

/// The operator channel did not accept the booking
#[derive(Debug, Error)]
#[error("operator notification failed: {0}")]
pub struct NotifyError(pub String);

/// Errors surfaced by the runtime manager
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker for {0} has stopped")]
    WorkerStopped(Identity),
}
