//! HTTP health check
//!
//! Lets the hosting platform probe the process while the bot long-polls.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::runtime::SessionStore;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions,
            started_at: Instant::now(),
        }
    }
}
