//! Booking conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
mod event;
mod state;
mod transition;
mod validate;


pub use effect::Effect;
pub use event::Event;
pub use state::{BookingContext, BookingForm, Identity, SessionState, Step, TimeWindow};
pub use transition::transition;
