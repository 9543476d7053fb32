// Presentation-facing events
//
// The session publishes what happened; any number of front ends subscribe.

pub use bus::EventBus;
pub use events::QuizEvent;

mod bus;
mod events;
