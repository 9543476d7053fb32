use tokio::sync::broadcast;
use tracing::debug;

use super::events::QuizEvent;

/// Default number of events a slow subscriber may fall behind before lagging
pub const DEFAULT_CAPACITY: usize = 100;

/// Event bus for distributing quiz events to the presentation layer
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<QuizEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emits an event to all current subscribers
    pub fn emit(&self, event: QuizEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(event = event_type, receivers = receiver_count, "Quiz event emitted");
            }
            Err(_) => {
                debug!(event = event_type, "Quiz event emitted with no receivers");
            }
        }
    }

    /// Subscribe to all events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.sender.subscribe()
    }
}
