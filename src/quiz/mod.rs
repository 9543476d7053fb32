// Quiz session state machine
//
// `state` holds the pure transition rules, `session` drives them from
// commands and factory signals, `handle` is the channel-backed front door.

pub use errors::SessionError;
pub use handle::{spawn_session, SessionHandle};
pub use session::{QuizSession, SessionCommand};
pub use state::{Advance, QuizPhase, QuizSessionState};
pub use view_models::{QuizResultsViewModel, QuizStepViewModel};

mod errors;
mod handle;
mod session;
mod state;
mod view_models;
