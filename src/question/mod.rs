// Question generation
//
// The factory turns catalog movies into quiz questions and reports back
// over a channel; it never hands a question to the caller directly.

pub use factory::{FactoryEvent, FactoryState, QuestionFactory};
pub use models::QuizQuestion;

mod factory;
mod models;
