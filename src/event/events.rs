use crate::stats::GameResult;

/// Events the quiz session publishes for the presentation layer
///
/// Events represent facts about things that have already happened.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    /// The movie catalog is loaded and questions can be generated
    CatalogLoaded { movie_count: usize },

    /// A new question is on screen; `position_label` reads like "3/10"
    QuestionPresented {
        text: String,
        image_data: Vec<u8>,
        position_label: String,
    },

    /// The submitted answer has been scored
    AnswerOutcome { is_correct: bool },

    /// The round is over and its result has been persisted
    RoundComplete {
        correct: u32,
        total: u32,
        accuracy_percent: f64,
        best_game: Option<GameResult>,
        games_played: u64,
    },

    /// The catalog could not be loaded; the user may retry
    LoadFailed { message: String },

    /// The round result could not be persisted; advancing again retries
    StorageFailed { message: String },
}

impl QuizEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            QuizEvent::CatalogLoaded { .. } => "catalog_loaded",
            QuizEvent::QuestionPresented { .. } => "question_presented",
            QuizEvent::AnswerOutcome { .. } => "answer_outcome",
            QuizEvent::RoundComplete { .. } => "round_complete",
            QuizEvent::LoadFailed { .. } => "load_failed",
            QuizEvent::StorageFailed { .. } => "storage_failed",
        }
    }
}
