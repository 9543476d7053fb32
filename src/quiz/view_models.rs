use crate::event::QuizEvent;
use crate::stats::GameResult;

/// What a front end needs to draw a question screen
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStepViewModel {
    pub image: Vec<u8>,
    pub question: String,
    /// "3/10"
    pub question_number: String,
}

impl QuizStepViewModel {
    pub fn from_event(event: &QuizEvent) -> Option<Self> {
        match event {
            QuizEvent::QuestionPresented {
                text,
                image_data,
                position_label,
            } => Some(Self {
                image: image_data.clone(),
                question: text.clone(),
                question_number: position_label.clone(),
            }),
            _ => None,
        }
    }
}

/// End-of-round summary alert
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResultsViewModel {
    pub title: String,
    pub text: String,
    pub button_text: String,
}

impl QuizResultsViewModel {
    pub fn from_event(event: &QuizEvent) -> Option<Self> {
        match event {
            QuizEvent::RoundComplete {
                correct,
                total,
                accuracy_percent,
                best_game,
                games_played,
            } => Some(Self {
                title: "This round is over!".to_string(),
                text: summary_text(
                    *correct,
                    *total,
                    *games_played,
                    best_game.as_ref(),
                    *accuracy_percent,
                ),
                button_text: "Play again".to_string(),
            }),
            _ => None,
        }
    }
}

fn summary_text(
    correct: u32,
    total: u32,
    games_played: u64,
    best_game: Option<&GameResult>,
    accuracy_percent: f64,
) -> String {
    let record = match best_game {
        Some(best) => format!(
            "Record: {}/{} ({})",
            best.correct,
            best.total,
            best.date.format("%d.%m.%y %H:%M")
        ),
        None => "Record: none yet".to_string(),
    };

    format!(
        "Your result: {}/{}\nGames played: {}\n{}\nAverage accuracy: {:.2}%",
        correct, total, games_played, record, accuracy_percent
    )
}
