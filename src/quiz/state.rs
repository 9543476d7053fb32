use super::SessionError;
use crate::question::QuizQuestion;

/// Where the session is within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the factory to deliver the current question
    AwaitingQuestion,
    /// A question is shown and accepts exactly one answer
    QuestionPresented,
    /// The answer is scored; nothing is accepted until `advance`
    Locked,
    RoundComplete,
}

/// What `advance` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on; the caller must request the question at this index
    NextQuestion { question_index: u32 },
    /// The last question was answered; the caller records the round and
    /// then calls `finish_round`
    RoundFinished { correct: u32, total: u32 },
}

/// Scoring state of the current round.
///
/// Every transition is checked against the current phase; a call that does
/// not fit is rejected with `SessionError::InvalidTransition` and leaves the
/// state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSessionState {
    questions_per_round: u32,
    question_index: u32,
    correct_count: u32,
    current_question: Option<QuizQuestion>,
    phase: QuizPhase,
}

impl QuizSessionState {
    pub fn new(questions_per_round: u32) -> Self {
        Self {
            questions_per_round,
            question_index: 0,
            correct_count: 0,
            current_question: None,
            phase: QuizPhase::AwaitingQuestion,
        }
    }

    pub fn questions_per_round(&self) -> u32 {
        self.questions_per_round
    }

    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_question.as_ref()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// One-based position within the round, e.g. "3/10"
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.question_index + 1, self.questions_per_round)
    }

    pub fn present(&mut self, question: QuizQuestion) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::AwaitingQuestion, "present a question")?;
        self.current_question = Some(question);
        self.phase = QuizPhase::QuestionPresented;
        Ok(())
    }

    /// Scores an answer and locks the question. Returns whether it was correct.
    pub fn submit_answer(&mut self, given_answer: bool) -> Result<bool, SessionError> {
        self.expect_phase(QuizPhase::QuestionPresented, "submit an answer")?;
        let question = self
            .current_question
            .as_ref()
            .ok_or(SessionError::InvalidTransition {
                action: "submit an answer",
                phase: self.phase,
            })?;

        let is_correct = given_answer == question.correct_answer();
        if is_correct {
            self.correct_count += 1;
        }
        self.phase = QuizPhase::Locked;
        Ok(is_correct)
    }

    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.expect_phase(QuizPhase::Locked, "advance")?;

        if self.question_index + 1 < self.questions_per_round {
            self.question_index += 1;
            self.current_question = None;
            self.phase = QuizPhase::AwaitingQuestion;
            return Ok(Advance::NextQuestion {
                question_index: self.question_index,
            });
        }

        Ok(Advance::RoundFinished {
            correct: self.correct_count,
            total: self.questions_per_round,
        })
    }

    /// Closes a round whose result has been recorded
    pub fn finish_round(&mut self) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::Locked, "finish the round")?;
        if self.question_index + 1 < self.questions_per_round {
            return Err(SessionError::InvalidTransition {
                action: "finish the round",
                phase: self.phase,
            });
        }
        self.phase = QuizPhase::RoundComplete;
        Ok(())
    }

    /// Starts a fresh round from any phase; an abandoned round is not recorded
    pub fn restart(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.current_question = None;
        self.phase = QuizPhase::AwaitingQuestion;
    }

    fn expect_phase(&self, expected: QuizPhase, action: &'static str) -> Result<(), SessionError> {
        if self.phase != expected {
            return Err(SessionError::InvalidTransition {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }
}
