use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::{
    state::{Advance, QuizSessionState},
    SessionError,
};
use crate::{
    event::{EventBus, QuizEvent},
    question::{FactoryEvent, QuestionFactory},
    stats::StatisticsStore,
};

/// Inputs from the presentation layer
#[derive(Debug)]
pub enum SessionCommand {
    SubmitAnswer(bool),
    Advance,
    Restart,
    ReloadCatalog,
    Snapshot(oneshot::Sender<QuizSessionState>),
}

/// Drives one quiz session.
///
/// All inputs (presentation commands and factory signals) are handled one at
/// a time through `&mut self`, so scoring never races with question delivery.
pub struct QuizSession {
    id: Uuid,
    state: QuizSessionState,
    factory: QuestionFactory,
    statistics: Arc<dyn StatisticsStore>,
    event_bus: EventBus,
}

impl QuizSession {
    pub fn new(
        questions_per_round: u32,
        factory: QuestionFactory,
        statistics: Arc<dyn StatisticsStore>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: QuizSessionState::new(questions_per_round),
            factory,
            statistics,
            event_bus,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &QuizSessionState {
        &self.state
    }

    /// Kicks off the catalog load; the first question follows once it arrives
    pub async fn start(&mut self) {
        info!(session_id = %self.id, "Starting quiz session");
        self.factory.load_catalog().await;
    }

    pub async fn reload_catalog(&mut self) {
        info!(session_id = %self.id, "Reloading movie catalog");
        self.factory.load_catalog().await;
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn submit_answer(&mut self, given_answer: bool) -> Result<bool, SessionError> {
        let is_correct = self.state.submit_answer(given_answer)?;
        debug!(
            is_correct,
            correct_count = self.state.correct_count(),
            "Answer scored"
        );
        self.event_bus.emit(QuizEvent::AnswerOutcome { is_correct });
        Ok(is_correct)
    }

    /// Moves past an answered question.
    ///
    /// On the last question the round is persisted before the session enters
    /// `RoundComplete`. If persisting fails the session stays locked, so the
    /// next `advance` retries the write.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn advance(&mut self) -> Result<(), SessionError> {
        match self.state.advance()? {
            Advance::NextQuestion { question_index } => {
                debug!(question_index, "Advancing to next question");
                self.request_question().await;
            }
            Advance::RoundFinished { correct, total } => {
                let aggregate = match self.statistics.record_round(correct, total).await {
                    Ok(aggregate) => aggregate,
                    Err(err) => {
                        self.event_bus.emit(QuizEvent::StorageFailed {
                            message: err.to_string(),
                        });
                        return Err(err.into());
                    }
                };

                self.state.finish_round()?;
                info!(correct, total, "Round complete");

                self.event_bus.emit(QuizEvent::RoundComplete {
                    correct,
                    total,
                    accuracy_percent: aggregate.total_accuracy(),
                    best_game: aggregate.best_game,
                    games_played: aggregate.games_played,
                });
            }
        }
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn restart(&mut self) {
        info!(
            previous_correct = self.state.correct_count(),
            "Restarting round"
        );
        self.state.restart();
        self.request_question().await;
    }

    pub async fn handle_command(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        match command {
            SessionCommand::SubmitAnswer(answer) => {
                self.submit_answer(answer)?;
            }
            SessionCommand::Advance => self.advance().await?,
            SessionCommand::Restart => self.restart().await,
            SessionCommand::ReloadCatalog => self.reload_catalog().await,
            SessionCommand::Snapshot(reply) => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("Snapshot requester went away");
                }
            }
        }
        Ok(())
    }

    pub async fn handle_factory_event(&mut self, event: FactoryEvent) {
        match event {
            FactoryEvent::CatalogLoaded { movie_count: 0 } => {
                warn!(session_id = %self.id, "Movie catalog is empty");
                self.event_bus.emit(QuizEvent::LoadFailed {
                    message: "the movie catalog is empty".to_string(),
                });
            }
            FactoryEvent::CatalogLoaded { movie_count } => {
                self.event_bus.emit(QuizEvent::CatalogLoaded { movie_count });
                if self.state.current_question().is_none() {
                    self.request_question().await;
                }
            }
            FactoryEvent::CatalogLoadFailed(err) => {
                self.event_bus.emit(QuizEvent::LoadFailed {
                    message: err.to_string(),
                });
            }
            FactoryEvent::QuestionReady {
                generation,
                question,
            } => {
                if !self.factory.is_current(generation) {
                    debug!(generation, "Ignoring question for superseded request");
                    return;
                }

                let text = question.text().to_string();
                let image_data = question.image_data().to_vec();
                match self.state.present(question) {
                    Ok(()) => {
                        let position_label = self.state.position_label();
                        debug!(position = %position_label, "Question presented");
                        self.event_bus.emit(QuizEvent::QuestionPresented {
                            text,
                            image_data,
                            position_label,
                        });
                    }
                    Err(err) => debug!(error = %err, "Ignoring unexpected question"),
                }
            }
        }
    }

    /// Processes commands and factory signals until every command sender is dropped
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut factory_events: mpsc::UnboundedReceiver<FactoryEvent>,
    ) {
        self.start().await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        if let Err(err) = self.handle_command(command).await {
                            if err.is_invalid_transition() {
                                debug!(error = %err, "Command rejected");
                            } else {
                                error!(session_id = %self.id, error = %err, "Command failed");
                            }
                        }
                    }
                    None => break,
                },
                Some(event) = factory_events.recv() => self.handle_factory_event(event).await,
            }
        }

        info!(session_id = %self.id, "Quiz session ended");
    }

    async fn request_question(&mut self) {
        if self.factory.request_next_question().await.is_none() {
            warn!(
                session_id = %self.id,
                "No question available yet - waiting for the catalog"
            );
        }
    }
}
