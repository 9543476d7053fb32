use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use super::{
    session::{QuizSession, SessionCommand},
    state::QuizSessionState,
    SessionError,
};
use crate::{
    catalog::{ImageFetcher, MovieCatalogSource},
    config::QuizConfig,
    event::EventBus,
    question::QuestionFactory,
    stats::StatisticsStore,
};

const COMMAND_CAPACITY: usize = 32;

/// Cloneable front door to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub async fn submit_answer(&self, answer: bool) -> Result<(), SessionError> {
        self.send(SessionCommand::SubmitAnswer(answer)).await
    }

    pub async fn advance(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Advance).await
    }

    pub async fn restart(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Restart).await
    }

    pub async fn reload_catalog(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::ReloadCatalog).await
    }

    /// Current scoring state, observed after every earlier command was handled
    pub async fn snapshot(&self) -> Result<QuizSessionState, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Snapshot(reply)).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

/// Wires a factory to the given collaborators and runs a session on its own task.
///
/// Subscribe to `event_bus` before calling this to see the first events.
/// The task ends once every `SessionHandle` clone is dropped.
pub fn spawn_session(
    config: &QuizConfig,
    source: Arc<dyn MovieCatalogSource>,
    images: Arc<dyn ImageFetcher>,
    statistics: Arc<dyn StatisticsStore>,
    event_bus: EventBus,
) -> (SessionHandle, JoinHandle<()>) {
    let (factory_tx, factory_rx) = mpsc::unbounded_channel();
    let factory = QuestionFactory::new(source, images, config.rating_threshold, factory_tx);

    let session = QuizSession::new(config.questions_per_round, factory, statistics, event_bus);
    info!(
        session_id = %session.id(),
        questions_per_round = config.questions_per_round,
        rating_threshold = config.rating_threshold,
        "Spawning quiz session"
    );

    let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
    let task = tokio::spawn(session.run(command_rx, factory_rx));

    (
        SessionHandle {
            commands: command_tx,
        },
        task,
    )
}
