#![allow(dead_code)] // Test utilities may not all be used in every test

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use movie_quiz::{
    config::QuizConfig,
    spawn_session,
    stats::{FileStatisticsRepository, StatisticService},
    EventBus, Movie, QuizEvent, SessionHandle,
};

use super::mocks::{MockCatalogSource, MockImageFetcher};

const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub handle: SessionHandle,
    pub events: broadcast::Receiver<QuizEvent>,
    pub statistics: Arc<StatisticService>,
    pub catalog: Arc<MockCatalogSource>,
    pub images: Arc<MockImageFetcher>,
    pub stats_path: PathBuf,
    pub _stats_dir: TempDir,
    pub _session_task: JoinHandle<()>,
}

impl TestSetup {
    /// Next quiz event, failing the test if none arrives in time
    pub async fn next_event(&mut self) -> QuizEvent {
        tokio::time::timeout(EVENT_TIMEOUT, self.events.recv())
            .await
            .expect("timed out waiting for a quiz event")
            .expect("event bus closed")
    }

    /// Skips events until the next question and returns its position label
    pub async fn expect_question(&mut self) -> String {
        loop {
            match self.next_event().await {
                QuizEvent::QuestionPresented { position_label, .. } => return position_label,
                QuizEvent::LoadFailed { message } => panic!("catalog failed: {}", message),
                _ => continue,
            }
        }
    }

    pub async fn expect_outcome(&mut self) -> bool {
        match self.next_event().await {
            QuizEvent::AnswerOutcome { is_correct } => is_correct,
            other => panic!("expected an answer outcome, got {:?}", other),
        }
    }

    /// Answers every question of a round and returns the round summary
    pub async fn play_round(&mut self, answers: &[bool]) -> QuizEvent {
        for (index, answer) in answers.iter().enumerate() {
            let label = self.expect_question().await;
            assert_eq!(label, format!("{}/{}", index + 1, answers.len()));
            self.handle.submit_answer(*answer).await.unwrap();
            self.expect_outcome().await;
            self.handle.advance().await.unwrap();
        }

        let summary = self.next_event().await;
        assert!(
            matches!(summary, QuizEvent::RoundComplete { .. }),
            "expected round summary, got {:?}",
            summary
        );
        summary
    }
}

pub struct TestSetupBuilder {
    movies: Vec<Movie>,
    questions_per_round: u32,
    catalog_failures: usize,
    images: MockImageFetcher,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            movies: vec![Movie::new(
                "The Godfather",
                Some(9.2),
                "https://img.example.com/godfather._V1_UX128_.jpg",
            )],
            questions_per_round: 10,
            catalog_failures: 0,
            images: MockImageFetcher::serving(vec![0xFF, 0xD8]),
        }
    }

    pub fn with_movies(mut self, movies: Vec<Movie>) -> Self {
        self.movies = movies;
        self
    }

    pub fn with_single_movie(self, rating: Option<f32>) -> Self {
        self.with_movies(vec![Movie::new("Only Movie", rating, "only.jpg")])
    }

    pub fn with_questions_per_round(mut self, questions_per_round: u32) -> Self {
        self.questions_per_round = questions_per_round;
        self
    }

    pub fn with_catalog_failures(mut self, failures: usize) -> Self {
        self.catalog_failures = failures;
        self
    }

    pub fn with_broken_posters(mut self) -> Self {
        self.images = MockImageFetcher::broken();
        self
    }

    pub async fn build(self) -> TestSetup {
        let stats_dir = tempfile::tempdir().unwrap();
        let stats_path = stats_dir.path().join("statistics.json");

        let config = QuizConfig {
            questions_per_round: self.questions_per_round,
            stats_path: stats_path.clone(),
            ..QuizConfig::default()
        };

        let statistics = Arc::new(
            StatisticService::open(Arc::new(FileStatisticsRepository::new(&stats_path)))
                .await
                .unwrap(),
        );
        let catalog = Arc::new(MockCatalogSource::new(self.movies, self.catalog_failures));
        let images = Arc::new(self.images);

        let event_bus = EventBus::default();
        let events = event_bus.subscribe();

        let (handle, session_task) = spawn_session(
            &config,
            catalog.clone(),
            images.clone(),
            statistics.clone(),
            event_bus,
        );

        TestSetup {
            handle,
            events,
            statistics,
            catalog,
            images,
            stats_path,
            _stats_dir: stats_dir,
            _session_task: session_task,
        }
    }
}
