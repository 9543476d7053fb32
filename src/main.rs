use movie_quiz::{
    config::QuizConfig,
    quiz::{QuizResultsViewModel, QuizStepViewModel},
    spawn_session, AppError, AppState, QuizEvent, SessionHandle, StatisticsStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// What the terminal is waiting for the player to type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Nothing,
    Answer,
    PlayAgain,
    Retry,
    RetrySave,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr so they never interleave with the questions
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_quiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = QuizConfig::from_env()?;
    let state = AppState::from_config(&config).await?;

    info!(stats_path = %config.stats_path.display(), "Starting movie quiz");
    println!(
        "Games played so far: {} (average accuracy {:.2}%)",
        state.statistics.games_played().await,
        state.statistics.total_accuracy().await
    );

    let mut events = state.event_bus.subscribe();
    let (handle, task) = spawn_session(
        &config,
        state.source.clone(),
        state.images.clone(),
        state.statistics.clone(),
        state.event_bus.clone(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut prompt = Prompt::Nothing;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => prompt = render(&event, &handle, prompt).await?,
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Terminal fell behind quiz events"),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match respond(&line, prompt, &handle).await? {
                    Some(next) => prompt = next,
                    None => break,
                }
            }
        }
    }

    drop(handle);
    if let Err(err) = task.await {
        error!(error = %err, "Quiz session task failed");
    }
    Ok(())
}

/// Prints an event and returns the prompt that follows it
async fn render(
    event: &QuizEvent,
    handle: &SessionHandle,
    current: Prompt,
) -> Result<Prompt, AppError> {
    if let Some(step) = QuizStepViewModel::from_event(event) {
        println!(
            "\n[{}] {} (poster: {} bytes)\nAnswer y/n:",
            step.question_number,
            step.question,
            step.image.len()
        );
        return Ok(Prompt::Answer);
    }

    if let Some(results) = QuizResultsViewModel::from_event(event) {
        println!("\n{}\n{}\n{}? (y/n)", results.title, results.text, results.button_text);
        return Ok(Prompt::PlayAgain);
    }

    match event {
        QuizEvent::CatalogLoaded { movie_count } => {
            println!("Loaded {} movies", movie_count);
            Ok(current)
        }
        QuizEvent::AnswerOutcome { is_correct } => {
            println!("{}", if *is_correct { "Correct!" } else { "Wrong!" });
            handle.advance().await?;
            Ok(Prompt::Nothing)
        }
        QuizEvent::LoadFailed { message } => {
            println!("Could not load movies: {}\nTry again? (y/n)", message);
            Ok(Prompt::Retry)
        }
        QuizEvent::StorageFailed { message } => {
            println!("Could not save your result: {}\nTry again? (y/n)", message);
            Ok(Prompt::RetrySave)
        }
        _ => Ok(current),
    }
}

/// Acts on a line of player input. `None` means the player wants to quit.
async fn respond(
    line: &str,
    prompt: Prompt,
    handle: &SessionHandle,
) -> Result<Option<Prompt>, AppError> {
    let answer = match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        "q" | "quit" => return Ok(None),
        _ => None,
    };

    let Some(answer) = answer else {
        println!("Please type y or n (q to quit)");
        return Ok(Some(prompt));
    };

    match prompt {
        Prompt::Answer => {
            handle.submit_answer(answer).await?;
            Ok(Some(Prompt::Nothing))
        }
        Prompt::PlayAgain if answer => {
            handle.restart().await?;
            Ok(Some(Prompt::Nothing))
        }
        Prompt::Retry if answer => {
            handle.reload_catalog().await?;
            Ok(Some(Prompt::Nothing))
        }
        Prompt::RetrySave if answer => {
            handle.advance().await?;
            Ok(Some(Prompt::Nothing))
        }
        Prompt::PlayAgain | Prompt::Retry | Prompt::RetrySave => Ok(None),
        Prompt::Nothing => {
            println!("Hold on, the next question is loading");
            Ok(Some(prompt))
        }
    }
}
