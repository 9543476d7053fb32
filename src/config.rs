use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_QUESTIONS_PER_ROUND: u32 = 10;
pub const DEFAULT_RATING_THRESHOLD: f32 = 7.0;
pub const DEFAULT_CATALOG_URL: &str = "https://tv-api.com/en/API/Top250Movies";

const ENV_PREFIX: &str = "MOVIE_QUIZ_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("{0} must be at least 1")]
    OutOfRange(String),
}

/// Runtime settings for a quiz session and its collaborators
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub questions_per_round: u32,
    pub rating_threshold: f32,
    /// Top-250 endpoint without the API key segment
    pub catalog_url: String,
    pub api_key: Option<String>,
    pub http_timeout: Duration,
    pub stats_path: PathBuf,
    /// Play from the bundled catalog instead of the network
    pub offline: bool,
    /// Directory holding bundled posters for offline play
    pub assets_dir: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_round: DEFAULT_QUESTIONS_PER_ROUND,
            rating_threshold: DEFAULT_RATING_THRESHOLD,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
            http_timeout: Duration::from_secs(10),
            stats_path: default_stats_path(),
            offline: false,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl QuizConfig {
    /// Reads `MOVIE_QUIZ_*` environment variables on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key, value))
        };

        let mut config = Self::default();

        if let Some((key, value)) = var("QUESTIONS_PER_ROUND") {
            config.questions_per_round = parse(&key, &value)?;
        }
        if let Some((key, value)) = var("RATING_THRESHOLD") {
            config.rating_threshold = parse(&key, &value)?;
        }
        if let Some((_, value)) = var("CATALOG_URL") {
            config.catalog_url = value;
        }
        if let Some((_, value)) = var("API_KEY") {
            config.api_key = Some(value);
        }
        if let Some((key, value)) = var("HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(parse(&key, &value)?);
        }
        if let Some((_, value)) = var("STATS_PATH") {
            config.stats_path = PathBuf::from(value);
        }
        if let Some((key, value)) = var("OFFLINE") {
            config.offline = parse_flag(&key, &value)?;
        }
        if let Some((_, value)) = var("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(value);
        }

        if config.questions_per_round == 0 {
            return Err(ConfigError::OutOfRange(format!(
                "{}QUESTIONS_PER_ROUND",
                ENV_PREFIX
            )));
        }

        Ok(config)
    }

    /// Full catalog URL including the API key path segment, if any
    pub fn catalog_endpoint(&self) -> String {
        let base = self.catalog_url.trim_end_matches('/');
        match &self.api_key {
            Some(key) => format!("{}/{}", base, key),
            None => base.to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `$HOME/.local/state/movie-quiz/statistics.json`, or the working directory without `HOME`
fn default_stats_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("movie-quiz")
            .join("statistics.json"),
        Err(_) => PathBuf::from("statistics.json"),
    }
}
