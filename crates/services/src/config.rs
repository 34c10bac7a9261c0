//! Quiz configuration read from the environment.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::engine::DEFAULT_TIME_LIMIT_SECS;

use crate::Clock;
use crate::error::ConfigError;
use crate::provider::{
    BuiltinQuestionProvider, FileQuestionProvider, HttpQuestionProvider, QuestionProvider,
};
use crate::quiz::QuizLoopService;

pub const ENV_SOURCE: &str = "QUIZ_SOURCE";
pub const ENV_TIME_LIMIT: &str = "QUIZ_TIME_LIMIT_SECS";
pub const ENV_SHUFFLE: &str = "QUIZ_SHUFFLE";

pub const MIN_TIME_LIMIT_SECS: u32 = 1;
pub const MAX_TIME_LIMIT_SECS: u32 = 600;

/// Where questions come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuestionSource {
    #[default]
    Builtin,
    File(PathBuf),
    Url(String),
}

impl QuestionSource {
    /// `builtin`, an `http(s)://` URL, or anything else as a file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptySource` for a blank value.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptySource);
        }
        if raw.eq_ignore_ascii_case("builtin") {
            return Ok(Self::Builtin);
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Url(raw.to_owned()));
        }
        Ok(Self::File(PathBuf::from(raw)))
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub source: QuestionSource,
    pub time_limit_secs: u32,
    pub shuffle_questions: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: QuestionSource::Builtin,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            shuffle_questions: false,
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_SOURCE`, `QUIZ_TIME_LIMIT_SECS` and `QUIZ_SHUFFLE`; unset
    /// variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`QuizConfig::from_env`] with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_SOURCE) {
            config.source = QuestionSource::parse(&raw)?;
        }
        if let Some(raw) = lookup(ENV_TIME_LIMIT) {
            config.time_limit_secs = parse_time_limit(&raw)?;
        }
        if let Some(raw) = lookup(ENV_SHUFFLE) {
            config.shuffle_questions = parse_flag(&raw)?;
        }
        Ok(config)
    }

    /// Provider matching the configured source.
    #[must_use]
    pub fn provider(&self) -> Arc<dyn QuestionProvider> {
        match &self.source {
            QuestionSource::Builtin => Arc::new(BuiltinQuestionProvider::new()),
            QuestionSource::File(path) => Arc::new(FileQuestionProvider::new(path)),
            QuestionSource::Url(url) => Arc::new(HttpQuestionProvider::new(url.clone())),
        }
    }

    #[must_use]
    pub fn loop_service(&self, clock: Clock) -> QuizLoopService {
        QuizLoopService::new(clock, self.provider())
            .with_time_limit(self.time_limit_secs)
            .with_shuffle_questions(self.shuffle_questions)
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidTimeLimit` unless `raw` is an integer in range.
pub fn parse_time_limit(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|secs| (MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(secs))
        .ok_or_else(|| ConfigError::InvalidTimeLimit {
            raw: raw.to_owned(),
            min: MIN_TIME_LIMIT_SECS,
            max: MAX_TIME_LIMIT_SECS,
        })
}

/// # Errors
///
/// Returns `ConfigError::InvalidFlag` for anything but true/false, 1/0, yes/no.
pub fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(raw.to_owned())),
    }
}
