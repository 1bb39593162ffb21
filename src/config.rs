use std::env;
use std::path::PathBuf;

use crate::error::{QuizError, Result};

pub const PROFILES_PATH_VAR: &str = "QUIZ_PROFILES_PATH";
pub const CATEGORIES_PATH_VAR: &str = "QUIZ_CATEGORIES_PATH";
pub const MAX_QUESTIONS_VAR: &str = "QUIZ_MAX_QUESTIONS";

/// Where the documents live and how many questions a quiz draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profiles_path: PathBuf,
    pub categories_path: PathBuf,
    /// Upper bound on questions per quiz. `usize::MAX` means every question.
    pub max_questions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_path: PathBuf::from("profiles.json"),
            categories_path: PathBuf::from("categories.json"),
            max_questions: usize::MAX,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv()` first if a `.env` file
    /// should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(PROFILES_PATH_VAR) {
            config.profiles_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(CATEGORIES_PATH_VAR) {
            config.categories_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(MAX_QUESTIONS_VAR) {
            config.max_questions = parse_max_questions(&raw)?;
        }
        Ok(config)
    }
}

fn parse_max_questions(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(QuizError::validation(format!(
            "{} must be a positive number, got '{}'",
            MAX_QUESTIONS_VAR, raw
        ))),
        Ok(n) => Ok(n),
    }
}
