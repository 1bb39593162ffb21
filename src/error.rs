/// Everything that can go wrong in the profile and quiz core.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("{0}")]
    Validation(String),

    #[error("quiz '{0}' already exists")]
    DuplicateName(String),

    #[error("quiz '{0}' not found")]
    NotFound(String),

    #[error("'{requester}' is not the creator of quiz '{quiz}'")]
    NotAuthorized { quiz: String, requester: String },

    #[error("'{requester}' created quiz '{quiz}' and cannot take it")]
    SelfAuthored { quiz: String, requester: String },

    #[error("{questions} questions but {answers} answers")]
    LengthMismatch { questions: usize, answers: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    pub fn validation(message: impl Into<String>) -> Self {
        QuizError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
