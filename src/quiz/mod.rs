pub mod catalog;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
pub use catalog::QuizCatalog;
pub use session::{QuizSession, SessionOutcome};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A named set of questions. `creator` is `None` for the seeded quizzes that
/// ship with the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    name: String,
    creator: Option<String>,
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(name: impl Into<String>, creator: Option<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            creator,
            questions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_created_by(&self, nickname: &str) -> bool {
        self.creator() == Some(nickname)
    }

    pub(crate) fn from_value(name: String, value: serde_json::Value) -> Result<Self> {
        let (creator, questions) = match serde_json::from_value::<QuizDocument>(value)? {
            QuizDocument::Seeded(questions) => (None, questions),
            QuizDocument::Authored { creator, questions } => (creator, questions),
        };
        validate_quiz(&name, creator.as_deref(), &questions)?;
        Ok(Self::new(name, creator, questions))
    }

    pub(crate) fn to_document(&self) -> QuizBody<'_> {
        QuizBody {
            creator: self.creator(),
            questions: &self.questions,
        }
    }
}

/// Rules every stored quiz follows, whether typed in or read from disk.
pub(crate) fn validate_quiz(
    name: &str,
    creator: Option<&str>,
    questions: &[Question],
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(QuizError::validation("Quiz name cannot be blank."));
    }
    if creator.is_some_and(|c| c.trim().is_empty()) {
        return Err(QuizError::validation("Nickname cannot be blank."));
    }
    if questions.is_empty() {
        return Err(QuizError::validation("A quiz needs at least one question."));
    }
    Ok(())
}

/// The two shapes a quiz takes in `categories.json`: a bare question array
/// from the seeded data, or an object naming its creator.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizDocument {
    Seeded(Vec<Question>),
    Authored {
        #[serde(default)]
        creator: Option<String>,
        questions: Vec<Question>,
    },
}

/// What gets written back. Always the object form.
#[derive(Serialize)]
pub(crate) struct QuizBody<'a> {
    creator: Option<&'a str>,
    questions: &'a [Question],
}

/// A multiple choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: [String; OPTIONS_PER_QUESTION],
    answer: String,
}

#[derive(Deserialize)]
struct QuestionRecord {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuizError;

    fn try_from(record: QuestionRecord) -> Result<Self> {
        Question::new(record.question, record.options, record.answer)
    }
}

impl Question {
    pub fn new<I, S>(text: impl Into<String>, options: I, answer: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        let answer = answer.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();

        if text.trim().is_empty() {
            return Err(QuizError::validation("Question cannot be blank."));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(QuizError::validation("Option cannot be blank."));
        }
        let count = options.len();
        let options: [String; OPTIONS_PER_QUESTION] = options.try_into().map_err(|_| {
            QuizError::validation(format!(
                "Each question must have exactly {} options, got {}.",
                OPTIONS_PER_QUESTION, count
            ))
        })?;
        if answer.trim().is_empty() {
            return Err(QuizError::validation("Correct answer cannot be blank."));
        }

        Ok(Self {
            text,
            options,
            answer,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Case and surrounding whitespace are ignored.
    pub fn is_correct(&self, given: &str) -> bool {
        normalize(given) == normalize(&self.answer)
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}
