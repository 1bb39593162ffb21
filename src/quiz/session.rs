use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Question, QuizCatalog};
use crate::error::{QuizError, Result};

/// Draws up to `max_count` distinct questions from `quiz_name` in random order.
///
/// Creators cannot take their own quiz. Seeded quizzes have no creator and
/// are open to everyone.
pub fn select_questions<R>(
    catalog: &QuizCatalog,
    quiz_name: &str,
    requester: &str,
    max_count: usize,
    rng: &mut R,
) -> Result<Vec<Question>>
where
    R: Rng + ?Sized,
{
    let quiz = catalog
        .get(quiz_name)
        .ok_or_else(|| QuizError::NotFound(quiz_name.to_string()))?;
    if quiz.is_created_by(requester) {
        return Err(QuizError::SelfAuthored {
            quiz: quiz_name.to_string(),
            requester: requester.to_string(),
        });
    }

    let mut drawn = quiz.questions().to_vec();
    drawn.shuffle(rng);
    drawn.truncate(max_count);
    Ok(drawn)
}

/// Number of answers that match their question, position by position.
pub fn score<S: AsRef<str>>(questions: &[Question], answers: &[S]) -> Result<u32> {
    if questions.len() != answers.len() {
        return Err(QuizError::LengthMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|&(question, answer)| question.is_correct(answer.as_ref()))
        .count();
    u32::try_from(correct).map_err(|_| {
        QuizError::validation(format!("{} correct answers do not fit a score.", correct))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub quiz_name: String,
    pub score: u32,
    pub total: usize,
}

/// One run through a quiz: the drawn questions and the answers given so far.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_name: String,
    questions: Vec<Question>,
    answers: Vec<String>,
}

impl QuizSession {
    pub fn new(quiz_name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            quiz_name: quiz_name.into(),
            questions,
            answers: Vec::new(),
        }
    }

    pub fn start<R>(
        catalog: &QuizCatalog,
        quiz_name: &str,
        requester: &str,
        max_count: usize,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let questions = select_questions(catalog, quiz_name, requester, max_count, rng)?;
        debug!(
            "{} started {} with {} questions",
            requester,
            quiz_name,
            questions.len()
        );
        Ok(Self::new(quiz_name, questions))
    }

    pub fn quiz_name(&self) -> &str {
        &self.quiz_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 1-based number of the question waiting for an answer.
    pub fn question_number(&self) -> usize {
        self.answers.len() + 1
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    /// Records an answer to the current question and reports whether it was
    /// right. `None` once every question is answered.
    pub fn submit(&mut self, answer: &str) -> Option<bool> {
        let correct = self.current()?.is_correct(answer);
        self.answers.push(answer.to_string());
        Some(correct)
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Fails with `LengthMismatch` if questions are still unanswered.
    pub fn finish(self) -> Result<SessionOutcome> {
        let score = score(&self.questions, &self.answers)?;
        Ok(SessionOutcome {
            quiz_name: self.quiz_name,
            score,
            total: self.questions.len(),
        })
    }
}
