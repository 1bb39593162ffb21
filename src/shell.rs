use std::io::{self, BufRead, Write};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{QuizError, Result};
use crate::profile::{ProfileRegistry, SignIn};
use crate::quiz::{Question, QuizCatalog, QuizSession, OPTIONS_PER_QUESTION};

/// The interactive menu. Reads answers line by line from `input` and writes
/// prompts to `output`; running out of input is treated as choosing Exit.
pub struct Shell<R, W> {
    registry: ProfileRegistry,
    catalog: QuizCatalog,
    max_questions: usize,
    rng: StdRng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        registry: ProfileRegistry,
        catalog: QuizCatalog,
        max_questions: usize,
        input: R,
        output: W,
    ) -> Self {
        Self {
            registry,
            catalog,
            max_questions,
            rng: StdRng::from_entropy(),
            input,
            output,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn run(&mut self) -> Result<()> {
        match self.run_menu() {
            Err(QuizError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("Input closed");
                writeln!(self.output, "\nExiting program.")?;
                Ok(())
            }
            other => other,
        }
    }

    fn run_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the Quiz Generator!")?;
        self.sign_in()?;

        loop {
            writeln!(self.output, "\nMain Menu:")?;
            writeln!(self.output, "1. Start Quiz")?;
            writeln!(self.output, "2. Create Your Own Quiz")?;
            writeln!(self.output, "3. Delete Your Quiz")?;
            writeln!(self.output, "4. Display Leaderboard")?;
            writeln!(self.output, "5. Exit")?;

            match self.prompt("Enter your choice: ")?.as_str() {
                "1" => self.take_quiz()?,
                "2" => self.create_quiz()?,
                "3" => self.delete_quiz()?,
                "4" => self.show_leaderboard()?,
                "5" => {
                    writeln!(self.output, "Exiting program.")?;
                    return Ok(());
                }
                _ => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 5."
                )?,
            }
        }
    }

    fn sign_in(&mut self) -> Result<()> {
        loop {
            let nickname = self.prompt("Enter your nickname: ")?;
            match self.registry.sign_in(&nickname) {
                Ok(SignIn::Returning) => {
                    writeln!(self.output, "Welcome back, {}!", nickname)?;
                    return Ok(());
                }
                Ok(SignIn::Created) => {
                    writeln!(self.output, "Profile {} created successfully!", nickname)?;
                    return Ok(());
                }
                Err(QuizError::Validation(message)) => writeln!(self.output, "{}", message)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn active_nickname(&self) -> Result<String> {
        self.registry
            .active()
            .map(|p| p.nickname().to_string())
            .ok_or_else(|| QuizError::validation("No profile is signed in."))
    }

    fn take_quiz(&mut self) -> Result<()> {
        let nickname = self.active_nickname()?;
        writeln!(self.output, "Welcome, {}!", nickname)?;
        if self.catalog.is_empty() {
            writeln!(self.output, "No quizzes available.")?;
            return Ok(());
        }

        let mut session = loop {
            writeln!(self.output, "Available Categories:")?;
            for name in self.catalog.names() {
                writeln!(self.output, "- {}", name)?;
            }
            let category = self.prompt("Choose a category: ")?;
            if category.is_empty() {
                writeln!(self.output, "Category cannot be blank.")?;
                continue;
            }
            match QuizSession::start(
                &self.catalog,
                &category,
                &nickname,
                self.max_questions,
                &mut self.rng,
            ) {
                Ok(session) => break session,
                Err(QuizError::SelfAuthored { .. }) => writeln!(
                    self.output,
                    "You cannot start a quiz that you created. Please choose another category."
                )?,
                Err(QuizError::NotFound(_)) => writeln!(
                    self.output,
                    "Invalid category. Please choose a valid category."
                )?,
                Err(e) => return Err(e),
            }
        };

        while let Some(question) = session.current() {
            let number = session.question_number();
            self.print_question(number, question)?;
            let answer = self.prompt("Enter your choice: ")?;
            if session.submit(&answer) == Some(true) {
                writeln!(self.output, "Correct!")?;
            } else {
                writeln!(self.output, "Incorrect!")?;
            }
        }

        let outcome = session.finish()?;
        writeln!(
            self.output,
            "Your score: {} out of {}",
            outcome.score, outcome.total
        )?;
        if let Err(e) = self.registry.update_score(&nickname, outcome.score) {
            warn!("Score for {} not recorded: {}", nickname, e);
            writeln!(self.output, "Your score could not be saved: {}", e)?;
        }
        Ok(())
    }

    fn print_question(&mut self, number: usize, question: &Question) -> Result<()> {
        writeln!(self.output, "Question {}: {}", number, question.text())?;
        for (i, option) in question.options().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        Ok(())
    }

    fn create_quiz(&mut self) -> Result<()> {
        let nickname = self.active_nickname()?;

        let name = loop {
            let name = self.prompt("Enter a name for your quiz: ")?;
            if name.is_empty() {
                writeln!(self.output, "Quiz name cannot be blank.")?;
            } else if self.catalog.get(&name).is_some() {
                writeln!(
                    self.output,
                    "Quiz name already exists. Please choose a different name."
                )?;
            } else {
                break name;
            }
        };

        let count = loop {
            let raw = self.prompt("How many questions would you like to add? ")?;
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => break n,
                _ => writeln!(self.output, "Invalid input. Please enter a positive number.")?,
            }
        };

        let mut questions = Vec::with_capacity(count);
        for i in 1..=count {
            let text = self.prompt_non_blank(
                &format!("Enter question {}: ", i),
                "Question cannot be blank.",
            )?;
            let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
            while options.len() < OPTIONS_PER_QUESTION {
                let option = self.prompt_non_blank(
                    &format!("Enter option {}: ", options.len() + 1),
                    "Option cannot be blank.",
                )?;
                options.push(option);
            }
            let answer = self.prompt_non_blank(
                "Enter the correct answer: ",
                "Correct answer cannot be blank.",
            )?;
            questions.push(Question::new(text, options, answer)?);
        }

        match self.catalog.create(&name, &nickname, questions) {
            Ok(()) => writeln!(self.output, "Quiz '{}' created successfully!", name)?,
            Err(e) => {
                warn!("Quiz {} by {} not saved: {}", name, nickname, e);
                writeln!(self.output, "Quiz '{}' could not be saved: {}", name, e)?;
            }
        }
        Ok(())
    }

    fn delete_quiz(&mut self) -> Result<()> {
        let nickname = self.active_nickname()?;
        writeln!(self.output, "Your Quizzes:")?;
        for name in self.catalog.created_by(&nickname) {
            writeln!(self.output, "- {}", name)?;
        }

        let name =
            self.prompt("Enter the name of the quiz you want to delete or press Enter to return: ")?;
        if name.is_empty() {
            return Ok(());
        }

        match self.catalog.delete(&name, &nickname) {
            Ok(_) => writeln!(self.output, "Quiz '{}' deleted successfully!", name)?,
            Err(QuizError::NotFound(_)) => writeln!(self.output, "Quiz not found.")?,
            Err(QuizError::NotAuthorized { .. }) => writeln!(
                self.output,
                "You can only delete quizzes that you created."
            )?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn show_leaderboard(&mut self) -> Result<()> {
        writeln!(self.output, "Leaderboard:")?;
        for (rank, profile) in self.registry.leaderboard().into_iter().enumerate() {
            writeln!(
                self.output,
                "{}. {}: {} points out of {} quiz attempts",
                rank + 1,
                profile.nickname(),
                profile.score(),
                profile.quiz_attempts()
            )?;
        }
        Ok(())
    }

    fn prompt_non_blank(&mut self, message: &str, complaint: &str) -> Result<String> {
        loop {
            let line = self.prompt(message)?;
            if !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "{}", complaint)?;
        }
    }

    /// One trimmed line of input. End of input surfaces as `UnexpectedEof`.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }
}
