//! Profiles, quiz catalog and quiz sessions for a terminal quiz game, plus the
//! interactive shell that drives them.

pub mod config;
pub mod error;
pub mod profile;
pub mod quiz;
pub mod shell;
mod storage;

pub use error::{QuizError, Result};
