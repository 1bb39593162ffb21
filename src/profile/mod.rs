pub mod store;

use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
pub use store::ProfileStore;

/// A player's identity and cumulative quiz record.
///
/// The nickname is validated once at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord")]
pub struct Profile {
    nickname: String,
    score: u32,
    quiz_attempts: u32,
    #[serde(skip)]
    active: bool,
}

#[derive(Deserialize)]
struct ProfileRecord {
    nickname: String,
    #[serde(default)]
    score: u32,
    #[serde(default)]
    quiz_attempts: u32,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = QuizError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let mut profile = Profile::new(record.nickname)?;
        profile.score = record.score;
        profile.quiz_attempts = record.quiz_attempts;
        Ok(profile)
    }
}

impl Profile {
    pub fn new(nickname: impl Into<String>) -> Result<Self> {
        let nickname = nickname.into();
        validate_nickname(&nickname)?;
        Ok(Self {
            nickname,
            score: 0,
            quiz_attempts: 0,
            active: false,
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn quiz_attempts(&self) -> u32 {
        self.quiz_attempts
    }

    /// True only for the profile signed in during this run.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Adds one finished quiz worth `points` to the record. Fails without
    /// touching the record if either counter would overflow.
    pub fn record_attempt(&mut self, points: u32) -> Result<()> {
        let score = self.score.checked_add(points).ok_or_else(|| {
            QuizError::validation(format!("Score of {} would overflow.", self.nickname))
        })?;
        let quiz_attempts = self.quiz_attempts.checked_add(1).ok_or_else(|| {
            QuizError::validation(format!("Quiz attempts of {} would overflow.", self.nickname))
        })?;
        self.score = score;
        self.quiz_attempts = quiz_attempts;
        Ok(())
    }
}

pub fn validate_nickname(nickname: &str) -> Result<()> {
    if nickname.trim().is_empty() {
        return Err(QuizError::validation("Nickname cannot be blank."));
    }
    Ok(())
}

/// How a sign-in resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignIn {
    Returning,
    Created,
}

/// All known profiles in insertion order, written through to a
/// [`ProfileStore`] after every change.
#[derive(Debug)]
pub struct ProfileRegistry {
    store: ProfileStore,
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    pub fn open(store: ProfileStore) -> Result<Self> {
        let profiles = store.load()?;
        let mut seen = HashSet::new();
        if let Some(dup) = profiles.iter().find(|p| !seen.insert(p.nickname.as_str())) {
            return Err(QuizError::validation(format!(
                "Nickname '{}' appears more than once in {}.",
                dup.nickname,
                store.path().display()
            )));
        }
        Ok(Self { store, profiles })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn find_by_nickname(&self, nickname: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.nickname == nickname)
    }

    /// Returns `Ok(false)` if the nickname is already taken.
    pub fn add_profile(&mut self, nickname: &str) -> Result<bool> {
        let profile = Profile::new(nickname)?;
        if self.find_by_nickname(nickname).is_some() {
            return Ok(false);
        }

        self.profiles.push(profile);
        if let Err(e) = self.store.save(&self.profiles) {
            self.profiles.pop();
            return Err(e);
        }
        info!("Created profile {}", nickname);
        Ok(true)
    }

    /// Unknown nicknames are ignored.
    pub fn update_score(&mut self, nickname: &str, delta: u32) -> Result<()> {
        let Some(idx) = self.profiles.iter().position(|p| p.nickname == nickname) else {
            debug!("Score update for unknown profile {} ignored", nickname);
            return Ok(());
        };

        let previous = self.profiles[idx].clone();
        self.profiles[idx].record_attempt(delta)?;
        if let Err(e) = self.store.save(&self.profiles) {
            self.profiles[idx] = previous;
            return Err(e);
        }
        info!(
            "{} scored {} (total {} over {} attempts)",
            nickname, delta, self.profiles[idx].score, self.profiles[idx].quiz_attempts
        );
        Ok(())
    }

    /// Highest score first. Equal scores keep registration order.
    pub fn leaderboard(&self) -> Vec<&Profile> {
        let mut ranked: Vec<&Profile> = self.profiles.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Finds or creates the profile and makes it the only active one.
    pub fn sign_in(&mut self, nickname: &str) -> Result<SignIn> {
        validate_nickname(nickname)?;
        let outcome = if self.find_by_nickname(nickname).is_some() {
            SignIn::Returning
        } else {
            self.add_profile(nickname)?;
            SignIn::Created
        };

        for profile in &mut self.profiles {
            profile.active = profile.nickname == nickname;
        }
        debug!("{} signed in ({:?})", nickname, outcome);
        Ok(outcome)
    }

    pub fn active(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.active)
    }
}
