use std::path::{Path, PathBuf};

use log::info;

use super::Profile;
use crate::error::Result;
use crate::storage;

/// The `profiles.json` document: an array of
/// `{"nickname", "score", "quiz_attempts"}` objects.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable documents load as an empty collection. A document
    /// that exists but does not parse is an error.
    pub fn load(&self) -> Result<Vec<Profile>> {
        let raw = match storage::read_document(&self.path) {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let profiles: Vec<Profile> = serde_json::from_str(&raw)?;
        info!("Loaded {} profiles from {}", profiles.len(), self.path.display());
        Ok(profiles)
    }

    pub fn save(&self, profiles: &[Profile]) -> Result<()> {
        storage::write_document(&self.path, profiles)
    }
}
