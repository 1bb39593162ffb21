use std::path::{Path, PathBuf};

use log::info;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{validate_quiz, Question, Quiz};
use crate::error::{QuizError, Result};
use crate::storage;

/// Every quiz known to the application, keyed by name, in document order.
/// Backed by `categories.json` and rewritten in full after each change.
#[derive(Debug)]
pub struct QuizCatalog {
    path: PathBuf,
    quizzes: Vec<Quiz>,
}

impl QuizCatalog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut catalog = Self {
            path: path.into(),
            quizzes: Vec::new(),
        };
        catalog.load()?;
        Ok(catalog)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory quizzes with the document's. A missing document
    /// leaves the catalog empty.
    pub fn load(&mut self) -> Result<()> {
        let Some(raw) = storage::read_document(&self.path) else {
            self.quizzes.clear();
            return Ok(());
        };
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let quizzes = document
            .into_iter()
            .map(|(name, value)| Quiz::from_value(name, value))
            .collect::<Result<Vec<_>>>()?;

        info!("Loaded {} quizzes from {}", quizzes.len(), self.path.display());
        self.quizzes = quizzes;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        storage::write_document(&self.path, &CatalogDocument(&self.quizzes))
    }

    pub fn get(&self, name: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.quizzes.iter().map(|q| q.name()).collect()
    }

    pub fn created_by(&self, nickname: &str) -> Vec<&str> {
        self.quizzes
            .iter()
            .filter(|q| q.is_created_by(nickname))
            .map(|q| q.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// The name is trimmed before it is checked and stored.
    pub fn create(&mut self, name: &str, creator: &str, questions: Vec<Question>) -> Result<()> {
        let name = name.trim();
        validate_quiz(name, Some(creator), &questions)?;
        if self.get(name).is_some() {
            return Err(QuizError::DuplicateName(name.to_string()));
        }

        self.quizzes
            .push(Quiz::new(name, Some(creator.to_string()), questions));
        if let Err(e) = self.save() {
            self.quizzes.pop();
            return Err(e);
        }
        info!("{} created quiz {}", creator, name);
        Ok(())
    }

    /// Only the creator may delete a quiz, so seeded quizzes are never removed.
    pub fn delete(&mut self, name: &str, requester: &str) -> Result<Quiz> {
        let idx = self
            .quizzes
            .iter()
            .position(|q| q.name == name)
            .ok_or_else(|| QuizError::NotFound(name.to_string()))?;
        if !self.quizzes[idx].is_created_by(requester) {
            return Err(QuizError::NotAuthorized {
                quiz: name.to_string(),
                requester: requester.to_string(),
            });
        }

        let removed = self.quizzes.remove(idx);
        if let Err(e) = self.save() {
            self.quizzes.insert(idx, removed);
            return Err(e);
        }
        info!("{} deleted quiz {}", requester, name);
        Ok(removed)
    }
}

struct CatalogDocument<'a>(&'a [Quiz]);

impl Serialize for CatalogDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for quiz in self.0 {
            map.serialize_entry(quiz.name(), &quiz.to_document())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> Question {
        Question::new(format!("Question {}", n), ["a", "b", "c", "d"], "a").unwrap()
    }

    #[test]
    fn legacy_document_is_rewritten_in_object_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(
            &path,
            r#"{"Math": [{"question": "2+2?", "options": ["3","4","5","6"], "answer": "4"}]}"#,
        )
        .unwrap();

        let mut catalog = QuizCatalog::open(&path).unwrap();
        catalog.create("Mine", "alice", vec![question(1)]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["Math"]["creator"], serde_json::Value::Null);
        assert_eq!(raw["Math"]["questions"][0]["answer"], "4");
        assert_eq!(raw["Mine"]["creator"], "alice");
    }

    #[test]
    fn names_follow_document_then_creation_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(
            &path,
            r#"{
                "Zoology": [{"question": "Q", "options": ["a","b","c","d"], "answer": "a"}],
                "Art": [{"question": "Q", "options": ["a","b","c","d"], "answer": "a"}]
            }"#,
        )
        .unwrap();

        let mut catalog = QuizCatalog::open(&path).unwrap();
        catalog.create("Biology", "bob", vec![question(1)]).unwrap();
        assert_eq!(catalog.names(), vec!["Zoology", "Art", "Biology"]);

        let reopened = QuizCatalog::open(&path).unwrap();
        assert_eq!(reopened.names(), vec!["Zoology", "Art", "Biology"]);
    }

    #[test]
    fn create_rejects_blank_name_and_empty_quiz() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = QuizCatalog::open(dir.path().join("categories.json")).unwrap();

        assert!(matches!(
            catalog.create("   ", "alice", vec![question(1)]),
            Err(QuizError::Validation(_))
        ));
        assert!(matches!(
            catalog.create("Empty", "alice", Vec::new()),
            Err(QuizError::Validation(_))
        ));
        assert!(catalog.is_empty());
        assert!(!catalog.path().exists());
    }

    #[test]
    fn failed_save_leaves_catalog_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the document should be makes the rename fail.
        let path = dir.path().join("categories.json");
        std::fs::create_dir(&path).unwrap();
        let mut catalog = QuizCatalog {
            path,
            quizzes: Vec::new(),
        };

        assert!(catalog.create("Geo", "alice", vec![question(1)]).is_err());
        assert!(catalog.get("Geo").is_none());
    }

    #[test]
    fn failed_delete_keeps_quiz_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        let mut catalog = QuizCatalog::open(&path).unwrap();
        catalog.create("First", "alice", vec![question(1)]).unwrap();
        catalog.create("Second", "alice", vec![question(2)]).unwrap();
        catalog.create("Third", "alice", vec![question(3)]).unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            catalog.delete("Second", "alice"),
            Err(QuizError::Io(_))
        ));
        assert_eq!(catalog.names(), vec!["First", "Second", "Third"]);
        assert_eq!(catalog.get("Second").unwrap().questions(), &[question(2)]);
    }

    #[test]
    fn document_with_blank_quiz_name_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, r#"{"   ": {"creator": "", "questions": []}}"#).unwrap();

        assert!(matches!(
            QuizCatalog::open(&path),
            Err(QuizError::Validation(_))
        ));
    }
}
