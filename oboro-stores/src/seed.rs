//! Loading reference data from a JSON document.

use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use anyhow::Context;
use oboro_suggest_traits::{Question, ResourceMetadata, SetupError, StoreSet, Term};
use serde::Deserialize;

use crate::{MemoryAnswerHistory, MemoryMetadata, MemoryQueryLog, MemoryQuestionBank, MemoryVocabulary};

/// Reference data the service starts with.
///
/// ```json
/// {
///   "words": [{"value": "Go", "href": "https://go.dev", "type": "Noun", "count": 3}],
///   "questions": [{"id": "...", "question_ja": "...", "question_en": "...", ...}],
///   "favorites": [{"href": "https://go.dev", "title": "Go", "description": "..."}]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    /// Vocabulary terms.
    #[serde(default)]
    pub words: Vec<Term>,

    /// The question bank.
    #[serde(default)]
    pub questions: Vec<Question>,

    /// Known resource titles and descriptions.
    #[serde(default)]
    pub favorites: Vec<ResourceMetadata>,
}

impl SeedData {
    /// Read seed data from a JSON file.
    ///
    /// # Errors
    /// [`SetupError::Io`] if the file cannot be opened, and
    /// [`SetupError::Format`] if it is not a valid seed document.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Opening seed data at {}", path.display()))
            .map_err(SetupError::Io)?;
        let seed: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing seed data at {}", path.display()))
            .map_err(SetupError::Format)?;

        tracing::info!(
            r#type = "stores.seed.loaded",
            path = %path.display(),
            word_count = seed.words.len(),
            question_count = seed.questions.len(),
            favorite_count = seed.favorites.len(),
            "Loaded seed data"
        );
        Ok(seed)
    }

    /// Build in-memory stores holding this data. User history starts empty.
    pub fn into_stores(self) -> StoreSet {
        StoreSet {
            vocabulary: Arc::new(MemoryVocabulary::new(self.words)),
            questions: Arc::new(MemoryQuestionBank::new(self.questions)),
            metadata: Arc::new(MemoryMetadata::new(self.favorites)),
            answers: Arc::new(MemoryAnswerHistory::default()),
            queries: Arc::new(MemoryQueryLog::default()),
        }
    }
}
