//! Reference data stores that keep everything in local memory.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use oboro_suggest_traits::{
    normalize, FavoriteRecord, Lang, MetadataStore, Question, QuestionStore, ResourceMetadata,
    StoreError, Term, VocabularyStore,
};
use std::collections::HashMap;

/// A vocabulary index built once from a list of terms.
#[derive(Debug, Default)]
pub struct MemoryVocabulary {
    /// Terms keyed by normalized value, in the order they were given.
    by_value: HashMap<String, Vec<Term>>,

    /// Terms keyed by resource, highest usage count first. Terms with equal
    /// counts keep the order they were given.
    by_resource: HashMap<String, Vec<Term>>,
}

impl MemoryVocabulary {
    /// Index `terms`.
    pub fn new(terms: Vec<Term>) -> Self {
        let mut by_value: HashMap<String, Vec<Term>> = HashMap::new();
        let mut by_resource: HashMap<String, Vec<Term>> = HashMap::new();

        for term in terms {
            by_resource
                .entry(term.href.clone())
                .or_default()
                .push(term.clone());
            by_value.entry(term.normalized()).or_default().push(term);
        }

        for terms in by_resource.values_mut() {
            terms.sort_by(|a, b| b.count.cmp(&a.count));
        }

        tracing::debug!(
            r#type = "stores.vocabulary.indexed",
            value_count = by_value.len(),
            resource_count = by_resource.len(),
            "Indexed vocabulary"
        );

        Self {
            by_value,
            by_resource,
        }
    }
}

#[async_trait]
impl VocabularyStore for MemoryVocabulary {
    async fn find_terms_by_value(&self, normalized_value: &str) -> Result<Vec<Term>, StoreError> {
        // Callers normalize already, but a stray lower-case lookup should still match.
        Ok(self
            .by_value
            .get(&normalize(normalized_value))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_terms_by_resource(&self, href: &str) -> Result<Vec<Term>, StoreError> {
        Ok(self.by_resource.get(href).cloned().unwrap_or_default())
    }
}

/// A question bank held in memory.
#[derive(Debug, Default)]
pub struct MemoryQuestionBank {
    /// Every question, in the order they were given.
    questions: Vec<Question>,
}

impl MemoryQuestionBank {
    /// Hold `questions`.
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionBank {
    async fn find_by_language(&self, lang: Lang) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .questions
            .iter()
            .filter(|question| question.offered_in(lang))
            .cloned()
            .collect())
    }
}

/// Resource metadata, keyed by resource.
#[derive(Debug, Default)]
pub struct MemoryMetadata {
    /// The known resources.
    items: DashMap<String, ResourceMetadata>,
}

impl MemoryMetadata {
    /// Hold `items`. Later entries for the same resource replace earlier ones.
    pub fn new(items: Vec<ResourceMetadata>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|meta| (meta.href.clone(), meta))
                .collect(),
        }
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadata {
    async fn find_by_resource(&self, href: &str) -> Result<Option<ResourceMetadata>, StoreError> {
        Ok(self.items.get(href).map(|entry| entry.value().clone()))
    }

    async fn record_favorite(&self, favorite: FavoriteRecord) -> Result<(), StoreError> {
        match self.items.entry(favorite.href.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().is_checked = favorite.is_checked;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ResourceMetadata {
                    href: favorite.href,
                    is_checked: favorite.is_checked,
                    ..ResourceMetadata::default()
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryMetadata, MemoryQuestionBank, MemoryVocabulary};
    use fake::{Fake, Faker};
    use oboro_suggest_traits::{
        FavoriteRecord, Lang, MetadataStore, Question, QuestionStore, ResourceMetadata, Term,
        VocabularyStore,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn vocabulary_lookup_by_value_ignores_case() {
        let vocabulary = MemoryVocabulary::new(vec![
            Term::new("Go", "https://example.org/a", "Noun", 1),
            Term::new("GO", "https://example.org/b", "Noun", 1),
            Term::new("Rust", "https://example.org/a", "Noun", 1),
        ]);
        let found = vocabulary
            .find_terms_by_value("GO")
            .await
            .expect("memory store is always available");
        let hrefs: Vec<_> = found.iter().map(|t| t.href.as_str()).collect();
        assert_eq!(hrefs, vec!["https://example.org/a", "https://example.org/b"]);

        let found = vocabulary.find_terms_by_value("go").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(vocabulary
            .find_terms_by_value("PYTHON")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn vocabulary_by_resource_is_sorted_by_count() {
        let vocabulary = MemoryVocabulary::new(vec![
            Term::new("a", "https://example.org/x", "Noun", 1),
            Term::new("b", "https://example.org/x", "Noun", 5),
            Term::new("c", "https://example.org/x", "Noun", 3),
            Term::new("d", "https://example.org/x", "Noun", 5),
            Term::new("e", "https://example.org/y", "Noun", 9),
        ]);
        let found = vocabulary
            .find_terms_by_resource("https://example.org/x")
            .await
            .unwrap();
        let values: Vec<_> = found.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["b", "d", "c", "a"]);
    }

    #[tokio::test]
    async fn question_bank_filters_by_language() {
        let questions = vec![
            Question {
                id: "untagged".to_string(),
                lang: None,
                ..Faker.fake()
            },
            Question {
                id: "english".to_string(),
                lang: Some(Lang::En),
                ..Faker.fake()
            },
            Question {
                id: "japanese".to_string(),
                lang: Some(Lang::Ja),
                ..Faker.fake()
            },
        ];
        let bank = MemoryQuestionBank::new(questions);

        let ids = |questions: Vec<Question>| -> Vec<String> {
            questions.into_iter().map(|q| q.id).collect()
        };
        assert_eq!(
            ids(bank.find_by_language(Lang::En).await.unwrap()),
            vec!["untagged", "english"]
        );
        assert_eq!(
            ids(bank.find_by_language(Lang::Ja).await.unwrap()),
            vec!["untagged", "japanese"]
        );
    }

    #[tokio::test]
    async fn favorites_keep_known_titles() {
        let metadata = MemoryMetadata::new(vec![ResourceMetadata {
            href: "https://example.org/go".to_string(),
            title: "Go".to_string(),
            description: "About Go".to_string(),
            is_checked: false,
        }]);

        metadata
            .record_favorite(FavoriteRecord {
                href: "https://example.org/go".to_string(),
                is_checked: true,
            })
            .await
            .unwrap();
        metadata
            .record_favorite(FavoriteRecord {
                href: "https://example.org/new".to_string(),
                is_checked: true,
            })
            .await
            .unwrap();

        let go = metadata
            .find_by_resource("https://example.org/go")
            .await
            .unwrap()
            .expect("known resource");
        assert_eq!(go.title, "Go");
        assert!(go.is_checked);

        let new = metadata
            .find_by_resource("https://example.org/new")
            .await
            .unwrap()
            .expect("recorded resource");
        assert_eq!(new.title, "");
        assert!(new.is_checked);

        assert!(metadata
            .find_by_resource("https://example.org/missing")
            .await
            .unwrap()
            .is_none());
    }
}
