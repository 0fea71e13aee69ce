//! The capabilities the suggestion pipeline needs from its collaborators.
//!
//! Every method is fallible with [`StoreError`], since implementations may
//! talk to a remote database.

use crate::{
    domain::{AnswerRecord, FavoriteRecord, Lang, QueryRecord, Question, ResourceMetadata, Term},
    StoreError,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Lookups into the vocabulary index.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// Find every term whose normalized value equals `normalized_value`.
    ///
    /// Terms are returned in the order the store holds them.
    async fn find_terms_by_value(&self, normalized_value: &str) -> Result<Vec<Term>, StoreError>;

    /// Find every term associated with the resource `href`, ordered by usage
    /// count, highest first.
    async fn find_terms_by_resource(&self, href: &str) -> Result<Vec<Term>, StoreError>;
}

/// Read access to the question bank.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Every question that may be offered in `lang`. Questions without a
    /// language tag are offered in every language.
    async fn find_by_language(&self, lang: Lang) -> Result<Vec<Question>, StoreError>;
}

/// Titles and descriptions recorded for resources.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Find what is known about `href`. Absence is not an error.
    async fn find_by_resource(&self, href: &str) -> Result<Option<ResourceMetadata>, StoreError>;

    /// Record that a user marked (or unmarked) a resource.
    async fn record_favorite(&self, favorite: FavoriteRecord) -> Result<(), StoreError>;
}

/// The append-only log of answers, keyed by user.
#[async_trait]
pub trait AnswerHistoryStore: Send + Sync {
    /// Make sure a history exists for `user_id`, creating an empty one if needed.
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), StoreError>;

    /// Append an answer to the user's history.
    async fn append(&self, record: AnswerRecord) -> Result<(), StoreError>;

    /// Read back a user's history, oldest first. Unknown users have no answers.
    async fn answers(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>, StoreError>;
}

/// The append-only log of searches reported by clients.
#[async_trait]
pub trait QueryLogStore: Send + Sync {
    /// Append a search to the log.
    async fn record_query(&self, query: QueryRecord) -> Result<(), StoreError>;
}

/// Every store the service works with, shared between requests.
#[derive(Clone)]
pub struct StoreSet {
    /// The vocabulary index.
    pub vocabulary: Arc<dyn VocabularyStore>,
    /// The question bank.
    pub questions: Arc<dyn QuestionStore>,
    /// Resource titles and descriptions.
    pub metadata: Arc<dyn MetadataStore>,
    /// Per-user answer history.
    pub answers: Arc<dyn AnswerHistoryStore>,
    /// Reported searches.
    pub queries: Arc<dyn QueryLogStore>,
}
