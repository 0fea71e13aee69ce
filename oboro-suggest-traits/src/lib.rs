#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Shared types for the [Oboro](../oboro/index.html) question suggestion service.
//!
//! This crate holds the domain model, the traits the suggestion pipeline uses
//! to reach its stores, and the errors that cross crate boundaries.

pub mod domain;
pub mod stores;

use std::time::Duration;

use fake::{faker::lorem::en::Words, Dummy, Fake, Faker};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use crate::domain::{
    normalize, AnswerRecord, FavoriteRecord, Lang, QueryRecord, Question, ResourceMetadata, Term,
    UnsupportedLang, VERB,
};
pub use crate::stores::{
    AnswerHistoryStore, MetadataStore, QueryLogStore, QuestionStore, StoreSet, VocabularyStore,
};

/// A request for a question suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRequest {
    /// The free-text phrase typed by the user.
    pub phrase: String,

    /// The language the question should be offered in.
    pub lang: Lang,

    /// The user asking, if known.
    pub user_id: Option<Uuid>,

    /// The position of the previously answered question, if this request
    /// follows an answer.
    pub prior_ordinal: Option<u32>,
}

impl SuggestionRequest {
    /// A request for a fresh session, with no user and no prior question.
    pub fn new<P: Into<String>>(phrase: P, lang: Lang) -> Self {
        Self {
            phrase: phrase.into(),
            lang,
            user_id: None,
            prior_ordinal: None,
        }
    }

    /// The ordinal the next suggested question should carry. Ordinals are
    /// 1-based.
    pub fn next_ordinal(&self) -> u32 {
        self.prior_ordinal.map_or(1, |prior| prior.saturating_add(1))
    }
}

impl<F> Dummy<F> for SuggestionRequest {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_config: &F, rng: &mut R) -> Self {
        Self {
            phrase: Words(1..5).fake_with_rng::<Vec<String>, R>(rng).join(" "),
            lang: Faker.fake_with_rng(rng),
            user_id: Some(Uuid::from_u128(rng.gen())),
            prior_ordinal: None,
        }
    }
}

/// A suggested question together with the resource it relates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionResult {
    /// The identifier of the suggested question.
    pub question_id: String,

    /// The Japanese text of the question.
    pub question_ja: String,

    /// The English text of the question.
    pub question_en: String,

    /// The resource chosen for the user.
    pub url: String,

    /// The title of the resource, or empty if none was recorded.
    pub title: String,

    /// The description of the resource, or empty if none was recorded.
    pub description: String,

    /// The position of the question within the session.
    pub ordinal: u32,
}

/// Errors that may occur while talking to a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store did not answer in time.
    #[error("The store did not respond within {0:?}")]
    Timeout(Duration),

    /// The store could not be reached.
    #[error("The store could not be reached: {0}")]
    Unavailable(#[source] anyhow::Error),

    /// The store failed while handling the call.
    #[error("There was an internal error in the store: {0}")]
    Internal(#[source] anyhow::Error),
}

/// Errors that may occur while setting up stores.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Reference data could not be read.
    #[error("Reference data could not be read: {0}")]
    Io(#[source] anyhow::Error),

    /// Reference data was read but is not in the expected format.
    #[error("Reference data is malformed: {0}")]
    Format(#[source] anyhow::Error),
}

/// Errors that may occur while producing a suggestion.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// No vocabulary term matched any token of the phrase.
    #[error("No vocabulary term matched the phrase")]
    NoMatch,

    /// The matched resources carry no eligible keywords.
    #[error("The matched resources carry no eligible keywords")]
    EmptyKeywordPool,

    /// None of the sampled keywords matched a question.
    #[error("No question matched the sampled keywords")]
    NoQuestionMatch,

    /// A store timed out or could not be reached.
    #[error("A store was unavailable while providing suggestions: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl SuggestError {
    /// A short, stable name for the kind of error, for metrics and responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoMatch => "no-match",
            Self::EmptyKeywordPool => "empty-keyword-pool",
            Self::NoQuestionMatch => "no-question-match",
            Self::StoreUnavailable(_) => "store-unavailable",
        }
    }

    /// Whether the user should get an apology rather than a service failure.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_ordinal_starts_at_one() {
        let request = SuggestionRequest::new("go", Lang::En);
        assert_eq!(request.next_ordinal(), 1);

        let request = SuggestionRequest {
            prior_ordinal: Some(3),
            ..request
        };
        assert_eq!(request.next_ordinal(), 4);
    }

    #[test]
    fn error_kinds_are_distinct() {
        let errors = [
            SuggestError::NoMatch,
            SuggestError::EmptyKeywordPool,
            SuggestError::NoQuestionMatch,
            SuggestError::StoreUnavailable(StoreError::Timeout(Duration::from_secs(1))),
        ];
        let mut kinds: Vec<_> = errors.iter().map(SuggestError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());

        assert!(errors[..3].iter().all(SuggestError::is_user_facing));
        assert!(!errors[3].is_user_facing());
    }
}
