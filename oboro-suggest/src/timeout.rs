//! Tools to make sure stores don't take excessive amounts of time.

use async_trait::async_trait;
use oboro_suggest_traits::{
    FavoriteRecord, Lang, MetadataStore, Question, QuestionStore, ResourceMetadata, StoreError,
    Term, VocabularyStore,
};
use std::{future::Future, sync::Arc, time::Duration};

/// A combinator store that fails with [`StoreError::Timeout`] if the wrapped
/// store takes too long.
///
/// Dropping a call in progress drops the wrapped store's future too, so a
/// cancelled request stops waiting on its stores.
pub struct TimeoutStore<S: ?Sized> {
    /// The time to wait before giving up on the wrapped store.
    max_time: Duration,

    /// The store to forward calls to.
    inner: Arc<S>,
}

impl<S: ?Sized> TimeoutStore<S> {
    /// Wrap `inner` so every call is bounded by `max_time`.
    pub fn new(max_time: Duration, inner: Arc<S>) -> Self {
        Self { max_time, inner }
    }
}

/// Run `fut`, replacing it with a timeout error if it does not finish within `max_time`.
async fn bounded<T, F>(max_time: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(max_time, fut)
        .await
        .unwrap_or_else(|_elapsed| Err(StoreError::Timeout(max_time)))
}

#[async_trait]
impl<S: VocabularyStore + ?Sized> VocabularyStore for TimeoutStore<S> {
    async fn find_terms_by_value(&self, normalized_value: &str) -> Result<Vec<Term>, StoreError> {
        bounded(
            self.max_time,
            self.inner.find_terms_by_value(normalized_value),
        )
        .await
    }

    async fn find_terms_by_resource(&self, href: &str) -> Result<Vec<Term>, StoreError> {
        bounded(self.max_time, self.inner.find_terms_by_resource(href)).await
    }
}

#[async_trait]
impl<S: QuestionStore + ?Sized> QuestionStore for TimeoutStore<S> {
    async fn find_by_language(&self, lang: Lang) -> Result<Vec<Question>, StoreError> {
        bounded(self.max_time, self.inner.find_by_language(lang)).await
    }
}

#[async_trait]
impl<S: MetadataStore + ?Sized> MetadataStore for TimeoutStore<S> {
    async fn find_by_resource(&self, href: &str) -> Result<Option<ResourceMetadata>, StoreError> {
        bounded(self.max_time, self.inner.find_by_resource(href)).await
    }

    async fn record_favorite(&self, favorite: FavoriteRecord) -> Result<(), StoreError> {
        bounded(self.max_time, self.inner.record_favorite(favorite)).await
    }
}

#[cfg(test)]
mod tests {
    use super::TimeoutStore;
    use async_trait::async_trait;
    use oboro_suggest_traits::{Lang, Question, QuestionStore, StoreError};
    use std::{sync::Arc, time::Duration};

    struct DelayStore(Duration);

    #[async_trait]
    impl QuestionStore for DelayStore {
        async fn find_by_language(&self, _lang: Lang) -> Result<Vec<Question>, StoreError> {
            tokio::time::sleep(self.0).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_store_too_slow() {
        let store = TimeoutStore::new(
            Duration::from_millis(10),
            Arc::new(DelayStore(Duration::from_millis(1000))),
        );
        let res = store.find_by_language(Lang::Ja).await;
        assert!(matches!(res, Err(StoreError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_store_fast_enough() {
        let store = TimeoutStore::new(
            Duration::from_millis(1000),
            Arc::new(DelayStore(Duration::from_millis(10))),
        );
        let res = store
            .find_by_language(Lang::En)
            .await
            .expect("store should answer in time");
        assert!(res.is_empty());
    }

    #[tokio::test]
    async fn test_wraps_trait_objects() {
        let inner: Arc<dyn QuestionStore> = Arc::new(DelayStore(Duration::from_millis(1)));
        let store = TimeoutStore::new(Duration::from_millis(1000), inner);
        assert!(store.find_by_language(Lang::Ja).await.is_ok());
    }
}
