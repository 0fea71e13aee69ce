//! Stores for what users do: answers given, searches made.

use async_trait::async_trait;
use dashmap::DashMap;
use oboro_suggest_traits::{AnswerHistoryStore, AnswerRecord, QueryLogStore, QueryRecord, StoreError};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Answer history for every user, held in memory.
#[derive(Debug, Default)]
pub struct MemoryAnswerHistory {
    /// Answers keyed by user, in the order they were recorded.
    users: DashMap<Uuid, Vec<AnswerRecord>>,
}

impl MemoryAnswerHistory {
    /// The number of users with a history.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl AnswerHistoryStore for MemoryAnswerHistory {
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        let mut created = false;
        self.users.entry(user_id).or_insert_with(|| {
            created = true;
            Vec::new()
        });
        if created {
            tracing::debug!(r#type = "stores.answers.user-created", %user_id, "Created user history");
        }
        Ok(())
    }

    async fn append(&self, record: AnswerRecord) -> Result<(), StoreError> {
        self.users.entry(record.user_id).or_default().push(record);
        Ok(())
    }

    async fn answers(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>, StoreError> {
        Ok(self
            .users
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

/// An append-only log of reported searches.
#[derive(Debug, Default)]
pub struct MemoryQueryLog {
    /// Every reported search, oldest first.
    queries: Mutex<Vec<QueryRecord>>,
}

impl MemoryQueryLog {
    /// A copy of every reported search, oldest first.
    pub async fn queries(&self) -> Vec<QueryRecord> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl QueryLogStore for MemoryQueryLog {
    async fn record_query(&self, query: QueryRecord) -> Result<(), StoreError> {
        self.queries.lock().await.push(query);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryAnswerHistory, MemoryQueryLog};
    use oboro_suggest_traits::{AnswerHistoryStore, AnswerRecord, Lang, QueryLogStore, QueryRecord};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn answer(user_id: Uuid, ordinal: u32) -> AnswerRecord {
        AnswerRecord {
            user_id,
            question_id: "5f0c9e0b1a2b3c4d5e6f7a8b".to_string(),
            ordinal,
            answer_choice: 3,
            lang: Lang::Ja,
        }
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let history = MemoryAnswerHistory::default();
        let user_id = Uuid::from_u128(7);

        history.ensure_user(user_id).await.unwrap();
        history.append(answer(user_id, 1)).await.unwrap();
        history.ensure_user(user_id).await.unwrap();

        assert_eq!(history.user_count(), 1);
        assert_eq!(history.answers(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn answers_keep_their_order() {
        let history = MemoryAnswerHistory::default();
        let user_id = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);

        for ordinal in 1..=3 {
            history.append(answer(user_id, ordinal)).await.unwrap();
        }
        history.append(answer(other, 1)).await.unwrap();

        let ordinals: Vec<u32> = history
            .answers(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.ordinal)
            .collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert!(history.answers(Uuid::from_u128(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn queries_are_appended() {
        let log = MemoryQueryLog::default();
        for value in ["go", "rust"] {
            log.record_query(QueryRecord {
                href: "https://example.org".to_string(),
                search_value: value.to_string(),
                is_checked: false,
            })
            .await
            .unwrap();
        }
        let values: Vec<String> = log
            .queries()
            .await
            .into_iter()
            .map(|q| q.search_value)
            .collect();
        assert_eq!(values, vec!["go", "rust"]);
    }
}
