//! Building the keyword pool and sampling keywords from it.

use futures::future::try_join_all;
use oboro_suggest_traits::{SuggestError, VocabularyStore};
use rand::Rng;
use std::collections::HashSet;

/// Gather the keyword pool for `resources`.
///
/// The terms of every resource are read highest usage count first. Verbs are
/// dropped, and so are terms whose value is exactly one of `tokens`.
/// Duplicates across resources are kept, so keywords shared by several
/// resources are more likely to be sampled.
///
/// Resources are read concurrently, but the pool keeps resource order.
///
/// # Errors
/// [`SuggestError::StoreUnavailable`] if the vocabulary could not be read.
pub async fn build_keyword_pool(
    resources: &[String],
    tokens: &[&str],
    vocabulary: &dyn VocabularyStore,
) -> Result<Vec<String>, SuggestError> {
    let per_resource = try_join_all(
        resources
            .iter()
            .map(|href| vocabulary.find_terms_by_resource(href)),
    )
    .await?;

    Ok(per_resource
        .into_iter()
        .flatten()
        .filter(|term| !term.is_verb())
        .filter(|term| !tokens.contains(&term.value.as_str()))
        .map(|term| term.value)
        .collect())
}

/// Whether a sample is made of pairwise distinct keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// A draw without duplicates was found.
    Distinct,
    /// Every attempt produced duplicates; the last draw was kept.
    Degraded,
}

/// The keywords drawn for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordSample {
    /// The drawn keywords, in draw order. Always the configured count long.
    pub keywords: Vec<String>,
    /// How many draws were made.
    pub attempts: usize,
    /// Whether the keywords are pairwise distinct.
    pub outcome: SampleOutcome,
}

/// Draws a fixed number of keywords from a pool.
#[derive(Clone, Debug)]
pub struct KeywordSampler {
    /// How many keywords make up a sample.
    count: usize,
    /// How many draws to make while looking for one without duplicates.
    max_attempts: usize,
}

impl KeywordSampler {
    /// Create a sampler. Both values are raised to at least one.
    pub fn new(count: usize, max_attempts: usize) -> Self {
        Self {
            count: count.max(1),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Draw `count` keywords uniformly, with replacement, from `pool`.
    ///
    /// The whole draw is repeated until it has no duplicates, up to
    /// `max_attempts` times. If every attempt has duplicates the last draw is
    /// returned with [`SampleOutcome::Degraded`].
    ///
    /// # Errors
    /// [`SuggestError::EmptyKeywordPool`] if `pool` is empty.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        pool: &[String],
        rng: &mut R,
    ) -> Result<KeywordSample, SuggestError> {
        if pool.is_empty() {
            return Err(SuggestError::EmptyKeywordPool);
        }

        let mut keywords = Vec::with_capacity(self.count);
        for attempt in 1..=self.max_attempts {
            keywords = (0..self.count)
                .map(|_| pool[rng.gen_range(0..pool.len())].clone())
                .collect();

            if all_distinct(&keywords) {
                return Ok(KeywordSample {
                    keywords,
                    attempts: attempt,
                    outcome: SampleOutcome::Distinct,
                });
            }
        }

        Ok(KeywordSample {
            keywords,
            attempts: self.max_attempts,
            outcome: SampleOutcome::Degraded,
        })
    }
}

/// Whether no value appears twice in `values`.
fn all_distinct(values: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value))
}
