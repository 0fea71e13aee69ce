//! The suggestion pipeline, from phrase to question.

use std::{sync::Arc, time::Instant};

use cadence::{Counted, CountedExt, StatsdClient};
use oboro_settings::SuggestSettings;
use oboro_suggest_traits::{
    MetadataStore, QuestionStore, StoreSet, SuggestError, SuggestionRequest, SuggestionResult,
    VocabularyStore,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    keywords::{build_keyword_pool, KeywordSampler, SampleOutcome},
    metrics::TimedMicros,
    questions::match_questions,
    resources::match_resources,
    selection::{pick, resolve_resource},
    timeout::TimeoutStore,
    tokenizer,
};

/// Produces one question suggestion per request.
///
/// The suggester holds no mutable state. Randomness is supplied per call, so
/// concurrent requests never share a generator.
pub struct Suggester {
    /// The vocabulary index, bounded by the store timeout.
    vocabulary: TimeoutStore<dyn VocabularyStore>,

    /// The question bank, bounded by the store timeout.
    questions: TimeoutStore<dyn QuestionStore>,

    /// Resource metadata, bounded by the store timeout.
    metadata: TimeoutStore<dyn MetadataStore>,

    /// Draws keywords from the keyword pool.
    sampler: KeywordSampler,

    /// Resources containing this are never candidates.
    excluded_marker: String,

    /// The Statsd client used to record statistics.
    metrics_client: StatsdClient,
}

impl Suggester {
    /// Build a suggester over `stores`.
    pub fn new(settings: &SuggestSettings, stores: &StoreSet, metrics_client: StatsdClient) -> Self {
        Self {
            vocabulary: TimeoutStore::new(settings.store_timeout, Arc::clone(&stores.vocabulary)),
            questions: TimeoutStore::new(settings.store_timeout, Arc::clone(&stores.questions)),
            metadata: TimeoutStore::new(settings.store_timeout, Arc::clone(&stores.metadata)),
            sampler: KeywordSampler::new(settings.keyword_count, settings.max_sample_attempts),
            excluded_marker: settings.excluded_resource_marker.clone(),
            metrics_client,
        }
    }

    /// Suggest a question for `request`, numbered `ordinal`, using a fresh
    /// random generator.
    ///
    /// # Errors
    /// Any [`SuggestError`]; a failure at any stage aborts the suggestion.
    pub async fn suggest(
        &self,
        request: &SuggestionRequest,
        ordinal: u32,
    ) -> Result<SuggestionResult, SuggestError> {
        let mut rng = StdRng::from_entropy();
        self.suggest_with_rng(request, ordinal, &mut rng).await
    }

    /// Suggest a question for `request`, numbered `ordinal`, drawing every
    /// random choice from `rng`.
    ///
    /// With a seeded `rng` and unchanged stores the result is reproducible.
    ///
    /// # Errors
    /// Any [`SuggestError`]; a failure at any stage aborts the suggestion.
    #[tracing::instrument(skip(self, request, rng), fields(lang = %request.lang))]
    pub async fn suggest_with_rng<R: Rng + Send + ?Sized>(
        &self,
        request: &SuggestionRequest,
        ordinal: u32,
        rng: &mut R,
    ) -> Result<SuggestionResult, SuggestError> {
        let start = Instant::now();
        let result = self.run_pipeline(request, ordinal, rng).await;

        self.metrics_client
            .time_micros("suggest.duration-us", start.elapsed())
            .ok();
        let outcome = match &result {
            Ok(_) => "ok",
            Err(error) => error.kind(),
        };
        self.metrics_client
            .count_with_tags("suggest.outcome", 1_i64)
            .with_tag("result", outcome)
            .try_send()
            .ok();

        match &result {
            Ok(suggestion) => tracing::info!(
                r#type = "suggest.provided",
                question_id = %suggestion.question_id,
                url = %suggestion.url,
                "Providing suggestion"
            ),
            Err(error) if error.is_user_facing() => {
                tracing::info!(r#type = "suggest.unmatched", %error, "No suggestion for request")
            }
            Err(error) => {
                tracing::error!(r#type = "suggest.error", %error, "Error providing suggestion")
            }
        }

        result
    }

    /// Run every stage in order.
    async fn run_pipeline<R: Rng + Send + ?Sized>(
        &self,
        request: &SuggestionRequest,
        ordinal: u32,
        rng: &mut R,
    ) -> Result<SuggestionResult, SuggestError> {
        let tokens = tokenizer::tokens(&request.phrase);

        let resources = match_resources(&tokens, &self.vocabulary, &self.excluded_marker).await?;
        tracing::debug!(
            r#type = "suggest.resources.matched",
            token_count = tokens.len(),
            resource_count = resources.len(),
            "Matched candidate resources"
        );

        let pool = build_keyword_pool(&resources, &tokens, &self.vocabulary).await?;
        let sample = self.sampler.sample(&pool, &mut *rng)?;
        if sample.outcome == SampleOutcome::Degraded {
            tracing::warn!(
                r#type = "suggest.keywords.degraded-sample",
                pool_size = pool.len(),
                attempts = sample.attempts,
                "Could not draw distinct keywords"
            );
            self.metrics_client.incr("suggest.keywords.degraded").ok();
        }
        tracing::debug!(
            r#type = "suggest.keywords.sampled",
            pool_size = pool.len(),
            keywords = ?sample.keywords,
            "Sampled keywords"
        );

        let questions = self.questions.find_by_language(request.lang).await?;
        let candidates = match_questions(&questions, &sample.keywords);
        tracing::debug!(
            r#type = "suggest.questions.matched",
            question_count = questions.len(),
            candidate_count = candidates.len(),
            "Matched candidate questions"
        );

        let url = pick(&resources, &mut *rng, || SuggestError::NoMatch)?;
        let question = pick(&candidates, &mut *rng, || SuggestError::NoQuestionMatch)?;
        let resource = resolve_resource(url, &self.metadata).await?;

        Ok(SuggestionResult {
            question_id: question.id.clone(),
            question_ja: question.question_ja.clone(),
            question_en: question.question_en.clone(),
            url: resource.url,
            title: resource.title,
            description: resource.description,
            ordinal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Suggester;
    use async_trait::async_trait;
    use cadence::{SpyMetricSink, StatsdClient};
    use oboro_settings::SuggestSettings;
    use oboro_stores::{
        MemoryAnswerHistory, MemoryMetadata, MemoryQueryLog, MemoryQuestionBank, MemoryVocabulary,
    };
    use oboro_suggest_traits::{
        Lang, Question, ResourceMetadata, StoreError, StoreSet, SuggestError, SuggestionRequest,
        Term, VocabularyStore,
    };
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use std::{sync::Arc, time::Duration};

    const GO_VS_PYTHON: &str = "https://example.org/go-vs-python";
    const PYTHON_TIPS: &str = "https://example.org/python-tips";

    fn terms() -> Vec<Term> {
        vec![
            Term::new("Go", GO_VS_PYTHON, "Noun", 9),
            Term::new("Python", GO_VS_PYTHON, "Noun", 8),
            Term::new("goroutine", GO_VS_PYTHON, "Noun", 7),
            Term::new("compile", GO_VS_PYTHON, "Verb", 6),
            Term::new("channel", GO_VS_PYTHON, "Noun", 5),
            Term::new("Python", PYTHON_TIPS, "Noun", 9),
            Term::new("decorator", PYTHON_TIPS, "Noun", 4),
            Term::new("generator", PYTHON_TIPS, "Noun", 3),
            Term::new("Go", "https://www.google.com/search?q=go", "Noun", 50),
        ]
    }

    fn question(id: &str, seed: &str, seed_type: &str, lang: Option<Lang>) -> Question {
        Question {
            id: id.to_string(),
            question_ja: format!("{}は好きですか?", seed),
            question_en: format!("Do you like {}?", seed),
            seed_ja: seed.to_string(),
            seed_en: seed.to_string(),
            seed_type: seed_type.to_string(),
            lang,
        }
    }

    fn questions() -> Vec<Question> {
        vec![
            question("000000000000000000000001", "goroutine", "Noun", None),
            question("000000000000000000000002", "channel", "Noun", None),
            question("000000000000000000000003", "decorator", "Noun", Some(Lang::En)),
            question("000000000000000000000004", "generator", "Noun", Some(Lang::Ja)),
            question("000000000000000000000005", "compile", "Verb", None),
        ]
    }

    fn stores(terms: Vec<Term>, questions: Vec<Question>) -> StoreSet {
        StoreSet {
            vocabulary: Arc::new(MemoryVocabulary::new(terms)),
            questions: Arc::new(MemoryQuestionBank::new(questions)),
            metadata: Arc::new(MemoryMetadata::new(vec![ResourceMetadata {
                href: GO_VS_PYTHON.to_string(),
                title: "Go vs Python".to_string(),
                description: "A comparison".to_string(),
                is_checked: false,
            }])),
            answers: Arc::new(MemoryAnswerHistory::default()),
            queries: Arc::new(MemoryQueryLog::default()),
        }
    }

    fn settings(keyword_count: usize) -> SuggestSettings {
        SuggestSettings {
            keyword_count,
            ..SuggestSettings::default()
        }
    }

    fn suggester(settings: &SuggestSettings, stores: &StoreSet) -> Suggester {
        let metrics_client = StatsdClient::from_sink("oboro-test", SpyMetricSink::new().1);
        Suggester::new(settings, stores, metrics_client)
    }

    #[tokio::test]
    async fn suggestion_comes_from_candidates() {
        let stores = stores(terms(), questions());
        let suggester = suggester(&settings(3), &stores);
        let request = SuggestionRequest::new("Go\u{3000}Python", Lang::Ja);
        let valid_questions = [
            "000000000000000000000001",
            "000000000000000000000002",
            "000000000000000000000004",
        ];

        for seed in 0..50 {
            let result = suggester
                .suggest_with_rng(&request, 2, &mut StdRng::seed_from_u64(seed))
                .await;
            match result {
                Ok(suggestion) => {
                    assert!([GO_VS_PYTHON, PYTHON_TIPS].contains(&suggestion.url.as_str()));
                    assert!(valid_questions.contains(&suggestion.question_id.as_str()));
                    assert_eq!(suggestion.ordinal, 2);
                    if suggestion.url == GO_VS_PYTHON {
                        assert_eq!(suggestion.title, "Go vs Python");
                    } else {
                        assert_eq!(suggestion.title, "");
                        assert_eq!(suggestion.description, "");
                    }
                }
                // Three keywords drawn from a pool of four may miss every seed.
                Err(SuggestError::NoQuestionMatch) => (),
                Err(error) => panic!("unexpected error {:?}", error),
            }
        }
    }

    #[tokio::test]
    async fn same_seed_same_suggestion() {
        let stores = stores(terms(), questions());
        let suggester = suggester(&settings(3), &stores);
        let request = SuggestionRequest::new("go python", Lang::Ja);

        for seed in 0..20 {
            let first = suggester
                .suggest_with_rng(&request, 1, &mut StdRng::seed_from_u64(seed))
                .await;
            let second = suggester
                .suggest_with_rng(&request, 1, &mut StdRng::seed_from_u64(seed))
                .await;
            assert_eq!(first.ok(), second.ok());
        }
    }

    #[tokio::test]
    async fn verb_seeded_questions_are_never_suggested() {
        let terms = vec![
            Term::new("Go", GO_VS_PYTHON, "Noun", 1),
            Term::new("compile", GO_VS_PYTHON, "Noun", 1),
        ];
        let stores = stores(terms, questions());
        let suggester = suggester(&settings(1), &stores);
        let request = SuggestionRequest::new("go", Lang::En);

        let result = suggester
            .suggest_with_rng(&request, 1, &mut StdRng::seed_from_u64(1))
            .await;
        assert!(matches!(result, Err(SuggestError::NoQuestionMatch)));
    }

    #[tokio::test]
    async fn empty_phrase_is_no_match() {
        let stores = stores(terms(), questions());
        let suggester = suggester(&settings(3), &stores);

        for phrase in ["", "   ", "\u{3000}\t"] {
            let request = SuggestionRequest::new(phrase, Lang::Ja);
            let result = suggester.suggest(&request, 1).await;
            assert!(matches!(result, Err(SuggestError::NoMatch)));
        }
    }

    #[tokio::test]
    async fn unknown_phrase_is_no_match() {
        let stores = stores(terms(), questions());
        let suggester = suggester(&settings(3), &stores);
        let request = SuggestionRequest::new("haskell", Lang::Ja);
        assert!(matches!(
            suggester.suggest(&request, 1).await,
            Err(SuggestError::NoMatch)
        ));
    }

    #[tokio::test]
    async fn only_verbs_and_inputs_is_empty_pool() {
        let terms = vec![
            Term::new("Go", GO_VS_PYTHON, "Noun", 3),
            Term::new("compile", GO_VS_PYTHON, "Verb", 2),
        ];
        let stores = stores(terms, questions());
        let suggester = suggester(&settings(3), &stores);
        let request = SuggestionRequest::new("Go", Lang::Ja);
        assert!(matches!(
            suggester.suggest(&request, 1).await,
            Err(SuggestError::EmptyKeywordPool)
        ));
    }

    #[tokio::test]
    async fn empty_question_bank_is_no_question_match() {
        let stores = stores(terms(), vec![]);
        let suggester = suggester(&settings(3), &stores);
        let request = SuggestionRequest::new("Go Python", Lang::Ja);
        assert!(matches!(
            suggester.suggest(&request, 1).await,
            Err(SuggestError::NoQuestionMatch)
        ));
    }

    #[tokio::test]
    async fn degraded_samples_are_counted() {
        let terms = vec![
            Term::new("Go", GO_VS_PYTHON, "Noun", 3),
            Term::new("goroutine", GO_VS_PYTHON, "Noun", 2),
        ];
        let stores = stores(terms, questions());
        let (rx, sink) = SpyMetricSink::new();
        let suggester = Suggester::new(
            &settings(3),
            &stores,
            StatsdClient::from_sink("oboro", sink),
        );
        let request = SuggestionRequest::new("Go", Lang::Ja);

        let suggestion = suggester
            .suggest_with_rng(&request, 1, &mut StdRng::seed_from_u64(11))
            .await
            .expect("the only keyword matches a question");
        assert_eq!(suggestion.question_id, "000000000000000000000001");

        let lines: Vec<String> = rx
            .try_iter()
            .map(|bytes| String::from_utf8(bytes).expect("metrics are utf8"))
            .collect();
        assert!(lines
            .iter()
            .any(|line| line.starts_with("oboro.suggest.keywords.degraded:1|c")));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("oboro.suggest.outcome:1|c|#result:ok")));
    }

    struct SlowVocabulary;

    #[async_trait]
    impl VocabularyStore for SlowVocabulary {
        async fn find_terms_by_value(&self, _value: &str) -> Result<Vec<Term>, StoreError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![])
        }

        async fn find_terms_by_resource(&self, _href: &str) -> Result<Vec<Term>, StoreError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn slow_store_is_unavailable() {
        let stores = StoreSet {
            vocabulary: Arc::new(SlowVocabulary),
            ..stores(terms(), questions())
        };
        let settings = SuggestSettings {
            store_timeout: Duration::from_millis(20),
            ..SuggestSettings::default()
        };
        let suggester = suggester(&settings, &stores);
        let request = SuggestionRequest::new("go", Lang::Ja);

        let result = suggester.suggest(&request, 1).await;
        assert!(matches!(
            result,
            Err(SuggestError::StoreUnavailable(StoreError::Timeout(_)))
        ));
    }
}
