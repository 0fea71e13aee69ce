//! Matching sampled keywords against the question bank.

use oboro_suggest_traits::{normalize, Question};

/// A question found eligible for the sampled keywords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCandidate {
    /// The question identifier.
    pub id: String,
    /// The Japanese text.
    pub question_ja: String,
    /// The English text.
    pub question_en: String,
}

impl From<&Question> for QuestionCandidate {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            question_ja: question.question_ja.clone(),
            question_en: question.question_en.clone(),
        }
    }
}

/// Select the questions whose seed term matches one of `keywords`.
///
/// Questions are visited in order. A question is accepted at the first keyword
/// (in sample order) that
///
/// - equals its Japanese or English seed term, ignoring case, and
/// - is not a substring, ignoring case, of the text of any question accepted
///   before it.
///
/// Questions seeded by a verb are never accepted. The substring rule keeps
/// near-duplicate questions out of the candidates; it compares against both
/// localized texts of the accepted questions.
pub fn match_questions(questions: &[Question], keywords: &[String]) -> Vec<QuestionCandidate> {
    let keywords: Vec<String> = keywords.iter().map(|keyword| normalize(keyword)).collect();
    let mut accepted_texts: Vec<String> = Vec::new();
    let mut candidates = Vec::new();

    for question in questions.iter().filter(|q| !q.is_verb_seeded()) {
        let seed_ja = normalize(&question.seed_ja);
        let seed_en = normalize(&question.seed_en);

        let eligible = keywords.iter().any(|keyword| {
            (*keyword == seed_en || *keyword == seed_ja)
                && !accepted_texts.iter().any(|text| text.contains(keyword.as_str()))
        });

        if eligible {
            accepted_texts.push(normalize(&question.question_ja));
            accepted_texts.push(normalize(&question.question_en));
            candidates.push(QuestionCandidate::from(question));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::{match_questions, QuestionCandidate};
    use fake::{Fake, Faker};
    use oboro_suggest_traits::{Question, VERB};
    use pretty_assertions::assert_eq;

    fn question(id: &str, seed_en: &str, seed_ja: &str, text_en: &str) -> Question {
        Question {
            id: id.to_string(),
            question_ja: format!("{}について", seed_ja),
            question_en: text_en.to_string(),
            seed_ja: seed_ja.to_string(),
            seed_en: seed_en.to_string(),
            seed_type: "Noun".to_string(),
            ..Faker.fake()
        }
    }

    fn keywords(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn ids(candidates: &[QuestionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn matches_either_seed_ignoring_case() {
        let questions = vec![
            question("q1", "channel", "チャネル", "Do you use channels?"),
            question("q2", "gopher", "ゴーファー", "Have you met a gopher?"),
            question("q3", "borrow", "借用", "Do you like the borrow checker?"),
        ];
        let candidates = match_questions(&questions, &keywords(&["CHANNEL", "ゴーファー"]));
        assert_eq!(ids(&candidates), vec!["q1", "q2"]);
        assert_eq!(candidates[0].question_en, "Do you use channels?");
    }

    #[test]
    fn seeds_must_match_exactly() {
        let questions = vec![question("q1", "channel", "チャネル", "Channels?")];
        assert!(match_questions(&questions, &keywords(&["chan"])).is_empty());
    }

    #[test]
    fn verb_seeded_questions_are_skipped() {
        let questions = vec![Question {
            seed_type: VERB.to_string(),
            ..question("q1", "run", "走る", "Do you run?")
        }];
        assert!(match_questions(&questions, &keywords(&["run"])).is_empty());
    }

    #[test]
    fn keyword_already_in_accepted_text_is_skipped() {
        let questions = vec![
            question("q1", "channel", "チャネル", "How do a channel and a goroutine relate?"),
            question("q2", "goroutine", "ゴルーチン", "What is a goroutine?"),
        ];
        let candidates = match_questions(&questions, &keywords(&["channel", "goroutine"]));
        assert_eq!(ids(&candidates), vec!["q1"]);
    }

    #[test]
    fn later_keyword_can_still_accept() {
        let questions = vec![
            question("q1", "channel", "チャネル", "Tell me about a channel."),
            question("q2", "channel", "ゴルーチン", "Channel or goroutine?"),
        ];
        // q2 matches "channel" but that is already in q1's text; "ゴルーチン" is not.
        let candidates = match_questions(&questions, &keywords(&["channel", "ゴルーチン"]));
        assert_eq!(ids(&candidates), vec!["q1", "q2"]);
    }

    #[test]
    fn no_keywords_no_candidates() {
        let questions = vec![question("q1", "channel", "チャネル", "Channels?")];
        assert!(match_questions(&questions, &[]).is_empty());
        assert!(match_questions(&[], &keywords(&["channel"])).is_empty());
    }
}
