//! Reference data and records that the suggestion pipeline reads and writes.

use fake::{
    faker::lorem::en::{Sentence, Word},
    Dummy, Fake, Faker,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// The grammatical category that excludes a term or a question seed from matching.
pub const VERB: &str = "Verb";

/// Normalize a term or token for lookups. Matching is case-insensitive and
/// exact, so the normalized form is the upper-cased value.
pub fn normalize(value: &str) -> String {
    value.to_uppercase()
}

/// The languages questions are offered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Japanese, the primary language.
    Ja,
    /// English, the secondary language.
    En,
}

impl Lang {
    /// The tag used on the wire and in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language tag that isn't one of the supported languages.
#[derive(Debug, Error, PartialEq)]
#[error("unsupported language {0:?}")]
pub struct UnsupportedLang(pub String);

impl FromStr for Lang {
    type Err = UnsupportedLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Lang::Ja),
            "en" => Ok(Lang::En),
            other => Err(UnsupportedLang(other.to_string())),
        }
    }
}

impl<F> Dummy<F> for Lang {
    fn dummy_with_rng<R: Rng + ?Sized>(_config: &F, rng: &mut R) -> Self {
        if rng.gen() {
            Lang::Ja
        } else {
            Lang::En
        }
    }
}

/// A vocabulary entry linking a word to one resource.
///
/// Many terms may share a resource, and many terms may share a normalized
/// value across different resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The word as it was recorded.
    pub value: String,

    /// The resource (URL) this term is about.
    pub href: String,

    /// Grammatical category, such as "Noun" or "Verb".
    #[serde(rename = "type")]
    pub word_type: String,

    /// How often the term occurs in the resource.
    #[serde(default)]
    pub count: u32,

    /// The language the term was recorded in, if known.
    #[serde(default)]
    pub lang: Option<Lang>,

    /// The section of the resource the term was found in, if known.
    #[serde(default)]
    pub section_name: Option<String>,
}

impl Term {
    /// Create a term with no language or section information.
    pub fn new<V, H, T>(value: V, href: H, word_type: T, count: u32) -> Self
    where
        V: Into<String>,
        H: Into<String>,
        T: Into<String>,
    {
        Self {
            value: value.into(),
            href: href.into(),
            word_type: word_type.into(),
            count,
            lang: None,
            section_name: None,
        }
    }

    /// The value used for case-insensitive lookups.
    pub fn normalized(&self) -> String {
        normalize(&self.value)
    }

    /// Verbs never feed keyword sampling.
    pub fn is_verb(&self) -> bool {
        self.word_type == VERB
    }
}

impl<F> Dummy<F> for Term {
    fn dummy_with_rng<R: Rng + ?Sized>(_config: &F, rng: &mut R) -> Self {
        Self {
            value: Word().fake_with_rng(rng),
            href: format!(
                "https://example.org/{}",
                Word().fake_with_rng::<String, R>(rng)
            ),
            word_type: if rng.gen_ratio(1, 4) { VERB } else { "Noun" }.to_string(),
            count: rng.gen_range(1..100),
            lang: Some(Faker.fake_with_rng(rng)),
            section_name: None,
        }
    }
}

/// A question from the question bank, localized in both languages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// A 24 character hexadecimal identifier.
    pub id: String,

    /// The Japanese text of the question.
    pub question_ja: String,

    /// The English text of the question.
    pub question_en: String,

    /// The Japanese keyword the question is anchored to.
    #[serde(rename = "question_seed_ja")]
    pub seed_ja: String,

    /// The English keyword the question is anchored to.
    #[serde(rename = "question_seed_en")]
    pub seed_en: String,

    /// Grammatical category of the seed terms.
    #[serde(rename = "question_seed_type")]
    pub seed_type: String,

    /// When present, the question is only offered in this language.
    #[serde(default)]
    pub lang: Option<Lang>,
}

impl Question {
    /// Questions seeded by a verb are never offered.
    pub fn is_verb_seeded(&self) -> bool {
        self.seed_type == VERB
    }

    /// Whether this question may be offered for `lang`.
    pub fn offered_in(&self, lang: Lang) -> bool {
        self.lang.map_or(true, |tag| tag == lang)
    }
}

impl<F> Dummy<F> for Question {
    fn dummy_with_rng<R: Rng + ?Sized>(_config: &F, rng: &mut R) -> Self {
        let seed: String = Word().fake_with_rng(rng);
        Self {
            id: format!("{:024x}", rng.gen::<u128>() & ((1_u128 << 96) - 1)),
            question_ja: Sentence(3..6).fake_with_rng(rng),
            question_en: Sentence(3..6).fake_with_rng(rng),
            seed_ja: seed.clone(),
            seed_en: seed,
            seed_type: "Noun".to_string(),
            lang: None,
        }
    }
}

/// Human readable information previously recorded about a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// The resource this describes.
    pub href: String,

    /// The title of the resource.
    #[serde(default)]
    pub title: String,

    /// A short description of the resource.
    #[serde(default)]
    pub description: String,

    /// Whether a user marked this resource.
    #[serde(default)]
    pub is_checked: bool,
}

/// One answer given by a user to a suggested question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The user who answered.
    pub user_id: Uuid,

    /// The question that was answered.
    pub question_id: String,

    /// The position of the question within the session.
    pub ordinal: u32,

    /// The selected answer choice, from 1 to 5.
    pub answer_choice: u8,

    /// The language the question was shown in.
    pub lang: Lang,
}

/// A search a user performed, reported by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The page the search happened on.
    pub href: String,

    /// The text that was searched for.
    pub search_value: String,

    /// Whether the user marked the result.
    pub is_checked: bool,
}

/// A resource the user marked as a favorite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// The resource that was marked.
    pub href: String,

    /// Whether the mark is set or cleared.
    pub is_checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use pretty_assertions::assert_eq;

    #[test]
    fn term_normalizes_to_upper_case() {
        let term = Term::new("Python", "https://example.org/py", "Noun", 3);
        assert_eq!(term.normalized(), "PYTHON");
        assert!(!term.is_verb());
        assert!(Term::new("run", "https://example.org/run", VERB, 1).is_verb());
    }

    #[test]
    fn term_deserializes_from_seed_shape() {
        let term: Term = serde_json::from_value(serde_json::json!({
            "value": "Go",
            "href": "https://example.org/go",
            "type": "Noun",
            "count": 4,
            "lang": "en",
        }))
        .expect("failed to deserialize");
        assert_eq!(
            term,
            Term {
                lang: Some(Lang::En),
                ..Term::new("Go", "https://example.org/go", "Noun", 4)
            }
        );
    }

    #[test]
    fn question_language_filter() {
        let untagged = Question {
            lang: None,
            ..Faker.fake()
        };
        let english = Question {
            lang: Some(Lang::En),
            ..Faker.fake()
        };
        assert!(untagged.offered_in(Lang::Ja));
        assert!(untagged.offered_in(Lang::En));
        assert!(english.offered_in(Lang::En));
        assert!(!english.offered_in(Lang::Ja));
    }

    #[test]
    fn fake_question_ids_are_24_hex_chars() {
        for _ in 0..20 {
            let question: Question = Faker.fake();
            assert_eq!(question.id.len(), 24);
            assert!(question.id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn lang_parses_known_tags_only() {
        assert_eq!("ja".parse::<Lang>(), Ok(Lang::Ja));
        assert_eq!("en".parse::<Lang>(), Ok(Lang::En));
        assert_eq!(
            "fr".parse::<Lang>(),
            Err(UnsupportedLang("fr".to_string()))
        );
    }
}
