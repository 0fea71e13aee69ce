//! Request and response bodies of the public API, and their validation.

use std::convert::TryFrom;

use oboro_suggest_traits::{
    AnswerRecord, FavoriteRecord, Lang, QueryRecord, SuggestionRequest, SuggestionResult,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::HandlerError;

/// The API version echoed back in every successful response.
pub const API_VERSION: &str = "v0.0.1";

/// Length of a hyphenated UUID.
const USER_ID_LEN: usize = 36;

/// Length of a question identifier.
const QUESTION_ID_LEN: usize = 24;

/// The highest answer choice offered for a question.
const MAX_ANSWER_CHOICE: i64 = 5;

/// Body of a request for the first question of a session.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuestionRequest {
    /// The user asking.
    #[serde(rename = "userID")]
    pub user_id: String,

    /// The phrase the user typed.
    pub value: String,

    /// `ja` or `en`.
    pub lang: String,
}

impl QuestionRequest {
    /// Check every field, returning the user and the pipeline request.
    ///
    /// # Errors
    /// A validation [`HandlerError`] naming the first invalid field.
    pub fn validate(self) -> Result<(Uuid, SuggestionRequest), HandlerError> {
        let user_id = parse_user_id(&self.user_id)?;
        let phrase = required_text(self.value, "value")?;
        let lang = parse_lang(&self.lang)?;

        let mut request = SuggestionRequest::new(phrase, lang);
        request.user_id = Some(user_id);
        Ok((user_id, request))
    }
}

/// Body of an answer to a suggested question, which also asks for the next one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerRequest {
    /// The question that was answered.
    #[serde(rename = "questionID")]
    pub question_id: String,

    /// The user answering.
    #[serde(rename = "userID")]
    pub user_id: String,

    /// The position of the answered question within the session.
    #[serde(rename = "questionNumber")]
    pub question_number: i64,

    /// The selected answer choice.
    #[serde(rename = "questionAnswerID")]
    pub question_answer_id: i64,

    /// The phrase to base the next question on.
    #[serde(rename = "questionValue")]
    pub question_value: String,

    /// `ja` or `en`.
    pub lang: String,
}

impl AnswerRequest {
    /// Check every field, returning the answer to record and the request for
    /// the next question.
    ///
    /// # Errors
    /// A validation [`HandlerError`] naming the first invalid field.
    pub fn validate(self) -> Result<(AnswerRecord, SuggestionRequest), HandlerError> {
        let user_id = parse_user_id(&self.user_id)?;
        if self.question_id.len() != QUESTION_ID_LEN
            || !self.question_id.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(HandlerError::invalid("'questionID' is invalid."));
        }
        let phrase = required_text(self.question_value, "questionValue")?;
        let ordinal = u32::try_from(self.question_number)
            .ok()
            .filter(|number| *number >= 1)
            .ok_or_else(|| HandlerError::invalid("'questionNumber' is invalid."))?;
        let answer_choice = Some(self.question_answer_id)
            .filter(|choice| (1..=MAX_ANSWER_CHOICE).contains(choice))
            .and_then(|choice| u8::try_from(choice).ok())
            .ok_or_else(|| HandlerError::invalid("'questionAnswerID' is invalid."))?;
        let lang = parse_lang(&self.lang)?;

        let record = AnswerRecord {
            user_id,
            question_id: self.question_id,
            ordinal,
            answer_choice,
            lang,
        };
        let request = SuggestionRequest {
            phrase,
            lang,
            user_id: Some(user_id),
            prior_ordinal: Some(ordinal),
        };
        Ok((record, request))
    }
}

/// Body of a search report.
#[derive(Debug, Deserialize)]
pub struct QueryReport {
    /// The page the search happened on.
    pub href: String,

    /// The text that was searched for.
    #[serde(rename = "searchValue")]
    pub search_value: String,

    /// Whether the user marked the result.
    #[serde(rename = "isChecked", default)]
    pub is_checked: bool,
}

impl From<QueryReport> for QueryRecord {
    fn from(report: QueryReport) -> Self {
        Self {
            href: report.href,
            search_value: report.search_value,
            is_checked: report.is_checked,
        }
    }
}

/// Body of a favorite report.
#[derive(Debug, Deserialize)]
pub struct FavoriteReport {
    /// The resource that was marked.
    pub href: String,

    /// Whether the mark is set or cleared.
    #[serde(rename = "isChecked", default)]
    pub is_checked: bool,
}

impl From<FavoriteReport> for FavoriteRecord {
    fn from(report: FavoriteReport) -> Self {
        Self {
            href: report.href,
            is_checked: report.is_checked,
        }
    }
}

/// A suggested question, in the shape clients expect.
#[derive(Debug, Serialize)]
pub struct QuestionResponse<'a> {
    /// Always [`API_VERSION`].
    pub version: &'static str,
    /// The suggested question.
    #[serde(rename = "questionID")]
    pub question_id: &'a str,
    /// The position of the question within the session.
    #[serde(rename = "questionNumber")]
    pub question_number: u32,
    /// The question in Japanese.
    #[serde(rename = "questionJA")]
    pub question_ja: &'a str,
    /// The question in English.
    #[serde(rename = "questionEN")]
    pub question_en: &'a str,
    /// The resource the question is about.
    pub url: &'a str,
    /// The resource's title, or empty.
    pub title: &'a str,
    /// The resource's description, or empty.
    pub description: &'a str,
}

impl<'a> From<&'a SuggestionResult> for QuestionResponse<'a> {
    fn from(result: &'a SuggestionResult) -> Self {
        Self {
            version: API_VERSION,
            question_id: &result.question_id,
            question_number: result.ordinal,
            question_ja: &result.question_ja,
            question_en: &result.question_en,
            url: &result.url,
            title: &result.title,
            description: &result.description,
        }
    }
}

/// Acknowledges a report.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    /// Always [`API_VERSION`].
    pub version: &'static str,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            version: API_VERSION,
        }
    }
}

/// Parse a hyphenated UUID.
fn parse_user_id(raw: &str) -> Result<Uuid, HandlerError> {
    if raw.len() != USER_ID_LEN {
        return Err(HandlerError::invalid("'userID' is invalid."));
    }
    Uuid::parse_str(raw).map_err(|_| HandlerError::invalid("'userID' is invalid."))
}

/// Reject text that is empty once surrounding whitespace is removed.
fn required_text(raw: String, field: &str) -> Result<String, HandlerError> {
    if raw.trim().is_empty() {
        Err(HandlerError::invalid(format!("'{}' is invalid.", field)))
    } else {
        Ok(raw)
    }
}

/// Parse a supported language code.
fn parse_lang(raw: &str) -> Result<Lang, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::invalid("'lang' must be 'ja' or 'en'."))
}
