//! Any errors that oboro-web might generate, and supporting implementations.

use std::error::Error;
use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use backtrace::Backtrace;
use oboro_suggest_traits::{StoreError, SuggestError};
use serde::Serialize;
use thiserror::Error;

/// The message shown when a phrase does not lead to a question.
const APOLOGY: &str = "Sorry, no question could be found for that phrase.";

/// The Standard Error for most of Oboro
pub struct HandlerError {
    /// The wrapped error value.
    kind: HandlerErrorKind,
    /// The backtrace related to the wrapped error.
    pub(crate) backtrace: Backtrace,
}

/// An error that happened in a web handler.
#[derive(Error, Debug)]
pub enum HandlerErrorKind {
    /// A generic error, when there is nothing more specific to say.
    #[error("Internal error")]
    Internal,

    /// The request body is missing a field or carries an invalid value.
    #[error("{0}")]
    InvalidRequest(String),

    /// The route exists, but not for the method used.
    #[error("Sorry, only POST method is supported.")]
    MethodNotAllowed,

    /// The suggestion pipeline failed.
    #[error(transparent)]
    Suggest(#[from] SuggestError),

    /// A store used outside of the pipeline failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One entry of an error response body.
#[derive(Debug, Serialize)]
struct ErrorMessage {
    /// Text for whoever reads the response.
    message: String,

    /// A stable name for the failure, for clients that branch on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl HandlerErrorKind {
    /// Convert the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Suggest(error) if error.is_user_facing() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Suggest(_) | Self::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// A stable name for the failure, if clients may want to branch on it.
    pub fn error_kind(&self) -> Option<&'static str> {
        match self {
            Self::Suggest(error) => Some(error.kind()),
            Self::Store(_) => Some("store-unavailable"),
            _ => None,
        }
    }

    /// The message to show in the response. Store details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Suggest(error) if error.is_user_facing() => APOLOGY.to_string(),
            Self::Suggest(_) | Self::Store(_) => "Service temporarily unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<HandlerErrorKind> for actix_web::Error {
    fn from(kind: HandlerErrorKind) -> Self {
        let error: HandlerError = kind.into();
        error.into()
    }
}

impl HandlerError {
    /// Access the wrapped error.
    pub fn kind(&self) -> &HandlerErrorKind {
        &self.kind
    }

    /// Get an `HandlerError` representing an `Internal` error.
    pub fn internal() -> Self {
        HandlerErrorKind::Internal.into()
    }

    /// Get an `HandlerError` for a request that failed validation.
    pub fn invalid<M: Into<String>>(message: M) -> Self {
        HandlerErrorKind::InvalidRequest(message.into()).into()
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}

impl<T> From<T> for HandlerError
where
    HandlerErrorKind: From<T>,
{
    fn from(item: T) -> Self {
        HandlerError {
            kind: HandlerErrorKind::from(item),
            backtrace: Backtrace::new(),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::fmt::Debug for HandlerError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Name the struct after the kind, so that error reports group by it.
        fmt.debug_struct(&format!("HandlerError/{:?}", &self.kind))
            .field("kind", &self.kind)
            .field("backtrace", &self.backtrace)
            .finish()
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json([ErrorMessage {
            message: self.kind.public_message(),
            kind: self.kind.error_kind(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::{HandlerError, HandlerErrorKind};
    use actix_web::{body::to_bytes, http::StatusCode, ResponseError};
    use oboro_suggest_traits::{StoreError, SuggestError};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn body_of(error: HandlerError) -> (StatusCode, Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("body is in memory");
        (status, serde_json::from_slice(&bytes).expect("body is JSON"))
    }

    #[actix_rt::test]
    async fn validation_failures_are_bad_requests() {
        let (status, body) = body_of(HandlerError::invalid("'questionID' is invalid.")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!([{"message": "'questionID' is invalid."}]));
    }

    #[actix_rt::test]
    async fn user_facing_failures_are_apologies() {
        for (error, kind) in [
            (SuggestError::NoMatch, "no-match"),
            (SuggestError::EmptyKeywordPool, "empty-keyword-pool"),
            (SuggestError::NoQuestionMatch, "no-question-match"),
        ] {
            let (status, body) = body_of(error.into()).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body[0]["kind"], kind);
            assert!(body[0]["message"].as_str().unwrap().starts_with("Sorry"));
        }
    }

    #[actix_rt::test]
    async fn unavailable_stores_are_service_failures() {
        let error: HandlerError =
            SuggestError::StoreUnavailable(StoreError::Timeout(Duration::from_secs(1))).into();
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body[0]["kind"], "store-unavailable");

        let error: HandlerError = StoreError::Timeout(Duration::from_secs(1)).into();
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_errors_are_500() {
        assert_eq!(
            HandlerError::internal().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            HandlerErrorKind::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
