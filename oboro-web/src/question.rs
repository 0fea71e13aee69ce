//! Web handlers for the question API.

use actix_web::{
    web::{self, Data, Json, ServiceConfig},
    HttpResponse,
};
use cadence::{CountedExt, StatsdClient};
use oboro_settings::Settings;
use oboro_suggest::Suggester;
use oboro_suggest_traits::{StoreSet, SuggestionRequest};

use crate::{
    errors::{HandlerError, HandlerErrorKind},
    requests::{AnswerRequest, QuestionRequest, QuestionResponse},
};

/// Configure the question routes.
pub fn configure(config: &mut ServiceConfig) {
    config
        .service(
            web::resource("/question")
                .route(web::post().to(question))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/question-answer")
                .route(web::post().to(question_answer))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Suggest the first question of a session for the phrase the user typed.
#[tracing::instrument(skip_all)]
async fn question(
    body: Json<QuestionRequest>,
    suggester: Data<Suggester>,
    stores: Data<StoreSet>,
    settings: Data<Settings>,
) -> Result<HttpResponse, HandlerError> {
    let (user_id, request) = body.into_inner().validate()?;
    safe_log_request(settings.log_full_request, "web.question.request", &request);

    stores.answers.ensure_user(user_id).await?;
    let suggestion = suggester.suggest(&request, request.next_ordinal()).await?;

    Ok(HttpResponse::Ok().json([QuestionResponse::from(&suggestion)]))
}

/// Record an answer, then suggest the question that follows it.
#[tracing::instrument(skip_all)]
async fn question_answer(
    body: Json<AnswerRequest>,
    suggester: Data<Suggester>,
    stores: Data<StoreSet>,
    metrics_client: Data<StatsdClient>,
    settings: Data<Settings>,
) -> Result<HttpResponse, HandlerError> {
    let (record, request) = body.into_inner().validate()?;
    safe_log_request(settings.log_full_request, "web.answer.request", &request);

    tracing::debug!(
        r#type = "web.answer.recorded",
        question_id = %record.question_id,
        ordinal = record.ordinal,
        answer_choice = record.answer_choice,
        "Recording answer"
    );
    stores.answers.append(record).await?;
    metrics_client.incr("answers.recorded").ok();

    let suggestion = suggester.suggest(&request, request.next_ordinal()).await?;
    Ok(HttpResponse::Ok().json([QuestionResponse::from(&suggestion)]))
}

/// Answer any method other than `POST` on the question routes.
async fn method_not_allowed() -> Result<HttpResponse, HandlerError> {
    Err(HandlerErrorKind::MethodNotAllowed.into())
}

/// Log a question request, writing the phrase only when `log_phrase` is set.
fn safe_log_request(log_phrase: bool, kind: &'static str, request: &SuggestionRequest) {
    let phrase = if log_phrase {
        request.phrase.as_str()
    } else {
        ""
    };
    tracing::info!(
        r#type = kind,
        sensitive = log_phrase,
        lang = %request.lang,
        user_id = ?request.user_id,
        prior_ordinal = ?request.prior_ordinal,
        %phrase,
        "handling question request"
    );
}
