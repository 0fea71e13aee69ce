//! Loggers for the request/response cycle.

use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    HttpMessage,
};
use tracing::Span;
use tracing_actix_web::{RequestId, RootSpanBuilder};

/// A root span builder for tracing_actix_web to customize the extra fields we
/// log with requests, and to log an event when requests end.
pub struct OboroRootSpanBuilder;

impl RootSpanBuilder for OboroRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let http_route = request
            .match_pattern()
            .unwrap_or_else(|| "default".to_string());
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_default();

        tracing::info_span!(
            "HTTP request",
            http.method = %request.method(),
            http.route = %http_route,
            http.target = %request.uri().path_and_query().map_or("", |p| p.as_str()),
            http.status_code = tracing::field::Empty,
            request_id = %request_id,
            exception.message = tracing::field::Empty,
            exception.details = tracing::field::Empty,
        )
    }

    fn on_request_end<B>(span: Span, outcome: &Result<ServiceResponse<B>, actix_web::Error>) {
        let status = match outcome {
            Ok(response) => match response.response().error() {
                Some(error) => handle_error(&span, error),
                None => response.status(),
            },
            Err(error) => handle_error(&span, error),
        };
        span.record("http.status_code", &status.as_u16());

        let _entered = span.enter();
        match status.as_u16() {
            100..=399 => tracing::info!(r#type = "web.request.success", "Request success"),
            400..=499 => {
                tracing::warn!(r#type = "web.request.client-error", "Request client error")
            }
            500..=599 => {
                tracing::error!(r#type = "web.request.server-error", "Request server error")
            }
            status_code => tracing::error!(
                r#type = "web.request.unknown-status",
                %status_code,
                "Request ended with unknown status code"
            ),
        }
    }
}

/// Annotate the root request span with information about a request error.
fn handle_error(span: &Span, error: &actix_web::Error) -> StatusCode {
    let response_error = error.as_response_error();
    span.record(
        "exception.message",
        &tracing::field::display(response_error),
    );
    span.record("exception.details", &tracing::field::debug(response_error));
    response_error.status_code()
}
