//! Web handlers for reports about what users do outside of questions.

use actix_web::{
    web::{self, Data, Json, ServiceConfig},
    HttpResponse,
};
use oboro_suggest_traits::StoreSet;

use crate::{
    errors::{HandlerError, HandlerErrorKind},
    requests::{FavoriteReport, QueryReport, VersionResponse},
};

/// Configure the user report routes.
pub fn configure(config: &mut ServiceConfig) {
    config
        .service(
            web::resource("/query")
                .route(web::post().to(query))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/favorite")
                .route(web::post().to(favorite))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Record a search the user made.
#[tracing::instrument(skip_all)]
async fn query(
    body: Json<QueryReport>,
    stores: Data<StoreSet>,
) -> Result<HttpResponse, HandlerError> {
    let report = body.into_inner();
    tracing::info!(
        r#type = "web.user.query",
        sensitive = true,
        href = %report.href,
        is_checked = report.is_checked,
        "Recording search"
    );
    stores.queries.record_query(report.into()).await?;
    Ok(HttpResponse::Ok().json([VersionResponse::default()]))
}

/// Mark or unmark a resource as a favorite.
#[tracing::instrument(skip_all)]
async fn favorite(
    body: Json<FavoriteReport>,
    stores: Data<StoreSet>,
) -> Result<HttpResponse, HandlerError> {
    let report = body.into_inner();
    tracing::info!(
        r#type = "web.user.favorite",
        href = %report.href,
        is_checked = report.is_checked,
        "Recording favorite"
    );
    stores.metadata.record_favorite(report.into()).await?;
    Ok(HttpResponse::Ok().json([VersionResponse::default()]))
}

/// Answer any method other than `POST` on the user routes.
async fn method_not_allowed() -> Result<HttpResponse, HandlerError> {
    Err(HandlerErrorKind::MethodNotAllowed.into())
}
