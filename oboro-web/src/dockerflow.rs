//! An actix-web service to implement [Dockerflow](https://github.com/mozilla-services/Dockerflow).

use std::collections::HashMap;

use actix_web::{
    get,
    web::{self, Data},
    HttpResponse,
};
use oboro_settings::Settings;
use serde_json::Value;

use crate::errors::HandlerError;

/// Handles required Dockerflow Endpoints.
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(lbheartbeat)
        .service(heartbeat)
        .service(version)
        .service(test_error);
}

/// Used by the load balancer to indicate that the server can respond to
/// requests. Should just return OK.
#[get("__lbheartbeat__")]
async fn lbheartbeat() -> HttpResponse {
    HttpResponse::Ok().body("")
}

/// Return the contents of the `version.json` file created by CI and stored
/// in the Docker root (or the TBD version stored in the Git repo).
#[get("__version__")]
async fn version() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(include_str!("../version.json"))
}

/// Returns a status message indicating the current state of the server.
#[get("__heartbeat__")]
async fn heartbeat() -> HttpResponse {
    let mut checklist = HashMap::new();
    checklist.insert(
        "version".to_owned(),
        Value::String(env!("CARGO_PKG_VERSION").to_owned()),
    );
    HttpResponse::Ok().json(checklist)
}

/// Returning an API error to test error handling. Only available in debug
/// mode.
#[get("__error__")]
async fn test_error(settings: Data<Settings>) -> Result<HttpResponse, HandlerError> {
    if settings.debug {
        Err(HandlerError::internal())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
