#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Web server for [Oboro](../oboro/index.html)'s public API.

mod dockerflow;
mod errors;
mod logging;
mod middleware;
mod question;
mod requests;
mod user;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    get,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use cadence::StatsdClient;
use oboro_settings::Settings;
use oboro_suggest::Suggester;
use oboro_suggest_traits::StoreSet;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use crate::errors::{HandlerError, HandlerErrorKind};
pub use crate::requests::API_VERSION;

use crate::{logging::OboroRootSpanBuilder, middleware::Metrics};

/// Run the web server
///
/// The returned server is a `Future` that must either be `.await`ed, or run it
/// as a background task using `tokio::spawn`.
///
/// Most of the details from `settings` will be respected, except for those that
/// go into building the listener (the host and port). If you want to respect the
/// settings specified in that object, you must include them in the construction
/// of `listener`.
///
/// # Errors
///
/// Returns an error if the server cannot be started on the provided listener.
///
/// # Examples
///
/// Run the server in the foreground. This will only return if there is an error
/// that causes the server to shut down. This is used to run Oboro as a service,
/// such as in production.
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let listener = std::net::TcpListener::bind("127.0.0.1:8080")
///     .expect("Failed to bind port");
/// let settings = oboro_settings::Settings::load()
///     .expect("Failed to load settings");
/// let metrics_client = cadence::StatsdClient::from_sink("oboro", cadence::NopMetricSink);
/// let stores = oboro_stores::SeedData::default().into_stores();
/// oboro_web::run(listener, settings, metrics_client, stores)
///     .expect("Failed to start server")
///     .await
///     .expect("Fatal error while running server");
/// # })
/// ```
pub fn run(
    listener: TcpListener,
    settings: Settings,
    metrics_client: StatsdClient,
    stores: StoreSet,
) -> Result<Server, std::io::Error> {
    let num_workers = settings.http.workers;

    let suggester = Data::new(Suggester::new(
        &settings.suggest,
        &stores,
        metrics_client.clone(),
    ));
    let settings = Data::new(settings);
    let metrics_client = Data::new(metrics_client);
    let stores = Data::new(stores);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .app_data(metrics_client.clone())
            .app_data(stores.clone())
            .app_data(suggester.clone())
            .app_data(web::JsonConfig::default().error_handler(|error, _request| {
                HandlerError::invalid(format!("Invalid request body: {}", error)).into()
            }))
            .wrap(Metrics)
            .wrap(TracingLogger::<OboroRootSpanBuilder>::new())
            .wrap(Cors::permissive())
            // The core functionality of Oboro
            .service(
                web::scope("api/v1")
                    .configure(question::configure)
                    .service(web::scope("user").configure(user::configure)),
            )
            .service(root_info)
            // Add the behavior necessary to satisfy Dockerflow.
            .service(web::scope("").configure(dockerflow::configure))
    })
    .listen(listener)?;

    if let Some(n) = num_workers {
        server = server.workers(n);
    }

    Ok(server.run())
}

/// The root view, to provide information about what this service is.
///
/// This is intended to be seen by people trying to investigate what this service
/// is. It should redirect to documentation, if it is available, or provide a
/// short message otherwise.
#[get("/")]
async fn root_info(settings: Data<Settings>) -> HttpResponse {
    match &settings.public_documentation {
        Some(redirect_url) => HttpResponse::Found()
            .insert_header(("location", redirect_url.to_string()))
            .finish(),
        None => HttpResponse::Ok()
            .content_type("text/plain")
            .body("Oboro is a service suggesting questions about what you are searching for."),
    }
}
