// Only overview documentation that is not relevant to one of the more specific
// crates should go here.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! A web API that turns what people search for into questions about it.
//!
//! Oboro is split into several subcrates that work in collaboration.
//!
//! - [oboro-integration-tests](../oboro_integration_tests/index.html)
//! - [oboro-settings](../oboro_settings/index.html)
//! - [oboro-stores](../oboro_stores/index.html)
//! - [oboro-suggest](../oboro_suggest/index.html)
//! - [oboro-suggest-traits](../oboro_suggest_traits/index.html)
//! - [oboro-web](../oboro_web/index.html)

mod docs;

use anyhow::{Context, Result};
use cadence::{QueuingMetricSink, StatsdClient, UdpMetricSink};
use oboro_settings::{LogFormat, Settings};
use oboro_stores::SeedData;
use std::net::{TcpListener, UdpSocket};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Primary entry point
#[actix_rt::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Loading settings")?;
    init_logging(&settings)?;
    let metrics_client = init_metrics(&settings).context("Setting up metrics")?;

    let seed = match &settings.data.seed_path {
        Some(path) => SeedData::from_path(path).context("Loading seed data")?,
        None => {
            tracing::warn!(
                r#type = "oboro.seed.missing",
                "No seed data configured, starting with empty stores"
            );
            SeedData::default()
        }
    };

    let listener = TcpListener::bind(settings.http.listen).context("Binding port")?;
    tracing::info!(
        r#type = "oboro.starting",
        address = %settings.http.listen,
        env = %settings.env,
        "Starting oboro-web server"
    );

    oboro_web::run(listener, settings, metrics_client, seed.into_stores())
        .context("Starting oboro-web server")?
        .await
        .context("Running oboro-web server")?;

    Ok(())
}

/// Set up logging for Oboro, based on settings and the `RUST_LOG` environment variable.
fn init_logging(settings: &Settings) -> Result<()> {
    LogTracer::init()?;
    let env_filter: EnvFilter = (&settings.logging.levels).into();
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match settings.logging.format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(builder.compact().finish())?
        }
    }

    Ok(())
}

/// Build a Statsd client that sends metrics over UDP from a background queue.
fn init_metrics(settings: &Settings) -> Result<StatsdClient> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_nonblocking(true)?;

    let host = (settings.metrics.sink_host.as_str(), settings.metrics.sink_port);
    let udp_sink = UdpMetricSink::from(host, socket)?;
    let sink = QueuingMetricSink::with_capacity(udp_sink, settings.metrics.max_queue_size_kb * 1024);

    Ok(StatsdClient::builder("oboro", sink)
        .with_error_handler(|error| {
            tracing::warn!(r#type = "oboro.metrics.error", %error, "Could not send metric");
        })
        .build())
}
