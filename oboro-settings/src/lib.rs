#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! # Oboro Settings
//!
//! Configuration is specified in several ways, with later methods overriding earlier ones.
//!
//! 1. A base configuration checked into the repository, in `config/base.yaml`.
//!    This provides the default values for most settings.
//! 2. Per-environment configuration files in the `config` directory. The
//!    environment is selected using the environment variable `OBORO_ENV`. The
//!    settings for that environment are then loaded from `config/${env}.yaml`, if
//!    it exists. The default environment is "development". A "production"
//!    environment is also provided.
//! 3. A local configuration file not checked into the repository, at
//!    `config/local.yaml`. This file is in `.gitignore` and is safe to use for
//!    local configuration and secrets if desired.
//! 4. Environment variables that begin with `OBORO_` and have a separator for
//!    `__`. For example, `Settings::http::workers` can be controlled from the
//!    environment variable `OBORO_HTTP__WORKERS`.
//!
//! Tests should use `Settings::load_for_tests` which only reads from
//! `config/base.yaml`, `config/test.yaml`, and `config/local_test.yaml` (if it
//! exists). It does not read from environment variables.

mod logging;
mod suggest;

pub use logging::{DirectiveWrapper, LogFormat, LoggingSettings};
pub use suggest::SuggestSettings;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

/// Top level settings object for Oboro.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// The environment Oboro is running in. Should only be set with the
    /// `OBORO_ENV` environment variable.
    pub env: String,

    /// Enable additional features to debug the application. This should not be
    /// set to true in production environments.
    pub debug: bool,

    /// URL to redirect to from the root of the service. If `None`, a short
    /// plain text description is served instead.
    pub public_documentation: Option<String>,

    /// Whether the free-text phrase of a question request may be written to
    /// the logs. Phrases are typed by users and are considered sensitive.
    pub log_full_request: bool,

    /// Settings for the HTTP server.
    pub http: HttpSettings,

    /// Logging settings.
    pub logging: LoggingSettings,

    /// Metrics settings.
    pub metrics: MetricsSettings,

    /// Settings for the suggestion pipeline.
    pub suggest: SuggestSettings,

    /// Where reference data for the stores comes from.
    pub data: DataSettings,
}

/// Settings for the HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpSettings {
    /// The host and port to listen on, such as "127.0.0.1:8080" or "0.0.0.0:80".
    pub listen: SocketAddr,

    /// The number of workers to use. Optional. If no value is provided, the
    /// number of logical cores will be used.
    pub workers: Option<usize>,
}

/// Settings for the Statsd metrics sink.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// The host to send metrics to.
    pub sink_host: String,

    /// The UDP port to send metrics to.
    pub sink_port: u16,

    /// The size of the queue between the application and the UDP sink, in
    /// kilobytes. Metrics are dropped once the queue is full.
    pub max_queue_size_kb: usize,
}

/// Settings for loading reference data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// A JSON file holding words, questions, and favorites to seed the
    /// in-memory stores with. If `None`, the stores start empty.
    pub seed_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// # Errors
    /// If any of the configured values are invalid, or if any of the required
    /// configuration files are missing.
    pub fn load() -> Result<Self, ConfigError> {
        let mut s = Config::new();

        // Start off with the base config.
        s.merge(File::with_name("./config/base"))?;

        // Merge in an environment specific config.
        let oboro_env = std::env::var("OBORO_ENV").unwrap_or_else(|_| "development".to_string());
        s.set("env", oboro_env.as_str())?;
        s.merge(File::with_name(&format!("config/{}", s.get::<String>("env")?)).required(false))?;

        // Add a local configuration file that is `.gitignore`ed.
        s.merge(File::with_name("config/local").required(false))?;

        // Add environment variables that start with "OBORO_" and have "__" to
        // separate levels. For example, `OBORO_HTTP__LISTEN` maps to
        // `Settings::http::listen`.
        s.merge(Environment::with_prefix("OBORO").separator("__"))?;

        let settings: Self = s.try_into()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from configuration files for tests.
    ///
    /// `changer` is applied to the loaded settings before they are returned,
    /// so that tests can adjust individual values.
    ///
    /// # Panics
    /// If the test configuration files are missing or invalid.
    pub fn load_for_tests<F: FnOnce(&mut Self)>(changer: F) -> Self {
        let mut s = Config::new();

        // Start off with the base config.
        s.merge(File::with_name("../config/base"))
            .expect("Could not load base settings");

        // Merge in test specific config.
        s.set("env", "test").expect("Could not set env for tests");
        s.merge(File::with_name("../config/test"))
            .expect("Could not load test settings");

        // Add a local configuration file that is `.gitignore`ed.
        s.merge(File::with_name("../config/local_test").required(false))
            .expect("Could not load local settings for tests");

        let mut settings: Self = s.try_into().expect("Could not convert settings");
        changer(&mut settings);
        settings
    }

    /// Check constraints that cannot be expressed in the types alone.
    fn validate(&self) -> Result<(), ConfigError> {
        self.suggest
            .validate()
            .map_err(|error| ConfigError::Message(format!("suggest: {}", error)))
    }
}
