//! # High level overview of Oboro
//!
//! This project is structured as a [Cargo Workspace][] that contains one crate
//! for each broad area of behavior for Oboro. Each crate can be compiled and
//! tested on its own, or together with the rest.
//!
//! [Cargo Workspace]: https://doc.rust-lang.org/book/ch14-03-cargo-workspaces.html
//!
//! ## [`oboro`](../)
//!
//! The binary. It loads settings, sets up logging and metrics, loads the seed
//! data, and starts the web server.
//!
//! ## [`oboro-settings`](../../oboro_settings/index.html)
//!
//! Defines and documents the settings of the application. Settings are loaded
//! by the binary and passed into the other crates.
//!
//! ## [`oboro-web`](../../oboro_web/index.html)
//!
//! The HTTP API, including the Dockerflow endpoints used for observability.
//!
//! ## [`oboro-suggest-traits`](../../oboro_suggest_traits/index.html)
//!
//! The domain model, the store traits, and the errors shared between crates.
//!
//! ## [`oboro-suggest`](../../oboro_suggest/index.html)
//!
//! The suggestion pipeline, from a phrase to a question about a resource.
//!
//! ## [`oboro-stores`](../../oboro_stores/index.html)
//!
//! In-memory stores, and loading them from a JSON seed file.
//!
//! ## [`oboro-integration-tests`](../../oboro_integration_tests/index.html)
//!
//! Tests that start a real server and only talk to it over HTTP.
