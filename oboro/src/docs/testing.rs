//! # Testing strategies
//!
//! Unit tests live next to the code they test, in `#[cfg(test)] mod tests`
//! blocks. Pipeline stages take their stores as trait objects and their
//! randomness as a parameter, so tests build small in-memory stores and pass a
//! seeded generator:
//!
//! ```ignore
//! let suggestion = suggester
//!     .suggest_with_rng(&request, 1, &mut StdRng::seed_from_u64(7))
//!     .await?;
//! ```
//!
//! Metrics are checked by building the `StatsdClient` on a
//! `cadence::SpyMetricSink` and reading the lines it received.
//!
//! Behavior that only shows through HTTP, like routes, status codes, and body
//! shapes, is tested in [`oboro-integration-tests`][test-crate]. It starts an
//! Oboro server on a free port with fixture stores and hands the test a client
//! for it.
//!
//! [test-crate]: ../../../oboro_integration_tests/
//!
//! ```ignore
//! #[actix_rt::test]
//! async fn lbheartbeat_works() {
//!     oboro_test(
//!         |_| (),
//!         |TestingTools { test_client, .. }| async move {
//!             let response = test_client
//!                 .get("/__lbheartbeat__")
//!                 .send()
//!                 .await
//!                 .expect("failed to execute request");
//!
//!             assert_eq!(response.status(), StatusCode::OK);
//!             assert_eq!(response.content_length(), Some(0));
//!         },
//!     )
//!     .await
//! }
//! ```
