#![warn(missing_docs, clippy::missing_docs_in_private_items)]
// None of the tests are seen by the linter, so none of the utilities are marked
// as used. But docs don't generate for the below if they are `#[cfg(test)]`.
// This is a compromise.
#![allow(dead_code)]

//! Tests for Oboro that work by reading from the external API only.
//!
//! Since the URL endpoints Oboro exposes to the world are its public API, and
//! clients depend on them, the paths and body field names used in tests here
//! are important details, and used to keep compatibility.
//!
//! This is structured as a separate crate so that it produces a single test
//! binary instead of one test per file like would happen if this were
//! `oboro/tests/...`. This improves compilation and test times.
//!
//! The primary tool used by tests is [`oboro_test`], which sets up the
//! application with fixture stores, and provides helpers to inspect the state
//! of the app. It then calls the test function that is passed to it, providing
//! the above tools as an argument.

mod answer;
mod dockerflow;
mod general;
mod question;
mod user;
mod utils;

pub use crate::utils::{
    fixtures,
    metrics::MetricsWatcher,
    test_tools::{oboro_test, TestReqwestClient, TestingTools},
};
