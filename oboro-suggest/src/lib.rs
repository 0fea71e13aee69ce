#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! The question suggestion pipeline for [Oboro](../oboro/index.html).
//!
//! A phrase is split into tokens, the tokens are resolved to candidate
//! resources through the vocabulary index, keywords are sampled from the terms
//! of those resources, and the keywords are matched against the question bank.
//! One resource and one question are then picked at random and returned
//! together.
//!
//! Each stage is exposed on its own so it can be tested in isolation;
//! [`Suggester`] composes them.

pub mod keywords;
pub mod metrics;
pub mod questions;
pub mod resources;
pub mod selection;
mod suggester;
pub mod timeout;
pub mod tokenizer;

pub use crate::{
    keywords::{KeywordSample, KeywordSampler, SampleOutcome},
    questions::QuestionCandidate,
    suggester::Suggester,
    timeout::TimeoutStore,
};
