#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! In-memory implementations of the stores used by
//! [Oboro](../oboro/index.html), and a loader for the reference data they
//! start with.

mod history;
mod memory;
mod seed;

pub use crate::{
    history::{MemoryAnswerHistory, MemoryQueryLog},
    memory::{MemoryMetadata, MemoryQuestionBank, MemoryVocabulary},
    seed::SeedData,
};
