//! Tools shared by the tests.

pub mod fixtures;
pub mod metrics;
pub mod test_tools;
