//! Documentation that covers Oboro as a whole.

pub mod api;
pub mod overview;
pub mod testing;
