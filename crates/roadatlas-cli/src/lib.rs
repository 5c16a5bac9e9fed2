//! Library surface for the roadatlas CLI.
//!
//! Exposes the prompt loop so unit and integration tests can drive it with
//! in-memory readers and writers.

pub mod prompt;
