//! Shared building blocks for the pet store workspace: logging setup and
//! small response payloads used by more than one crate.

pub mod types;
pub mod utils;
