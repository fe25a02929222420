//! Integration Tests
//!
//! Cross-crate tests organized by concern:
//! - Witnesses: constrained wrappers and their equality composers
//! - Capabilities: file operations against the in-memory backend
//! - Runtimes: one generic operation run against live and in-memory runtimes
//! - Encodings: non-UTF-8 text through the full stack

#[path = "../common/mod.rs"]
mod common;

mod capabilities;
mod encodings;
mod runtimes;
mod witnesses;
