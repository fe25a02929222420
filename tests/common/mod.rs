//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::Path;

pub use attest::{
    ops, Encoding, FileErrorKind, FileResult, HasCancel, HasEncoding, HasFile, LiveFileIo,
    LiveRuntime, MemoryFileIo, Runtime, RuntimeConfig, TestRuntime,
};
use tempfile::TempDir;

/// Install a test-writer subscriber so operation logs show up in failures.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Owned lines from string literals.
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Live runtime rooted in a fresh temporary directory.
pub struct LiveFixture {
    pub rt: LiveRuntime,
    pub dir: TempDir,
}

impl LiveFixture {
    pub fn new() -> Self {
        init_tracing();
        LiveFixture {
            rt: LiveRuntime::default(),
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn with_encoding(self, encoding: &'static Encoding) -> Self {
        LiveFixture {
            rt: self.rt.with_encoding(encoding),
            dir: self.dir,
        }
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// In-memory runtime with tracing installed.
pub fn test_runtime() -> TestRuntime {
    init_tracing();
    TestRuntime::default()
}
