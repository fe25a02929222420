//! Concrete environments
//!
//! A [`Runtime`] bundles one file backend, one encoding and one
//! cancellation scope, and provides every capability trait. Operations in
//! [`crate::ops`] are generic over the capabilities, so the same code runs
//! against [`LiveRuntime`] in production and [`TestRuntime`] in tests.

use encoding_rs::{Encoding, UTF_8};
use tokio_util::sync::CancellationToken;

use crate::cancel::HasCancel;
use crate::config::{ConfigError, RuntimeConfig};
use crate::encoding::HasEncoding;
use crate::file::{FileIo, HasFile};
use crate::live::LiveFileIo;
use crate::memory::MemoryFileIo;

/// Environment over file backend `F`
#[derive(Debug, Clone)]
pub struct Runtime<F> {
    token: CancellationToken,
    encoding: &'static Encoding,
    file: F,
}

/// Production environment on the real file system
pub type LiveRuntime = Runtime<LiveFileIo>;

/// Test environment on an in-memory file system
pub type TestRuntime = Runtime<MemoryFileIo>;

impl<F> Runtime<F> {
    /// UTF-8 environment with a fresh cancellation scope
    pub fn new(file: F) -> Self {
        Runtime {
            token: CancellationToken::new(),
            encoding: UTF_8,
            file,
        }
    }

    /// Same environment, different text encoding
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Same environment, observing `token`
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Backend handle
    pub fn file(&self) -> &F {
        &self.file
    }

    /// Cancel this scope and every child scope
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl<F: Clone> Runtime<F> {
    /// Environment sharing this backend in a child cancellation scope.
    ///
    /// Cancelling the parent cancels the child; cancelling the child leaves
    /// the parent running.
    pub fn child(&self) -> Self {
        Runtime {
            token: self.token.child_token(),
            encoding: self.encoding,
            file: self.file.clone(),
        }
    }
}

impl LiveRuntime {
    /// Production environment configured from `config`
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let encoding = config.text_encoding()?;
        Ok(Runtime::new(LiveFileIo::new(config.buffer_size)).with_encoding(encoding))
    }
}

impl Default for LiveRuntime {
    fn default() -> Self {
        Runtime::new(LiveFileIo::default())
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Runtime::new(MemoryFileIo::new())
    }
}

impl<F> HasCancel for Runtime<F> {
    fn cancel_token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<F> HasEncoding for Runtime<F> {
    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl<F: FileIo> HasFile for Runtime<F> {
    type Io = F;

    fn file_io(&self) -> &F {
        &self.file
    }
}
