//! File access capability
//!
//! [`FileIo`] is the backend contract; [`HasFile`] is the environment
//! capability handing one out. `HasFile` deliberately has no supertraits:
//! an operation that also needs cancellation or an encoding asks for
//! `HasCancel` and `HasEncoding` alongside it.
//!
//! # Cancellation
//!
//! Operations taking a token fail with `Canceled`, and perform no write,
//! when the token has already fired. A token firing mid-operation stops it
//! at its next I/O boundary; bytes already written stay written.
//!
//! # Atomicity
//!
//! None is promised, within a call or across calls, and concurrent writers
//! to one path are not arbitrated.

use std::path::Path;

use async_trait::async_trait;
use encoding_rs::Encoding;
use tokio_util::sync::CancellationToken;

use crate::error::FileResult;
use crate::text::{TextReader, TextWriter};

/// File system backend
///
/// Thread safety: implementations are shared between tasks (`Send + Sync`).
#[async_trait]
pub trait FileIo: Send + Sync {
    /// Copy `from` to `to`
    ///
    /// # Errors
    ///
    /// `NotFound` if `from` is missing; `SameFile` if `to` already resolves
    /// to `from`; `AlreadyExists` if `to` exists and `overwrite` is false.
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        token: &CancellationToken,
    ) -> FileResult<()>;

    /// Append each line, terminated by `\n`, creating the file if needed
    async fn append_all_lines(
        &self,
        path: &Path,
        lines: &[String],
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()>;

    /// Read all lines
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing file; never an empty list instead.
    async fn read_all_lines(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<Vec<String>>;

    /// Replace the file's contents with `lines`, each terminated by `\n`
    async fn write_all_lines(
        &self,
        path: &Path,
        lines: &[String],
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()>;

    /// Read the whole file as text
    async fn read_all_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<String>;

    /// Replace the file's contents with `text`
    async fn write_all_text(
        &self,
        path: &Path,
        text: &str,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()>;

    /// Delete the file; deleting a missing file succeeds
    async fn delete(&self, path: &Path) -> FileResult<()>;

    /// Open an existing file for reading text
    async fn open_text(&self, path: &Path, encoding: &'static Encoding) -> FileResult<TextReader>;

    /// Create or truncate a file for writing text
    async fn create_text(&self, path: &Path, encoding: &'static Encoding)
        -> FileResult<TextWriter>;

    /// Open a file for appending text, creating it if needed
    async fn append_text(&self, path: &Path, encoding: &'static Encoding)
        -> FileResult<TextWriter>;
}

/// Environment capability: access to a file system backend
pub trait HasFile {
    /// Backend type
    type Io: FileIo;

    /// Backend used by operations run in this environment
    fn file_io(&self) -> &Self::Io;
}
