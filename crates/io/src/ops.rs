//! Environment-generic file operations
//!
//! Each operation names only the capabilities it uses. An environment is
//! any type providing that intersection; nothing here refers to a concrete
//! runtime.
//!
//! ```
//! use attest_io::{ops, FileResult, HasCancel, HasEncoding, HasFile};
//!
//! async fn log_event<RT>(rt: &RT, event: &str) -> FileResult<()>
//! where
//!     RT: HasFile + HasCancel + HasEncoding,
//! {
//!     ops::append_lines(rt, "events.log", &[event.to_string()]).await
//! }
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::cancel::HasCancel;
use crate::encoding::HasEncoding;
use crate::error::{FileError, FileResult};
use crate::file::{FileIo, HasFile};
use crate::text::{TextReader, TextWriter};

fn observe<T>(op: &'static str, path: &Path, result: FileResult<T>) -> FileResult<T> {
    match &result {
        Ok(_) => debug!(op, path = %path.display(), "file operation completed"),
        Err(FileError::Canceled) => debug!(op, path = %path.display(), "file operation canceled"),
        Err(err @ FileError::Io { .. }) => {
            warn!(op, path = %path.display(), error = %err, "file operation failed")
        }
        Err(err) => debug!(op, path = %path.display(), error = %err, "file operation rejected"),
    }
    result
}

/// Copy `from` to `to`, replacing `to` only if `overwrite` is set
pub async fn copy<RT>(
    rt: &RT,
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    overwrite: bool,
) -> FileResult<()>
where
    RT: HasFile + HasCancel,
{
    let (from, to) = (from.as_ref(), to.as_ref());
    let result = rt
        .file_io()
        .copy(from, to, overwrite, rt.cancel_token())
        .await;
    observe("copy", to, result)
}

/// Append `lines` to a file, creating it if needed
pub async fn append_lines<RT>(rt: &RT, path: impl AsRef<Path>, lines: &[String]) -> FileResult<()>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let path = path.as_ref();
    let result = rt
        .file_io()
        .append_all_lines(path, lines, rt.encoding(), rt.cancel_token())
        .await;
    observe("append_lines", path, result)
}

/// Read every line of a file
pub async fn read_lines<RT>(rt: &RT, path: impl AsRef<Path>) -> FileResult<Vec<String>>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let path = path.as_ref();
    let result = rt
        .file_io()
        .read_all_lines(path, rt.encoding(), rt.cancel_token())
        .await;
    observe("read_lines", path, result)
}

/// Replace a file's contents with `lines`
pub async fn write_lines<RT>(rt: &RT, path: impl AsRef<Path>, lines: &[String]) -> FileResult<()>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let path = path.as_ref();
    let result = rt
        .file_io()
        .write_all_lines(path, lines, rt.encoding(), rt.cancel_token())
        .await;
    observe("write_lines", path, result)
}

/// Read a whole file as text
pub async fn read_text<RT>(rt: &RT, path: impl AsRef<Path>) -> FileResult<String>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let path = path.as_ref();
    let result = rt
        .file_io()
        .read_all_text(path, rt.encoding(), rt.cancel_token())
        .await;
    observe("read_text", path, result)
}

/// Replace a file's contents with `text`
pub async fn write_text<RT>(rt: &RT, path: impl AsRef<Path>, text: &str) -> FileResult<()>
where
    RT: HasFile + HasCancel + HasEncoding,
{
    let path = path.as_ref();
    let result = rt
        .file_io()
        .write_all_text(path, text, rt.encoding(), rt.cancel_token())
        .await;
    observe("write_text", path, result)
}

/// Delete a file; a missing file is not an error
pub async fn delete<RT: HasFile>(rt: &RT, path: impl AsRef<Path>) -> FileResult<()> {
    let path = path.as_ref();
    let result = rt.file_io().delete(path).await;
    observe("delete", path, result)
}

/// Open a file for streaming reads
pub async fn open_text<RT>(rt: &RT, path: impl AsRef<Path>) -> FileResult<TextReader>
where
    RT: HasFile + HasEncoding,
{
    let path = path.as_ref();
    let result = rt.file_io().open_text(path, rt.encoding()).await;
    observe("open_text", path, result)
}

/// Create or truncate a file for streaming writes
pub async fn create_text<RT>(rt: &RT, path: impl AsRef<Path>) -> FileResult<TextWriter>
where
    RT: HasFile + HasEncoding,
{
    let path = path.as_ref();
    let result = rt.file_io().create_text(path, rt.encoding()).await;
    observe("create_text", path, result)
}

/// Open a file for streaming appends, creating it if needed
pub async fn append_text<RT>(rt: &RT, path: impl AsRef<Path>) -> FileResult<TextWriter>
where
    RT: HasFile + HasEncoding,
{
    let path = path.as_ref();
    let result = rt.file_io().append_text(path, rt.encoding()).await;
    observe("append_text", path, result)
}
