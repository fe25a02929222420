//! Live file system backend on `tokio::fs`

use std::path::Path;

use async_trait::async_trait;
use encoding_rs::Encoding;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::cancel::{cancellable, ensure_not_cancelled};
use crate::encoding::{decode, encode, encode_lines, split_lines};
use crate::error::{FileError, FileResult};
use crate::file::FileIo;
use crate::text::{TextReader, TextWriter, DEFAULT_BUFFER_SIZE};

/// Backend performing real file I/O
#[derive(Debug, Clone, Copy)]
pub struct LiveFileIo {
    buffer_size: usize,
}

impl LiveFileIo {
    /// Backend whose text readers pull `buffer_size` bytes per read
    pub fn new(buffer_size: usize) -> Self {
        LiveFileIo {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Read size used by text readers
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for LiveFileIo {
    fn default() -> Self {
        LiveFileIo::new(DEFAULT_BUFFER_SIZE)
    }
}

async fn write_bytes(path: &Path, bytes: &[u8], append: bool) -> FileResult<()> {
    let mut options = OpenOptions::new();
    if append {
        options.append(true).create(true);
    } else {
        options.write(true).create(true).truncate(true);
    }
    let mut file = options
        .open(path)
        .await
        .map_err(|e| FileError::from_io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| FileError::from_io(path, e))?;
    file.flush().await.map_err(|e| FileError::from_io(path, e))
}

/// Whether `to` already exists and resolves to the same file as `from`
async fn same_file(from: &Path, to: &Path) -> FileResult<bool> {
    let target = match fs::canonicalize(to).await {
        Ok(target) => target,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(FileError::from_io(to, e)),
    };
    let source = fs::canonicalize(from)
        .await
        .map_err(|e| FileError::from_io(from, e))?;
    Ok(source == target)
}

#[async_trait]
impl FileIo for LiveFileIo {
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        token: &CancellationToken,
    ) -> FileResult<()> {
        cancellable(token, async {
            let mut source = File::open(from)
                .await
                .map_err(|e| FileError::from_io(from, e))?;

            // Opening the target would truncate the source.
            if same_file(from, to).await? {
                return Err(FileError::SameFile {
                    path: to.to_path_buf(),
                });
            }

            let mut options = OpenOptions::new();
            options.write(true);
            if overwrite {
                options.create(true).truncate(true);
            } else {
                options.create_new(true);
            }
            let mut target = options
                .open(to)
                .await
                .map_err(|e| FileError::from_io(to, e))?;

            let copied = tokio::io::copy(&mut source, &mut target)
                .await
                .map_err(|e| FileError::from_io(to, e))?;
            target.flush().await.map_err(|e| FileError::from_io(to, e))?;
            trace!(bytes = copied, "copied");
            Ok::<(), FileError>(())
        })
        .await
    }

    async fn append_all_lines(
        &self,
        path: &Path,
        lines: &[String],
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()> {
        ensure_not_cancelled(token)?;
        let bytes = encode_lines(encoding, lines)
            .map_err(|failure| FileError::encoding(path, encoding, failure))?;
        cancellable(token, write_bytes(path, &bytes, true)).await
    }

    async fn read_all_lines(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<Vec<String>> {
        let text = self.read_all_text(path, encoding, token).await?;
        Ok(split_lines(&text))
    }

    async fn write_all_lines(
        &self,
        path: &Path,
        lines: &[String],
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()> {
        ensure_not_cancelled(token)?;
        let bytes = encode_lines(encoding, lines)
            .map_err(|failure| FileError::encoding(path, encoding, failure))?;
        cancellable(token, write_bytes(path, &bytes, false)).await
    }

    async fn read_all_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<String> {
        let bytes = cancellable(token, async {
            fs::read(path).await.map_err(|e| FileError::from_io(path, e))
        })
        .await?;
        decode(encoding, &bytes).map_err(|failure| FileError::encoding(path, encoding, failure))
    }

    async fn write_all_text(
        &self,
        path: &Path,
        text: &str,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<()> {
        ensure_not_cancelled(token)?;
        let bytes =
            encode(encoding, text).map_err(|failure| FileError::encoding(path, encoding, failure))?;
        cancellable(token, write_bytes(path, &bytes, false)).await
    }

    async fn delete(&self, path: &Path) -> FileResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileError::from_io(path, e)),
        }
    }

    async fn open_text(&self, path: &Path, encoding: &'static Encoding) -> FileResult<TextReader> {
        let file = File::open(path)
            .await
            .map_err(|e| FileError::from_io(path, e))?;
        Ok(TextReader::new(
            Box::new(file),
            encoding,
            path,
            self.buffer_size,
        ))
    }

    async fn create_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
    ) -> FileResult<TextWriter> {
        let file = File::create(path)
            .await
            .map_err(|e| FileError::from_io(path, e))?;
        Ok(TextWriter::new(Box::new(file), encoding, path))
    }

    async fn append_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
    ) -> FileResult<TextWriter> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .await
            .map_err(|e| FileError::from_io(path, e))?;
        Ok(TextWriter::new(Box::new(file), encoding, path))
    }
}
