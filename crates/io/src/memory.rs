//! In-memory file system backend for tests
//!
//! Files live in a shared map keyed by path. Clones share state, so a test
//! can keep a handle and inspect what an operation did. Paths registered
//! with [`MemoryFileIo::deny`] fail every access with `PermissionDenied`.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use encoding_rs::Encoding;
use parking_lot::RwLock;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use crate::cancel::{cancellable, ensure_not_cancelled};
use crate::encoding::{decode, encode, encode_lines, split_lines};
use crate::error::{FileError, FileResult};
use crate::file::FileIo;
use crate::text::{TextReader, TextWriter, DEFAULT_BUFFER_SIZE};

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    denied: BTreeSet<PathBuf>,
    writes: u64,
}

impl MemoryState {
    fn check_access(&self, path: &Path) -> FileResult<()> {
        if self.denied.contains(path) {
            return Err(FileError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> FileResult<Vec<u8>> {
        self.check_access(path)?;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn put(&mut self, path: &Path, bytes: Vec<u8>, append: bool) -> FileResult<()> {
        self.check_access(path)?;
        let entry = self.files.entry(path.to_path_buf()).or_default();
        if !append {
            entry.clear();
        }
        entry.extend_from_slice(&bytes);
        self.writes += 1;
        Ok(())
    }
}

/// Backend keeping files in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFileIo {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryFileIo {
    /// Empty file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Create or replace a file without counting it as a write
    pub fn insert(&self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) {
        self.state
            .write()
            .files
            .insert(path.as_ref().to_path_buf(), bytes.into());
    }

    /// Refuse every later access to `path`
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.state.write().denied.insert(path.as_ref().to_path_buf());
    }

    /// Raw bytes of a file, if it exists
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state.read().files.get(path.as_ref()).cloned()
    }

    /// Whether a file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.state.read().files.contains_key(path.as_ref())
    }

    /// Number of writes performed through the backend
    pub fn write_count(&self) -> u64 {
        self.state.read().writes
    }

    fn writer(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        truncate: bool,
    ) -> FileResult<TextWriter> {
        self.state.write().put(path, Vec::new(), !truncate)?;
        let sink = MemoryWriter {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
        };
        Ok(TextWriter::new(Box::new(sink), encoding, path))
    }
}

/// Byte sink appending straight into a file of the shared state
struct MemoryWriter {
    state: Arc<RwLock<MemoryState>>,
    path: PathBuf,
}

impl AsyncWrite for MemoryWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut state = self.state.write();
        let written = state
            .put(&self.path, buf.to_vec(), true)
            .map(|()| buf.len())
            .map_err(|e| io::Error::new(io::ErrorKind::PermissionDenied, e.to_string()));
        Poll::Ready(written)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl FileIo for MemoryFileIo {
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        token: &CancellationToken,
    ) -> FileResult<()> {
        cancellable(token, async {
            tokio::task::yield_now().await;
            let mut state = self.state.write();
            let bytes = state.read(from)?;
            state.check_access(to)?;
            if from == to {
                return Err(FileError::SameFile {
                    path: to.to_path_buf(),
                });
            }
            if !overwrite && state.files.contains_key(to) {
                return Err(FileError::AlreadyExists {
                    path: to.to_path_buf(),
                });
            }
            state.put(to, bytes, false)
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
        cancellable(token, async {
            tokio::task::yield_now().await;
            self.state.write().put(path, bytes, true)
        })
        .await
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
        cancellable(token, async {
            tokio::task::yield_now().await;
            self.state.write().put(path, bytes, false)
        })
        .await
    }

    async fn read_all_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        token: &CancellationToken,
    ) -> FileResult<String> {
        let bytes = cancellable(token, async {
            tokio::task::yield_now().await;
            self.state.read().read(path)
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
        cancellable(token, async {
            tokio::task::yield_now().await;
            self.state.write().put(path, bytes, false)
        })
        .await
    }

    async fn delete(&self, path: &Path) -> FileResult<()> {
        let mut state = self.state.write();
        state.check_access(path)?;
        if state.files.remove(path).is_some() {
            state.writes += 1;
        }
        Ok(())
    }

    async fn open_text(&self, path: &Path, encoding: &'static Encoding) -> FileResult<TextReader> {
        let bytes = self.state.read().read(path)?;
        Ok(TextReader::new(
            Box::new(io::Cursor::new(bytes)),
            encoding,
            path,
            DEFAULT_BUFFER_SIZE,
        ))
    }

    async fn create_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
    ) -> FileResult<TextWriter> {
        self.writer(path, encoding, true)
    }

    async fn append_text(
        &self,
        path: &Path,
        encoding: &'static Encoding,
    ) -> FileResult<TextWriter> {
        self.writer(path, encoding, false)
    }
}
