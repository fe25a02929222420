//! Streaming text reader and writer
//!
//! Both work over any tokio byte stream, so the live and in-memory backends
//! share them. Decoding is incremental: a multi-byte character split across
//! two reads is reassembled by the decoder.

use std::path::{Path, PathBuf};

use encoding_rs::{Decoder, DecoderResult, Encoding};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::cancel::cancellable;
use crate::encoding::encode;
use crate::error::{EncodingFailure, FileError, FileResult};

/// Default size of a single read from the underlying stream
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Line-oriented reader decoding a byte stream
pub struct TextReader {
    inner: Box<dyn AsyncRead + Send + Unpin>,
    decoder: Decoder,
    encoding: &'static Encoding,
    path: PathBuf,
    chunk: Vec<u8>,
    pending: String,
    // Bytes of `pending` already known to hold no `\n`
    scanned: usize,
    eof: bool,
}

impl TextReader {
    /// Wrap `inner`, decoding it as `encoding`
    ///
    /// A leading byte order mark for `encoding` is skipped. `path` is only
    /// used in error reports.
    pub fn new(
        inner: Box<dyn AsyncRead + Send + Unpin>,
        encoding: &'static Encoding,
        path: &Path,
        buffer_size: usize,
    ) -> Self {
        TextReader {
            inner,
            decoder: encoding.new_decoder_with_bom_removal(),
            encoding,
            path: path.to_path_buf(),
            chunk: vec![0; buffer_size.max(1)],
            pending: String::new(),
            scanned: 0,
            eof: false,
        }
    }

    /// Encoding this reader decodes
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Read the next line without its terminator
    ///
    /// Returns `Ok(None)` at end of stream. Lines end at `\n` or `\r\n`.
    pub async fn read_line(&mut self, token: &CancellationToken) -> FileResult<Option<String>> {
        loop {
            if let Some(offset) = self.pending[self.scanned..].find('\n') {
                let pos = self.scanned + offset;
                let mut line: String = self.pending.drain(..=pos).collect();
                self.scanned = 0;
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
            self.scanned = self.pending.len();
            if !self.fill(token).await? {
                self.scanned = 0;
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.pending)));
            }
        }
    }

    /// Read everything that remains
    pub async fn read_to_string(&mut self, token: &CancellationToken) -> FileResult<String> {
        while self.fill(token).await? {}
        self.scanned = 0;
        Ok(std::mem::take(&mut self.pending))
    }

    /// Read one chunk and decode it into `pending`. Returns `false` once the
    /// stream is exhausted.
    async fn fill(&mut self, token: &CancellationToken) -> FileResult<bool> {
        if self.eof {
            return Ok(false);
        }

        let inner = &mut self.inner;
        let chunk = &mut self.chunk;
        let path = &self.path;
        let read = cancellable(token, async move {
            inner
                .read(chunk)
                .await
                .map_err(|e| FileError::from_io(path, e))
        })
        .await?;

        let last = read == 0;
        self.decode_chunk(read, last)?;
        if last {
            self.eof = true;
        }
        Ok(!last)
    }

    fn decode_chunk(&mut self, len: usize, last: bool) -> FileResult<()> {
        let mut src = &self.chunk[..len];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(src.len().saturating_mul(3) + 16);
            self.pending.reserve(needed);

            let (result, consumed) =
                self.decoder
                    .decode_to_string_without_replacement(src, &mut self.pending, last);
            src = &src[consumed..];

            match result {
                DecoderResult::InputEmpty => return Ok(()),
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(_, _) => {
                    return Err(FileError::encoding(
                        &self.path,
                        self.encoding,
                        EncodingFailure::Malformed,
                    ))
                }
            }
        }
    }
}

/// Writer encoding text onto a byte stream
pub struct TextWriter {
    inner: Box<dyn AsyncWrite + Send + Unpin>,
    encoding: &'static Encoding,
    path: PathBuf,
}

impl TextWriter {
    /// Wrap `inner`, encoding text as `encoding`. `path` is only used in
    /// error reports.
    pub fn new(
        inner: Box<dyn AsyncWrite + Send + Unpin>,
        encoding: &'static Encoding,
        path: &Path,
    ) -> Self {
        TextWriter {
            inner,
            encoding,
            path: path.to_path_buf(),
        }
    }

    /// Encoding this writer produces
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Write `text` as is
    ///
    /// Text that cannot be encoded is rejected before anything is written.
    pub async fn write_str(&mut self, text: &str, token: &CancellationToken) -> FileResult<()> {
        let bytes = encode(self.encoding, text)
            .map_err(|failure| FileError::encoding(&self.path, self.encoding, failure))?;
        self.write_bytes(&bytes, token).await
    }

    /// Write `line` followed by `\n`
    pub async fn write_line(&mut self, line: &str, token: &CancellationToken) -> FileResult<()> {
        let encode_err = |failure| FileError::encoding(&self.path, self.encoding, failure);
        let mut bytes = encode(self.encoding, line).map_err(encode_err)?;
        bytes.extend(encode(self.encoding, "\n").map_err(encode_err)?);
        self.write_bytes(&bytes, token).await
    }

    /// Flush buffered bytes to the underlying stream
    pub async fn flush(&mut self) -> FileResult<()> {
        self.inner
            .flush()
            .await
            .map_err(|e| FileError::from_io(&self.path, e))
    }

    /// Flush and shut the stream down
    pub async fn close(mut self) -> FileResult<()> {
        self.inner
            .shutdown()
            .await
            .map_err(|e| FileError::from_io(&self.path, e))
    }

    async fn write_bytes(&mut self, bytes: &[u8], token: &CancellationToken) -> FileResult<()> {
        let inner = &mut self.inner;
        let path = &self.path;
        cancellable(token, async move {
            inner
                .write_all(bytes)
                .await
                .map_err(|e| FileError::from_io(path, e))
        })
        .await
    }
}
