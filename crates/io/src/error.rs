//! Error types for file capabilities
//!
//! Every failure reaching a caller is one of a small set of kinds. None of
//! them is ever turned into a success, and a cancellation is always reported
//! as [`FileError::Canceled`], never as a partial result.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for file operations
pub type FileResult<T> = std::result::Result<T, FileError>;

/// Why text could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFailure {
    /// Bytes are not valid in the encoding
    Malformed,
    /// Text contains characters the encoding cannot represent
    Unmappable,
}

impl fmt::Display for EncodingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingFailure::Malformed => write!(f, "malformed input"),
            EncodingFailure::Unmappable => write!(f, "unmappable character"),
        }
    }
}

/// Error kinds reported by file capabilities
#[derive(Debug, Error)]
pub enum FileError {
    /// Path does not exist
    #[error("File not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Access to the path was refused
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        /// Path that was refused
        path: PathBuf,
    },

    /// Destination exists and overwriting was not requested
    #[error("File already exists: {}", .path.display())]
    AlreadyExists {
        /// Existing path
        path: PathBuf,
    },

    /// Copy source and destination resolve to the same file
    #[error("Source and destination are the same file: {}", .path.display())]
    SameFile {
        /// Path both sides resolve to
        path: PathBuf,
    },

    /// Cancellation was observed before the operation completed
    #[error("Operation canceled")]
    Canceled,

    /// Text could not be encoded or decoded
    #[error("Encoding error ({encoding}, {failure}): {}", .path.display())]
    Encoding {
        /// File being read or written
        path: PathBuf,
        /// Name of the encoding in use
        encoding: &'static str,
        /// What went wrong
        failure: EncodingFailure,
    },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Discriminant of [`FileError`], for matching without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileErrorKind {
    /// See [`FileError::NotFound`]
    NotFound,
    /// See [`FileError::PermissionDenied`]
    PermissionDenied,
    /// See [`FileError::AlreadyExists`]
    AlreadyExists,
    /// See [`FileError::SameFile`]
    SameFile,
    /// See [`FileError::Canceled`]
    Canceled,
    /// See [`FileError::Encoding`]
    Encoding,
    /// See [`FileError::Io`]
    Io,
}

impl FileError {
    /// Classify an `io::Error` raised while working on `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            io::ErrorKind::AlreadyExists => FileError::AlreadyExists { path },
            _ => FileError::Io { path, source: err },
        }
    }

    /// Encoding failure on `path`
    pub fn encoding(
        path: &Path,
        encoding: &'static encoding_rs::Encoding,
        failure: EncodingFailure,
    ) -> Self {
        FileError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
            failure,
        }
    }

    /// Payload-free kind of this error
    pub fn kind(&self) -> FileErrorKind {
        match self {
            FileError::NotFound { .. } => FileErrorKind::NotFound,
            FileError::PermissionDenied { .. } => FileErrorKind::PermissionDenied,
            FileError::AlreadyExists { .. } => FileErrorKind::AlreadyExists,
            FileError::SameFile { .. } => FileErrorKind::SameFile,
            FileError::Canceled => FileErrorKind::Canceled,
            FileError::Encoding { .. } => FileErrorKind::Encoding,
            FileError::Io { .. } => FileErrorKind::Io,
        }
    }

    /// Whether this error reports a cancellation
    pub fn is_canceled(&self) -> bool {
        matches!(self, FileError::Canceled)
    }
}
