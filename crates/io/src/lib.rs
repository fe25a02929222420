//! Capability-typed file access for Attest
//!
//! Effects are requested through small, independent capability traits:
//! - [`HasCancel`]: a cancellation token
//! - [`HasEncoding`]: the text encoding in use
//! - [`HasFile`]: a [`FileIo`] backend
//!
//! Operations in [`ops`] are generic over an environment providing exactly
//! the capabilities they need. [`LiveRuntime`] and [`TestRuntime`] provide
//! all three.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cancel;
pub mod config;
pub mod encoding;
pub mod error;
pub mod file;
pub mod live;
pub mod memory;
pub mod ops;
pub mod runtime;
pub mod text;

pub use cancel::{cancellable, ensure_not_cancelled, HasCancel};
pub use config::{ConfigError, RuntimeConfig, CONFIG_FILE_NAME};
pub use encoding::HasEncoding;
pub use error::{EncodingFailure, FileError, FileErrorKind, FileResult};
pub use file::{FileIo, HasFile};
pub use live::LiveFileIo;
pub use memory::MemoryFileIo;
pub use runtime::{LiveRuntime, Runtime, TestRuntime};
pub use text::{TextReader, TextWriter, DEFAULT_BUFFER_SIZE};

pub use encoding_rs::Encoding;
pub use tokio_util::sync::CancellationToken;
