//! Runtime configuration via `attest.toml`
//!
//! A production runtime reads its defaults (text encoding, read buffer size)
//! from a small TOML file. Missing fields fall back to defaults; invalid
//! values are rejected when the file is loaded rather than on first use.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::encoding::for_label;
use crate::text::DEFAULT_BUFFER_SIZE;

/// Config file name looked up by [`RuntimeConfig::load_or_default`].
pub const CONFIG_FILE_NAME: &str = "attest.toml";

/// Errors raised while loading or saving a [`RuntimeConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("Failed to access config file '{}': {source}", .path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value outside its domain
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Runtime configuration loaded from `attest.toml`.
///
/// # Example
///
/// ```toml
/// encoding = "utf-8"
/// buffer_size = 8192
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// WHATWG label of the text encoding, e.g. `"utf-8"` or `"latin1"`.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Bytes pulled from a file per read when streaming text.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl RuntimeConfig {
    /// Resolve the configured encoding label.
    ///
    /// # Errors
    ///
    /// Returns an error if the label names no known encoding.
    pub fn text_encoding(&self) -> Result<&'static Encoding, ConfigError> {
        for_label(&self.encoding).ok_or_else(|| ConfigError::Invalid {
            field: "encoding",
            reason: format!("unknown encoding label '{}'", self.encoding),
        })
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.text_encoding()?;
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid {
                field: "buffer_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Attest runtime configuration
#
# Text encoding used by file operations, as a WHATWG label
# ("utf-8", "latin1", "utf-16le", "shift_jis", ...)
encoding = "utf-8"

# Bytes read per chunk when streaming text (default: 8192)
buffer_size = 8192
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RuntimeConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `attest.toml` from `dir`, or the defaults if it is absent.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
