//! Error taxonomy for the config store and codec
//!
//! Everything propagates to the caller; nothing in this crate logs-and-eats
//! a failure. An absent config file is deliberately NOT an error: the store
//! starts empty and the first save creates the file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The stored document cannot be decoded: an unrecognized tagged-type
    /// marker, a malformed wrapper payload, bad base64, or a document that
    /// is not a JSON object. The store refuses to partially populate.
    #[error("corrupt config: {0}")]
    CorruptConfig(String),

    /// A value with no faithful JSON representation was passed to encode.
    /// Raised synchronously rather than silently dropping the value.
    #[error("unsupported value: {0}")]
    UnsupportedType(String),

    #[error("config file I/O failed for {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
