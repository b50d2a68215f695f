//! Persistence boundary between configuration entities and their files.
//!
//! # Responsibility
//! - Define the `Serializer` collaborator contract (`save` / `load`).
//! - Classify persistence failures into I/O, encode and decode errors.
//!
//! # Invariants
//! - `Serializer` implementations only move JSON values to and from files;
//!   typed encoding/decoding happens in `encode_value` / `decode_value`.

mod json;

pub use json::JsonSerializer;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// On-disk representation collaborator.
pub trait Serializer: Send + Sync {
    /// Writes `value` to `file`, replacing previous content.
    fn save_value(&self, value: &Value, file: &Path) -> Result<(), SerializerError>;

    /// Reads and parses `file`.
    fn load_value(&self, file: &Path) -> Result<Value, SerializerError>;
}

/// Persistence failure for one configuration file.
#[derive(Debug)]
pub enum SerializerError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SerializerError {
    /// File the failure relates to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Encode { path, .. } | Self::Decode { path, .. } => path,
        }
    }

    /// Whether the file content could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl Display for SerializerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o failure on `{}`: {source}", path.display()),
            Self::Encode { path, source } => {
                write!(f, "failed to encode `{}`: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "failed to decode `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SerializerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
        }
    }
}

pub(crate) fn encode_value<T: Serialize>(value: &T, path: &Path) -> Result<Value, SerializerError> {
    serde_json::to_value(value).map_err(|source| SerializerError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn decode_value<T: DeserializeOwned>(
    value: Value,
    path: &Path,
) -> Result<T, SerializerError> {
    serde_json::from_value(value).map_err(|source| SerializerError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
