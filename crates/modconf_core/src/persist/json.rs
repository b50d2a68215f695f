//! Default JSON file serializer.

use super::{Serializer, SerializerError};
use serde_json::Value;
use std::path::Path;

/// Reads and writes configuration files as JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Pretty-printed output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for JsonSerializer {
    fn save_value(&self, value: &Value, file: &Path) -> Result<(), SerializerError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        let mut bytes = encoded.map_err(|source| SerializerError::Encode {
            path: file.to_path_buf(),
            source,
        })?;
        bytes.push(b'\n');

        std::fs::write(file, bytes).map_err(|source| SerializerError::Io {
            path: file.to_path_buf(),
            source,
        })
    }

    fn load_value(&self, file: &Path) -> Result<Value, SerializerError> {
        let raw = std::fs::read(file).map_err(|source| SerializerError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| SerializerError::Decode {
            path: file.to_path_buf(),
            source,
        })
    }
}
