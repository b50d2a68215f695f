//! Per-candidate binding state machine.
//!
//! # Responsibility
//! - Turn a default-constructed value into a registered `BoundConfig<T>`.
//!
//! # Invariants
//! - Missing file: create directories and file, write the default value.
//! - Existing file: reload; a decode failure leaves the file untouched.
//! - Only `Created` and `Loaded` candidates reach the container.

use super::report::{BindOrigin, SkipReason};
use crate::entity::{BoundConfig, ConfigEntity};
use crate::persist::{Serializer, SerializerError};
use crate::registry::ConfigContainer;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Zero-argument constructor captured at declaration time.
pub(crate) type Constructor = fn() -> Box<dyn UnboundConfig>;

/// Default-constructed value waiting for its backing file.
pub(crate) trait UnboundConfig {
    fn bind(
        self: Box<Self>,
        file: PathBuf,
        serializer: Arc<dyn Serializer>,
        container: &ConfigContainer,
    ) -> Result<BindOrigin, SkipReason>;
}

struct Unbound<T: ConfigEntity>(T);

pub(crate) fn construct_default<T: ConfigEntity + Default>() -> Box<dyn UnboundConfig> {
    Box::new(Unbound(T::default()))
}

impl<T: ConfigEntity> UnboundConfig for Unbound<T> {
    fn bind(
        self: Box<Self>,
        file: PathBuf,
        serializer: Arc<dyn Serializer>,
        container: &ConfigContainer,
    ) -> Result<BindOrigin, SkipReason> {
        let bound = BoundConfig::new(self.0, file, serializer);

        let origin = if bound.file().exists() {
            bound.reload().map_err(|err| SkipReason::CorruptFile {
                file: bound.file().to_path_buf(),
                detail: err.to_string(),
            })?;
            BindOrigin::Loaded
        } else {
            create_backing_file(bound.file())
                .and_then(|()| bound.save())
                .map_err(|err| SkipReason::CreateFailed {
                    file: bound.file().to_path_buf(),
                    detail: err.to_string(),
                })?;
            BindOrigin::Created
        };

        container.put(Arc::new(bound));
        Ok(origin)
    }
}

fn create_backing_file(file: &Path) -> Result<(), SerializerError> {
    let io_error = |source| SerializerError::Io {
        path: file.to_path_buf(),
        source,
    };

    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(file)
        .map_err(io_error)?;
    Ok(())
}
