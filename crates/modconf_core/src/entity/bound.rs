//! Bound configuration entity.
//!
//! # Responsibility
//! - Own one configuration value together with its backing file.
//! - Reload, save and update the value through the serializer.
//!
//! # Invariants
//! - `reload` replaces the value in place; every holder of the same
//!   `Arc<BoundConfig<T>>` observes the new value.
//! - A failed `reload` leaves the previous value untouched.

use super::ConfigEntity;
use crate::persist::{decode_value, encode_value, Serializer, SerializerError};
use crate::registry::ConfigContainer;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Configuration value bound to its on-disk file.
pub struct BoundConfig<T: ConfigEntity> {
    file: PathBuf,
    value: RwLock<T>,
    serializer: Arc<dyn Serializer>,
}

impl<T: ConfigEntity> BoundConfig<T> {
    /// Binds `value` to `file`. No I/O happens here.
    pub fn new(value: T, file: impl Into<PathBuf>, serializer: Arc<dyn Serializer>) -> Self {
        Self {
            file: file.into(),
            value: RwLock::new(value),
            serializer,
        }
    }

    /// Returns the registered singleton for `T`, if discovery bound one.
    pub fn get_instance(container: &ConfigContainer) -> Option<Arc<Self>> {
        container.get::<T>()
    }

    /// Backing file path.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Read access to the current value.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the current value.
    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.read().clone()
    }

    /// Re-reads the backing file and replaces the in-memory value.
    ///
    /// # Errors
    /// - `SerializerError::Io` when the file cannot be read.
    /// - `SerializerError::Decode` when its content does not decode into `T`.
    pub fn reload(&self) -> Result<(), SerializerError> {
        let raw = self.serializer.load_value(&self.file)?;
        let decoded: T = decode_value(raw, &self.file)?;
        *self.write() = decoded;
        Ok(())
    }

    /// Writes the current value to the backing file.
    pub fn save(&self) -> Result<(), SerializerError> {
        let encoded = encode_value(&*self.read(), &self.file)?;
        self.serializer.save_value(&encoded, &self.file)
    }

    /// Applies `change` in memory, then saves.
    ///
    /// The in-memory change is kept even when the save fails.
    pub fn update(&self, change: impl FnOnce(&mut T)) -> Result<(), SerializerError> {
        {
            let mut guard = self.write();
            change(&mut guard);
        }
        self.save()
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.value.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: ConfigEntity> Debug for BoundConfig<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundConfig")
            .field("type", &std::any::type_name::<T>())
            .field("file", &self.file)
            .finish()
    }
}
