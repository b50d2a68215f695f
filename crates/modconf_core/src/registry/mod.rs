//! Configuration singleton registry.
//!
//! Holds the explicit `ConfigContainer` used by discovery and the
//! process-wide container behind the convenience entry points.

mod container;

pub use container::{ConfigContainer, ContainerError};

use crate::entity::{BoundConfig, ConfigEntity};
use std::sync::Arc;

static PROCESS_CONTAINER: ConfigContainer = ConfigContainer::new();

/// Process-wide container populated by `modconf_core::process_module`.
pub fn process_container() -> &'static ConfigContainer {
    &PROCESS_CONTAINER
}

/// Returns the process-wide singleton for `T`.
pub fn get_instance<T: ConfigEntity>() -> Option<Arc<BoundConfig<T>>> {
    PROCESS_CONTAINER.get::<T>()
}
