//! Configuration discovery pipeline.
//!
//! Modules describe their configuration types and dependency slots in a
//! `ModuleManifest`. Discovery binds every valid configuration to
//! `<module-root>/<module-name>/configuration/<name>.json`, registers it in a
//! `ConfigContainer`, then fills the declared `Autowired` slots.
//!
//! # See also
//! - `DiscoveryEngine` for the explicit-container entry point.
//! - `process_module` for the process-wide one.

mod bind;
mod engine;
mod host;
mod index;
mod inject;
mod manifest;
mod naming;
mod report;

pub use engine::DiscoveryEngine;
pub use host::{ModuleHost, PluginModule};
pub use inject::{Autowired, InjectSlot, InjectionError};
pub use manifest::{ConfigDeclaration, InjectionDeclaration, ModuleManifest, SlotBinding};
pub use naming::{
    config_dir, config_file_name, is_valid_logical_name, CONFIG_DIR_NAME, CONFIG_FILE_EXTENSION,
};
pub use report::{
    BindOrigin, DiscoveryError, DiscoveryReport, IgnoreReason, InjectionOutcome, RegisteredConfig,
    SkipReason, SkippedCandidate,
};

use crate::registry::process_container;

/// Runs discovery for `module` against the process-wide container.
///
/// Succeeds at most once per process; later calls fail with
/// `DiscoveryError::ReentrantInit`.
pub fn process_module(module: &dyn ModuleHost) -> Result<DiscoveryReport, DiscoveryError> {
    DiscoveryEngine::new(process_container()).process_module(module)
}
