//! Configuration discovery and persistence for extension modules.
//! Binds declared configuration types to JSON files and hands out the live
//! singletons.

pub mod discovery;
pub mod entity;
pub mod logging;
pub mod persist;
pub mod registry;

pub use discovery::{
    process_module, Autowired, BindOrigin, DiscoveryEngine, DiscoveryError, DiscoveryReport,
    IgnoreReason, InjectionError, InjectionOutcome, ModuleHost, ModuleManifest, PluginModule,
    RegisteredConfig, SkipReason, SkippedCandidate,
};
pub use entity::{BoundConfig, ConfigEntity, Lineage, CONFIG_ENTITY_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use persist::{JsonSerializer, Serializer, SerializerError};
pub use registry::{get_instance, process_container, ConfigContainer, ContainerError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
