//! Host module handle.

use super::manifest::ModuleManifest;
use std::path::{Path, PathBuf};

/// What discovery needs from the hosting module system.
pub trait ModuleHost {
    /// Stable module name, used as the configuration directory name.
    fn name(&self) -> &str;

    /// Installed location of the module (e.g. its library file). The
    /// configuration tree is created next to it.
    fn source(&self) -> Option<&Path>;

    /// Declarations of this module.
    fn manifest(&self) -> &ModuleManifest;
}

/// Plain `ModuleHost` implementation for hosts that know their modules
/// up front.
#[derive(Debug)]
pub struct PluginModule {
    name: String,
    source: Option<PathBuf>,
    manifest: ModuleManifest,
}

impl PluginModule {
    pub fn new(name: impl Into<String>, manifest: ModuleManifest) -> Self {
        Self {
            name: name.into(),
            source: None,
            manifest,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl ModuleHost for PluginModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }
}
