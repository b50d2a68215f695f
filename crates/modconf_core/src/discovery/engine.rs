//! Discovery engine.
//!
//! # Responsibility
//! - Run configuration discovery once per container.
//! - Validate, instantiate and bind every declared configuration.
//! - Run the injection pass after all candidates are processed.
//!
//! # Invariants
//! - A second run against the same container fails with `ReentrantInit`
//!   before touching the container.
//! - Per-candidate failures are logged, reported and skipped; only
//!   `ReentrantInit` and `MissingModuleRoot` abort the run.
//! - Injection never observes a partially populated container.

use super::host::ModuleHost;
use super::index::MetadataIndex;
use super::inject::run_injection_pass;
use super::manifest::ConfigDeclaration;
use super::naming::{config_dir, config_file_name, is_valid_logical_name};
use super::report::{
    DiscoveryError, DiscoveryReport, RegisteredConfig, SkipReason, SkippedCandidate,
};
use crate::entity::CONFIG_ENTITY_NAME;
use crate::persist::{JsonSerializer, Serializer};
use crate::registry::ConfigContainer;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

enum CandidateOutcome {
    Registered(RegisteredConfig),
    Skipped(SkipReason),
}

/// Binds a module's declared configurations into a container.
pub struct DiscoveryEngine<'c> {
    container: &'c ConfigContainer,
    serializer: Arc<dyn Serializer>,
}

impl<'c> DiscoveryEngine<'c> {
    /// Engine writing pretty-printed JSON.
    pub fn new(container: &'c ConfigContainer) -> Self {
        Self::with_serializer(container, Arc::new(JsonSerializer::default()))
    }

    pub fn with_serializer(
        container: &'c ConfigContainer,
        serializer: Arc<dyn Serializer>,
    ) -> Self {
        Self {
            container,
            serializer,
        }
    }

    /// Discovers, binds and injects the configurations of `module`.
    ///
    /// # Errors
    /// - `ReentrantInit` when discovery already ran against this container.
    /// - `MissingModuleRoot` when a candidate needs a file path and the host
    ///   supplies no install location.
    pub fn process_module(
        &self,
        module: &dyn ModuleHost,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        let started_at = Instant::now();
        let module_name = module.name();

        if !self.container.claim_bootstrap() {
            error!(
                "event=discovery_run module=discovery status=error name={} error_code=reentrant_init",
                module_name
            );
            return Err(DiscoveryError::ReentrantInit {
                module: module_name.to_string(),
            });
        }
        info!(
            "event=discovery_run module=discovery status=start name={}",
            module_name
        );

        let index = MetadataIndex::scoped(module.manifest());
        let mut report = DiscoveryReport::new(module_name);
        report.out_of_scope = index.out_of_scope().to_vec();

        for declaration in index.configurations() {
            match self.process_candidate(module, declaration)? {
                CandidateOutcome::Registered(registered) => report.registered.push(registered),
                CandidateOutcome::Skipped(reason) => report.skipped.push(SkippedCandidate {
                    type_name: declaration.type_name(),
                    logical_name: declaration.logical_name().to_string(),
                    reason,
                }),
            }
        }

        report.injections = run_injection_pass(index.injections(), self.container);

        info!(
            "event=discovery_run module=discovery status=ok name={} registered={} skipped={} injections={} duration_ms={}",
            module_name,
            report.registered.len(),
            report.skipped.len(),
            report.injections.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    fn process_candidate(
        &self,
        module: &dyn ModuleHost,
        declaration: &ConfigDeclaration,
    ) -> Result<CandidateOutcome, DiscoveryError> {
        let type_name = declaration.type_name();
        let logical_name = declaration.logical_name();

        let lineage = declaration.lineage();
        if !lineage.is_direct() {
            warn!(
                "event=config_candidate module=discovery status=skip type={} name={} reason=invalid_shape expected_parent={} parent={}",
                type_name,
                logical_name,
                CONFIG_ENTITY_NAME,
                lineage.parent_name()
            );
            return Ok(CandidateOutcome::Skipped(SkipReason::InvalidShape {
                expected_parent: CONFIG_ENTITY_NAME,
                actual_parent: lineage.parent_name(),
            }));
        }

        let Some(constructor) = declaration.constructor() else {
            warn!(
                "event=config_candidate module=discovery status=skip type={} name={} reason=no_default_constructor",
                type_name, logical_name
            );
            return Ok(CandidateOutcome::Skipped(SkipReason::NoDefaultConstructor));
        };

        if !is_valid_logical_name(logical_name) {
            warn!(
                "event=config_candidate module=discovery status=skip type={} name={:?} reason=invalid_name",
                type_name, logical_name
            );
            return Ok(CandidateOutcome::Skipped(SkipReason::InvalidName));
        }

        let unbound = constructor();
        let file_name = config_file_name(logical_name);
        let file = module_config_dir(module)?.join(file_name);

        match unbound.bind(file.clone(), Arc::clone(&self.serializer), self.container) {
            Ok(origin) => {
                info!(
                    "event=config_bind module=discovery status=ok type={} file={} origin={:?}",
                    type_name,
                    file.display(),
                    origin
                );
                Ok(CandidateOutcome::Registered(RegisteredConfig {
                    type_name,
                    logical_name: logical_name.to_string(),
                    file,
                    origin,
                }))
            }
            Err(reason) => {
                match &reason {
                    SkipReason::CorruptFile { detail, .. } => warn!(
                        "event=config_bind module=discovery status=skip type={} file={} reason=corrupt_file error={}",
                        type_name,
                        file.display(),
                        detail
                    ),
                    other => error!(
                        "event=config_bind module=discovery status=error type={} file={} error={}",
                        type_name,
                        file.display(),
                        other
                    ),
                }
                Ok(CandidateOutcome::Skipped(reason))
            }
        }
    }
}

/// `<module-root>/<module-name>/configuration`, where `module-root` is the
/// directory holding the module's installed source. A bare file name has no
/// root.
fn module_config_dir(module: &dyn ModuleHost) -> Result<PathBuf, DiscoveryError> {
    let Some(module_root) = module
        .source()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
    else {
        error!(
            "event=discovery_run module=discovery status=error name={} error_code=missing_module_root",
            module.name()
        );
        return Err(DiscoveryError::MissingModuleRoot {
            module: module.name().to_string(),
        });
    };
    Ok(config_dir(module_root, module.name()))
}
