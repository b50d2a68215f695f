//! Discovery outcomes and fatal errors.
//!
//! # Responsibility
//! - Describe what happened to every candidate and injection target.
//! - Separate fatal run errors (`DiscoveryError`) from per-candidate skips.
//!
//! # Invariants
//! - Every in-scope configuration declaration appears exactly once in either
//!   `registered` or `skipped` after a successful run.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// How a registered configuration reached its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOrigin {
    /// File was missing; the default value was written.
    Created,
    /// File existed and was decoded.
    Loaded,
}

/// Why a configuration candidate was not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InvalidShape {
        expected_parent: &'static str,
        actual_parent: &'static str,
    },
    NoDefaultConstructor,
    InvalidName,
    CreateFailed { file: PathBuf, detail: String },
    CorruptFile { file: PathBuf, detail: String },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShape {
                expected_parent,
                actual_parent,
            } => write!(
                f,
                "type does not directly extend {expected_parent} (parent: {actual_parent})"
            ),
            Self::NoDefaultConstructor => write!(f, "no zero-argument constructor"),
            Self::InvalidName => write!(f, "logical name is not a valid file name"),
            Self::CreateFailed { file, detail } => {
                write!(f, "cannot create `{}`: {detail}", file.display())
            }
            Self::CorruptFile { file, detail } => {
                write!(f, "config file `{}` is corrupted: {detail}", file.display())
            }
        }
    }
}

/// Configuration bound and registered during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredConfig {
    pub type_name: &'static str,
    pub logical_name: String,
    pub file: PathBuf,
    pub origin: BindOrigin,
}

/// Configuration candidate left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub type_name: &'static str,
    pub logical_name: String,
    pub reason: SkipReason,
}

/// Why an injection target was not considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Slot is owned by an instance rather than being static.
    NotStatic,
    /// Slot type does not directly extend the entity abstraction.
    NotDirectEntity { parent: &'static str },
}

/// Result of the injection pass for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    Injected {
        field: String,
        type_name: &'static str,
    },
    /// Target is eligible but its type was never registered.
    Unresolved {
        field: String,
        type_name: &'static str,
    },
    Ignored {
        field: String,
        type_name: &'static str,
        reason: IgnoreReason,
    },
}

impl InjectionOutcome {
    pub fn field(&self) -> &str {
        match self {
            Self::Injected { field, .. }
            | Self::Unresolved { field, .. }
            | Self::Ignored { field, .. } => field,
        }
    }
}

/// Observable result of one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub module: String,
    pub registered: Vec<RegisteredConfig>,
    pub skipped: Vec<SkippedCandidate>,
    pub injections: Vec<InjectionOutcome>,
    /// Declared types outside the module namespace.
    pub out_of_scope: Vec<&'static str>,
}

impl DiscoveryReport {
    pub(crate) fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            ..Self::default()
        }
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.registered
            .iter()
            .any(|entry| entry.type_name == type_name)
    }

    pub fn skip_reason(&self, type_name: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|entry| entry.type_name == type_name)
            .map(|entry| &entry.reason)
    }

    pub fn injection(&self, field: &str) -> Option<&InjectionOutcome> {
        self.injections
            .iter()
            .find(|outcome| outcome.field() == field)
    }
}

/// Errors that abort a whole discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Discovery already ran against this container.
    ReentrantInit { module: String },
    /// Host cannot supply the module install directory.
    MissingModuleRoot { module: String },
}

impl Display for DiscoveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReentrantInit { module } => {
                write!(f, "configuration discovery already ran (module: {module})")
            }
            Self::MissingModuleRoot { module } => {
                write!(f, "cannot find module main directory: {module}")
            }
        }
    }
}

impl Error for DiscoveryError {}
