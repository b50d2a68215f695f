//! Dependency slots and the injection pass.
//!
//! # Responsibility
//! - Provide `Autowired<T>`, a slot a module declares to receive a singleton.
//! - Assign eligible slots from the container after all candidates are bound.
//!
//! # Invariants
//! - Only static slots of direct entity types are assigned.
//! - An unresolved static slot is emptied and reported.
//! - Member slots are never touched.

use super::manifest::{InjectionDeclaration, SlotBinding};
use super::report::{IgnoreReason, InjectionOutcome};
use crate::entity::{BoundConfig, ConfigEntity};
use crate::registry::ConfigContainer;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

/// Slot receiving the singleton of `T` during the injection pass.
///
/// Declare it as a `static` and register it with `ModuleManifest::autowired`.
pub struct Autowired<T: ConfigEntity> {
    slot: RwLock<Option<Arc<BoundConfig<T>>>>,
}

impl<T: ConfigEntity> Autowired<T> {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Injected singleton, if any.
    pub fn get(&self) -> Option<Arc<BoundConfig<T>>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Injected singleton, or `InjectionError::NotInjected`.
    pub fn require(&self) -> Result<Arc<BoundConfig<T>>, InjectionError> {
        self.get().ok_or(InjectionError::NotInjected {
            type_name: std::any::type_name::<T>(),
        })
    }

    pub fn is_injected(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn set(&self, instance: Option<Arc<BoundConfig<T>>>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = instance;
    }
}

impl<T: ConfigEntity> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ConfigEntity> Debug for Autowired<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autowired")
            .field("type", &std::any::type_name::<T>())
            .field("injected", &self.is_injected())
            .finish()
    }
}

/// Type-erased view of an `Autowired<T>` used by the injection pass.
pub trait InjectSlot: Send + Sync {
    /// Assigns the container singleton. Returns `false` and empties the slot
    /// when none is registered.
    fn inject_from(&self, container: &ConfigContainer) -> bool;
}

impl<T: ConfigEntity> InjectSlot for Autowired<T> {
    fn inject_from(&self, container: &ConfigContainer) -> bool {
        let instance = container.get::<T>();
        let resolved = instance.is_some();
        self.set(instance);
        resolved
    }
}

pub(crate) fn run_injection_pass(
    targets: &[&InjectionDeclaration],
    container: &ConfigContainer,
) -> Vec<InjectionOutcome> {
    targets
        .iter()
        .map(|target| inject_target(target, container))
        .collect()
}

fn inject_target(target: &InjectionDeclaration, container: &ConfigContainer) -> InjectionOutcome {
    let field = target.field().to_string();
    let type_name = target.type_name();

    if !target.lineage().is_direct() {
        debug!(
            "event=config_inject module=discovery status=ignored field={} type={} reason=not_direct_entity",
            field, type_name
        );
        return InjectionOutcome::Ignored {
            field,
            type_name,
            reason: IgnoreReason::NotDirectEntity {
                parent: target.lineage().parent_name(),
            },
        };
    }

    let slot = match target.slot() {
        SlotBinding::Static(slot) => *slot,
        SlotBinding::Member(_) => {
            debug!(
                "event=config_inject module=discovery status=ignored field={} type={} reason=not_static",
                field, type_name
            );
            return InjectionOutcome::Ignored {
                field,
                type_name,
                reason: IgnoreReason::NotStatic,
            };
        }
    };

    if slot.inject_from(container) {
        debug!(
            "event=config_inject module=discovery status=ok field={} type={}",
            field, type_name
        );
        InjectionOutcome::Injected { field, type_name }
    } else {
        warn!(
            "event=config_inject module=discovery status=unresolved field={} type={}",
            field, type_name
        );
        InjectionOutcome::Unresolved { field, type_name }
    }
}

/// Dependency slot access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    NotInjected { type_name: &'static str },
}

impl Display for InjectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInjected { type_name } => {
                write!(f, "configuration dependency was not injected: {type_name}")
            }
        }
    }
}

impl Error for InjectionError {}
