//! Singleton container keyed by configuration type.
//!
//! # Responsibility
//! - Store the one live `BoundConfig<T>` per configuration type.
//! - Carry the one-shot bootstrap guard of the discovery run.
//!
//! # Invariants
//! - At most one instance per type; `put` is last-write-wins.
//! - Entries are never removed.
//! - The bootstrap guard can be claimed exactly once.

use crate::entity::{BoundConfig, ConfigEntity};
use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

struct Singleton {
    type_name: &'static str,
    instance: Arc<dyn Any + Send + Sync>,
}

/// Type-keyed registry of bound configuration singletons.
pub struct ConfigContainer {
    singletons: RwLock<BTreeMap<TypeId, Singleton>>,
    bootstrapped: AtomicBool,
}

impl ConfigContainer {
    pub const fn new() -> Self {
        Self {
            singletons: RwLock::new(BTreeMap::new()),
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// Inserts or replaces the singleton for `T`, returning the previous one.
    pub fn put<T: ConfigEntity>(
        &self,
        instance: Arc<BoundConfig<T>>,
    ) -> Option<Arc<BoundConfig<T>>> {
        let previous = self
            .singletons
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                TypeId::of::<T>(),
                Singleton {
                    type_name: std::any::type_name::<T>(),
                    instance,
                },
            )?;
        previous.instance.downcast::<BoundConfig<T>>().ok()
    }

    /// Returns the singleton for `T`, if registered.
    pub fn get<T: ConfigEntity>(&self) -> Option<Arc<BoundConfig<T>>> {
        let singletons = self
            .singletons
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = singletons.get(&TypeId::of::<T>())?;
        Arc::clone(&entry.instance).downcast::<BoundConfig<T>>().ok()
    }

    /// Like `get`, but reports a missing type as an error.
    pub fn require<T: ConfigEntity>(&self) -> Result<Arc<BoundConfig<T>>, ContainerError> {
        self.get::<T>().ok_or(ContainerError::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })
    }

    pub fn contains<T: ConfigEntity>(&self) -> bool {
        self.singletons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.singletons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted type names of all registered singletons.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .singletons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|entry| entry.type_name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether a discovery run has already claimed this container.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::Acquire)
    }

    /// Claims the one-shot bootstrap guard. Returns `false` if already claimed.
    pub(crate) fn claim_bootstrap(&self) -> bool {
        self.bootstrapped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for ConfigContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ConfigContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigContainer")
            .field("types", &self.type_names())
            .field("bootstrapped", &self.is_bootstrapped())
            .finish()
    }
}

/// Container lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    NotRegistered { type_name: &'static str },
}

impl Display for ContainerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered { type_name } => {
                write!(f, "configuration is not registered: {type_name}")
            }
        }
    }
}

impl Error for ContainerError {}

#[cfg(test)]
mod tests {
    use super::{ConfigContainer, ContainerError};
    use crate::entity::{BoundConfig, ConfigEntity};
    use crate::persist::JsonSerializer;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Alpha {
        value: u8,
    }

    impl ConfigEntity for Alpha {}

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Beta {
        name: String,
    }

    impl ConfigEntity for Beta {}

    fn bound<T: ConfigEntity + Default>(file: &str) -> Arc<BoundConfig<T>> {
        Arc::new(BoundConfig::new(
            T::default(),
            file,
            Arc::new(JsonSerializer::default()),
        ))
    }

    #[test]
    fn get_returns_identical_instance() {
        let container = ConfigContainer::new();
        let alpha = bound::<Alpha>("alpha.json");
        assert!(container.put(Arc::clone(&alpha)).is_none());

        let loaded = container.get::<Alpha>().expect("alpha registered");
        assert!(Arc::ptr_eq(&loaded, &alpha));
        assert!(container.get::<Beta>().is_none());
    }

    #[test]
    fn put_is_last_write_wins() {
        let container = ConfigContainer::new();
        let first = bound::<Alpha>("first.json");
        let second = bound::<Alpha>("second.json");

        container.put(Arc::clone(&first));
        let replaced = container
            .put(Arc::clone(&second))
            .expect("previous instance returned");

        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(&container.get::<Alpha>().unwrap(), &second));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn require_reports_missing_type() {
        let container = ConfigContainer::new();
        let err = container.require::<Beta>().expect_err("beta missing");
        assert!(matches!(err, ContainerError::NotRegistered { type_name } if type_name.ends_with("Beta")));
    }

    #[test]
    fn type_names_are_sorted() {
        let container = ConfigContainer::new();
        container.put(bound::<Beta>("beta.json"));
        container.put(bound::<Alpha>("alpha.json"));

        let names = container.type_names();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Alpha"));
        assert!(names[1].ends_with("Beta"));
        assert!(container.contains::<Alpha>());
    }

    #[test]
    fn bootstrap_guard_is_one_shot() {
        let container = ConfigContainer::new();
        assert!(!container.is_bootstrapped());
        assert!(container.claim_bootstrap());
        assert!(!container.claim_bootstrap());
        assert!(container.is_bootstrapped());
    }
}
