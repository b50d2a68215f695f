//! Configuration entity contracts.
//!
//! # Responsibility
//! - Define the `ConfigEntity` abstraction implemented by module config types.
//! - Describe the declared lineage used to accept or reject a candidate.
//! - Hold bound entities together with their backing file.
//!
//! # Invariants
//! - A value only gains a backing file when it is bound (`T` -> `BoundConfig<T>`).
//! - Only `Lineage::Direct` types are accepted as configuration entities.

mod bound;

pub use bound::BoundConfig;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Name reported as the required parent of every configuration type.
pub const CONFIG_ENTITY_NAME: &str = "modconf_core::ConfigEntity";

/// Declared immediate parent of a configuration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineage {
    /// Immediate parent is `ConfigEntity`.
    Direct,
    /// Type builds on another configuration type (rejected by discovery).
    Extends { parent: &'static str },
}

impl Lineage {
    /// Lineage of a type that builds on `P` instead of `ConfigEntity`.
    pub fn extends<P: ?Sized>() -> Self {
        Self::Extends {
            parent: std::any::type_name::<P>(),
        }
    }

    pub fn is_direct(self) -> bool {
        matches!(self, Self::Direct)
    }

    /// Name of the immediate parent.
    pub fn parent_name(self) -> &'static str {
        match self {
            Self::Direct => CONFIG_ENTITY_NAME,
            Self::Extends { parent } => parent,
        }
    }
}

/// Configuration object whose state round-trips to one JSON file.
///
/// Implementors are plain serde types. Discovery constructs them through
/// `Default` when they are declared with `ModuleManifest::configuration`.
pub trait ConfigEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Declared immediate parent. Override only for types layered on another
    /// configuration type; such types are never bound.
    fn lineage() -> Lineage {
        Lineage::Direct
    }
}
