//! Explicit module manifest replacing runtime metadata scanning.
//!
//! # Responsibility
//! - Record configuration markers (type + logical name) in declaration order.
//! - Record dependency markers (slot + field name).
//!
//! # Invariants
//! - Declaration order is the processing order of discovery.
//! - A declaration carries a constructor only when the type has a
//!   zero-argument constructor (`Default`).

use super::bind::{construct_default, Constructor};
use super::inject::{Autowired, InjectSlot};
use crate::entity::{ConfigEntity, Lineage};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Configuration marker for one type.
pub struct ConfigDeclaration {
    type_name: &'static str,
    logical_name: String,
    lineage: Lineage,
    constructor: Option<Constructor>,
}

impl ConfigDeclaration {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}

impl Debug for ConfigDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDeclaration")
            .field("type_name", &self.type_name)
            .field("logical_name", &self.logical_name)
            .field("lineage", &self.lineage)
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}

/// Storage of a dependency slot.
#[derive(Clone)]
pub enum SlotBinding {
    /// Static slot, eligible for injection.
    Static(&'static dyn InjectSlot),
    /// Slot owned by an instance; never injected.
    Member(Arc<dyn InjectSlot>),
}

impl SlotBinding {
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

/// Dependency marker for one slot.
pub struct InjectionDeclaration {
    field: String,
    type_name: &'static str,
    lineage: Lineage,
    slot: SlotBinding,
}

impl InjectionDeclaration {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    pub fn slot(&self) -> &SlotBinding {
        &self.slot
    }
}

impl Debug for InjectionDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionDeclaration")
            .field("field", &self.field)
            .field("type_name", &self.type_name)
            .field("lineage", &self.lineage)
            .field("static", &self.slot.is_static())
            .finish()
    }
}

/// Declarations of one extension module.
///
/// `namespace` scopes discovery: configuration types whose path lies outside
/// it are not candidates. `module_path!()` is the usual value.
#[derive(Debug)]
pub struct ModuleManifest {
    namespace: String,
    configurations: Vec<ConfigDeclaration>,
    injections: Vec<InjectionDeclaration>,
}

impl ModuleManifest {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            configurations: Vec::new(),
            injections: Vec::new(),
        }
    }

    /// Marks `T` as a configuration stored under `logical_name`.
    pub fn configuration<T: ConfigEntity + Default>(
        self,
        logical_name: impl Into<String>,
    ) -> Self {
        let constructor: Constructor = construct_default::<T>;
        self.declare::<T>(logical_name.into(), Some(constructor))
    }

    /// Marks `T` as a configuration although it has no zero-argument
    /// constructor. Discovery reports and skips it.
    pub fn configuration_without_default<T: ConfigEntity>(
        self,
        logical_name: impl Into<String>,
    ) -> Self {
        self.declare::<T>(logical_name.into(), None)
    }

    /// Marks a static slot as a dependency on `T`.
    pub fn autowired<T: ConfigEntity>(
        self,
        field: impl Into<String>,
        slot: &'static Autowired<T>,
    ) -> Self {
        self.inject::<T>(field.into(), SlotBinding::Static(slot))
    }

    /// Marks an instance-owned slot as a dependency on `T`. Such slots are
    /// reported as ignored and keep their content.
    pub fn autowired_member<T: ConfigEntity>(
        self,
        field: impl Into<String>,
        slot: Arc<Autowired<T>>,
    ) -> Self {
        self.inject::<T>(field.into(), SlotBinding::Member(slot))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn configurations(&self) -> &[ConfigDeclaration] {
        &self.configurations
    }

    pub fn injections(&self) -> &[InjectionDeclaration] {
        &self.injections
    }

    fn declare<T: ConfigEntity>(
        mut self,
        logical_name: String,
        constructor: Option<Constructor>,
    ) -> Self {
        self.configurations.push(ConfigDeclaration {
            type_name: std::any::type_name::<T>(),
            logical_name,
            lineage: T::lineage(),
            constructor,
        });
        self
    }

    fn inject<T: ConfigEntity>(mut self, field: String, slot: SlotBinding) -> Self {
        self.injections.push(InjectionDeclaration {
            field,
            type_name: std::any::type_name::<T>(),
            lineage: T::lineage(),
            slot,
        });
        self
    }
}
