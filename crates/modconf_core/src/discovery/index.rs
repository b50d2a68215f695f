//! Namespace-scoped view over a module manifest.

use super::manifest::{ConfigDeclaration, InjectionDeclaration, ModuleManifest};

/// Declarations discovery acts on, in declaration order.
#[derive(Debug)]
pub(crate) struct MetadataIndex<'m> {
    configurations: Vec<&'m ConfigDeclaration>,
    injections: Vec<&'m InjectionDeclaration>,
    out_of_scope: Vec<&'static str>,
}

impl<'m> MetadataIndex<'m> {
    pub(crate) fn scoped(manifest: &'m ModuleManifest) -> Self {
        let namespace = manifest.namespace();
        let (configurations, excluded): (Vec<_>, Vec<_>) = manifest
            .configurations()
            .iter()
            .partition(|declaration| in_namespace(declaration.type_name(), namespace));

        Self {
            configurations,
            injections: manifest.injections().iter().collect(),
            out_of_scope: excluded
                .into_iter()
                .map(|declaration| declaration.type_name())
                .collect(),
        }
    }

    pub(crate) fn configurations(&self) -> &[&'m ConfigDeclaration] {
        &self.configurations
    }

    pub(crate) fn injections(&self) -> &[&'m InjectionDeclaration] {
        &self.injections
    }

    pub(crate) fn out_of_scope(&self) -> &[&'static str] {
        &self.out_of_scope
    }
}

/// Whether `type_name` lives in `namespace` or one of its submodules.
/// An empty namespace matches every type.
pub(crate) fn in_namespace(type_name: &str, namespace: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }
    let path = type_name.split('<').next().unwrap_or(type_name);
    path.strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::{in_namespace, MetadataIndex};
    use crate::discovery::manifest::ModuleManifest;
    use crate::entity::ConfigEntity;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Local {
        flag: bool,
    }

    impl ConfigEntity for Local {}

    #[test]
    fn namespace_matches_module_and_submodules_only() {
        assert!(in_namespace("ext::Settings", "ext"));
        assert!(in_namespace("ext::inner::Settings", "ext"));
        assert!(in_namespace("ext::Wrapper<other::Inner>", "ext"));
        assert!(!in_namespace("extension::Settings", "ext"));
        assert!(!in_namespace("other::Settings", "ext"));
        assert!(!in_namespace("other::Wrapper<ext::Inner>", "ext"));
        assert!(in_namespace("anything::At::All", ""));
    }

    #[test]
    fn scoped_index_excludes_foreign_types() {
        let manifest = ModuleManifest::new("some_other_crate").configuration::<Local>("local");
        let index = MetadataIndex::scoped(&manifest);

        assert!(index.configurations().is_empty());
        assert_eq!(index.out_of_scope().len(), 1);
        assert!(index.out_of_scope()[0].ends_with("Local"));
    }

    #[test]
    fn scoped_index_keeps_local_types() {
        let manifest = ModuleManifest::new(module_path!()).configuration::<Local>("local");
        let index = MetadataIndex::scoped(&manifest);

        assert_eq!(index.configurations().len(), 1);
        assert!(index.out_of_scope().is_empty());
    }
}
