//! Declaration registry.
//!
//! The registry is the global symbol table of one run. It is filled by the
//! collection pass through `&mut` and is only ever lent out by `&` afterwards,
//! so the rendering pass can share it across threads without locking.

use std::collections::hash_map::Entry;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use folio_carton::{CompactString, FxHashMap};

use crate::declaration::{AttributeDeclaration, TypeDeclaration};

/// A rejected registration. The first registration is always kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate file name '{name}', already registered from {}", .first.display())]
    DuplicateFile { name: CompactString, first: PathBuf },

    #[error("duplicate type '{name}', first declared in {}", .first.display())]
    DuplicateType { name: CompactString, first: PathBuf },

    #[error("duplicate attribute '{name}', first declared in {}", .first.display())]
    DuplicateAttribute { name: CompactString, first: PathBuf },
}

/// Global, namespace-aware symbol table.
#[derive(Debug, Default)]
pub struct DeclarationRegistry {
    /// Types by fully qualified name.
    types: FxHashMap<CompactString, TypeDeclaration>,
    /// Attributes by name.
    attributes: FxHashMap<CompactString, AttributeDeclaration>,
    /// Full paths by file base name.
    files: FxHashMap<CompactString, PathBuf>,
    /// Declared namespaces, sorted.
    namespaces: BTreeSet<CompactString>,
}

impl DeclarationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its fully qualified name.
    pub fn register_type(&mut self, decl: TypeDeclaration) -> Result<(), RegistryError> {
        match self.types.entry(decl.fully_qualified_name.clone()) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateType {
                name: decl.fully_qualified_name,
                first: existing.get().source_file.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(decl);
                Ok(())
            }
        }
    }

    /// Register a user attribute under its name.
    pub fn register_attribute(&mut self, decl: AttributeDeclaration) -> Result<(), RegistryError> {
        match self.attributes.entry(decl.name.clone()) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateAttribute {
                name: decl.name,
                first: existing.get().source_file.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(decl);
                Ok(())
            }
        }
    }

    /// Register `base_name -> full_path` for include resolution.
    pub fn register_file(
        &mut self,
        base_name: &str,
        full_path: &Path,
    ) -> Result<(), RegistryError> {
        match self.files.entry(CompactString::new(base_name)) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateFile {
                name: CompactString::new(base_name),
                first: existing.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(full_path.to_path_buf());
                Ok(())
            }
        }
    }

    /// Record a namespace. Re-adding one is a no-op.
    pub fn add_namespace(&mut self, namespace: &str) {
        if !self.namespaces.contains(namespace) {
            self.namespaces.insert(CompactString::new(namespace));
        }
    }

    /// Flag a type as a root type. Returns the declaration, or `None` if it does not exist.
    pub fn mark_root(&mut self, fully_qualified_name: &str) -> Option<&TypeDeclaration> {
        let decl = self.types.get_mut(fully_qualified_name)?;
        decl.is_root = true;
        Some(decl)
    }

    /// Look up a type by fully qualified name.
    #[inline]
    pub fn get_type(&self, fully_qualified_name: &str) -> Option<&TypeDeclaration> {
        self.types.get(fully_qualified_name)
    }

    /// Look up an attribute by name.
    #[inline]
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeDeclaration> {
        self.attributes.get(name)
    }

    /// Look up the full path registered for a file base name.
    #[inline]
    pub fn get_file(&self, base_name: &str) -> Option<&Path> {
        self.files.get(base_name).map(PathBuf::as_path)
    }

    /// All types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.values()
    }

    /// All attributes, in no particular order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDeclaration> {
        self.attributes.values()
    }

    /// Declared namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(CompactString::as_str)
    }

    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_armature::DeclKind;

    #[test]
    fn test_first_type_registration_wins() {
        let mut registry = DeclarationRegistry::new();
        registry
            .register_type(TypeDeclaration::new(DeclKind::Table, "Foo", "Bar", "a.fbs"))
            .unwrap();

        let err = registry
            .register_type(TypeDeclaration::new(DeclKind::Struct, "Foo", "Bar", "b.fbs"))
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateType {
                name: "Foo.Bar".into(),
                first: PathBuf::from("a.fbs"),
            }
        );
        assert_eq!(registry.type_count(), 1);
        let kept = registry.get_type("Foo.Bar").unwrap();
        assert_eq!(kept.source_file, Path::new("a.fbs"));
        assert_eq!(kept.kind, DeclKind::Table);
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let mut registry = DeclarationRegistry::new();
        registry
            .register_type(TypeDeclaration::new(DeclKind::Table, "A", "X", "a.fbs"))
            .unwrap();
        registry
            .register_type(TypeDeclaration::new(DeclKind::Table, "A.B", "X", "a.fbs"))
            .unwrap();
        registry
            .register_type(TypeDeclaration::new(DeclKind::Table, "", "X", "a.fbs"))
            .unwrap();
        assert_eq!(registry.type_count(), 3);
    }

    #[test]
    fn test_duplicate_attribute_and_file() {
        let mut registry = DeclarationRegistry::new();
        registry
            .register_attribute(AttributeDeclaration::new("priority", "a.fbs"))
            .unwrap();
        assert!(registry
            .register_attribute(AttributeDeclaration::new("priority", "b.fbs"))
            .is_err());
        assert_eq!(
            registry.get_attribute("priority").unwrap().source_file,
            Path::new("a.fbs")
        );

        registry
            .register_file("common.fbs", Path::new("/s/v1/common.fbs"))
            .unwrap();
        let err = registry
            .register_file("common.fbs", Path::new("/s/v2/common.fbs"))
            .unwrap_err();
        assert!(err.to_string().starts_with("duplicate file name 'common.fbs'"));
        assert_eq!(
            registry.get_file("common.fbs"),
            Some(Path::new("/s/v1/common.fbs"))
        );
    }

    #[test]
    fn test_mark_root() {
        let mut registry = DeclarationRegistry::new();
        registry
            .register_type(TypeDeclaration::new(DeclKind::Table, "Foo", "Bar", "a.fbs"))
            .unwrap();

        assert!(registry.mark_root("Foo.Bar").is_some());
        assert!(registry.mark_root("Foo.Bar").is_some());
        assert!(registry.get_type("Foo.Bar").unwrap().is_root);
        assert!(registry.mark_root("Foo.Missing").is_none());
    }

    #[test]
    fn test_namespaces_are_sorted_and_unique() {
        let mut registry = DeclarationRegistry::new();
        registry.add_namespace("Zeta");
        registry.add_namespace("Alpha.Beta");
        registry.add_namespace("Zeta");
        assert_eq!(
            registry.namespaces().collect::<Vec<_>>(),
            vec!["Alpha.Beta", "Zeta"]
        );
    }
}
