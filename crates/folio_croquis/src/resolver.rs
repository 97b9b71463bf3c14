//! Namespace scope resolution.
//!
//! A reference is looked up in the innermost enclosing namespace first, then
//! in each outer namespace, ending at the global namespace. The first match
//! wins, even if a shallower scope also declares the name.

use crate::declaration::{AttributeDeclaration, TypeDeclaration};
use crate::registry::DeclarationRegistry;

/// Resolve a (possibly partially qualified) type reference.
///
/// `current_namespace` is the namespace in effect at the reference, outermost
/// segment first. `reference` is the dotted text of the reference as written.
///
/// ```
/// use folio_armature::DeclKind;
/// use folio_croquis::{resolve_type, DeclarationRegistry, TypeDeclaration};
///
/// let mut registry = DeclarationRegistry::new();
/// registry.register_type(TypeDeclaration::new(DeclKind::Table, "A", "X", "a.fbs")).unwrap();
///
/// let found = resolve_type(&registry, &["A", "B"], "X").unwrap();
/// assert_eq!(found.fully_qualified_name, "A.X");
/// ```
pub fn resolve_type<'r, S: AsRef<str>>(
    registry: &'r DeclarationRegistry,
    current_namespace: &[S],
    reference: &str,
) -> Option<&'r TypeDeclaration> {
    let mut candidate = String::with_capacity(64);

    for depth in (0..=current_namespace.len()).rev() {
        candidate.clear();
        for segment in &current_namespace[..depth] {
            candidate.push_str(segment.as_ref());
            candidate.push('.');
        }
        candidate.push_str(reference);

        if let Some(decl) = registry.get_type(&candidate) {
            return Some(decl);
        }
    }

    None
}

/// Resolve an attribute usage. Attributes are not namespaced.
#[inline]
pub fn resolve_attribute<'r>(
    registry: &'r DeclarationRegistry,
    name: &str,
) -> Option<&'r AttributeDeclaration> {
    registry.get_attribute(name)
}
