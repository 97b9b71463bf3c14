//! Declarations discovered by the collection pass.

use std::path::PathBuf;

use folio_armature::{DeclKind, Position};
use folio_carton::CompactString;
use serde::Serialize;

/// Join a namespace and a name into a fully qualified name.
///
/// The global namespace (empty string) leaves the name bare.
pub fn fully_qualified_name(namespace: &str, name: &str) -> CompactString {
    if namespace.is_empty() {
        CompactString::new(name)
    } else {
        let mut fqn = CompactString::with_capacity(namespace.len() + 1 + name.len());
        fqn.push_str(namespace);
        fqn.push('.');
        fqn.push_str(name);
        fqn
    }
}

/// A `table`, `struct`, `enum` or `union` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDeclaration {
    pub kind: DeclKind,
    pub namespace: CompactString,
    pub name: CompactString,
    pub fully_qualified_name: CompactString,
    pub source_file: PathBuf,
    /// Set when a `root_type` declaration names this type.
    pub is_root: bool,
    /// Position of the declared identifier.
    pub position: Position,
}

impl TypeDeclaration {
    pub fn new(
        kind: DeclKind,
        namespace: impl Into<CompactString>,
        name: impl Into<CompactString>,
        source_file: impl Into<PathBuf>,
    ) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        Self {
            kind,
            fully_qualified_name: fully_qualified_name(&namespace, &name),
            namespace,
            name,
            source_file: source_file.into(),
            is_root: false,
            position: Position::default(),
        }
    }

    /// Set the position of the declared identifier.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// A user `attribute "name";` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDeclaration {
    pub name: CompactString,
    pub source_file: PathBuf,
    pub position: Position,
}

impl AttributeDeclaration {
    pub fn new(name: impl Into<CompactString>, source_file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            position: Position::default(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}
