//! Per-file walk context.
//!
//! The current file and current namespace are explicit values owned by one
//! file's walk. Nothing about them is shared between files.

use std::path::Path;

use folio_carton::{CompactString, SmallVec};

use crate::declaration::fully_qualified_name;

/// Namespace segments, stack-allocated for typical nesting depths.
pub type NamespaceSegments = SmallVec<[CompactString; 4]>;

/// Context of one file's walk: the file being walked and the namespace in effect.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext<'f> {
    file: Option<&'f Path>,
    segments: NamespaceSegments,
    dotted: CompactString,
}

impl<'f> NamespaceContext<'f> {
    /// Context with no file established yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a walk of `file`, starting in the global namespace.
    pub fn for_file(file: &'f Path) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    /// Establish the current file.
    #[inline]
    pub fn enter_file(&mut self, file: &'f Path) {
        self.file = Some(file);
    }

    /// Replace the current namespace. The last declaration wins; no nesting.
    pub fn enter_namespace<'s>(&mut self, segments: impl IntoIterator<Item = &'s str>) {
        self.segments = segments.into_iter().map(CompactString::new).collect();
        self.dotted = CompactString::new(self.segments.join("."));
    }

    #[inline]
    pub fn file(&self) -> Option<&'f Path> {
        self.file
    }

    /// Current namespace as a dotted string (empty for the global namespace).
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.dotted
    }

    /// Current namespace split into segments, outermost first.
    #[inline]
    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    /// Qualify a bare name with the current namespace.
    #[inline]
    pub fn qualify(&self, name: &str) -> CompactString {
        fully_qualified_name(&self.dotted, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_namespace_wins() {
        let mut ctx = NamespaceContext::for_file(Path::new("a.fbs"));
        assert_eq!(ctx.namespace(), "");
        assert_eq!(ctx.qualify("Bar"), "Bar");

        ctx.enter_namespace(["Game", "Common"]);
        assert_eq!(ctx.namespace(), "Game.Common");
        assert_eq!(ctx.segments().len(), 2);
        assert_eq!(ctx.qualify("Vec3"), "Game.Common.Vec3");

        ctx.enter_namespace(["Other"]);
        assert_eq!(ctx.qualify("Vec3"), "Other.Vec3");

        ctx.enter_namespace(std::iter::empty());
        assert_eq!(ctx.qualify("Vec3"), "Vec3");
    }

    #[test]
    fn test_file_context() {
        let mut ctx = NamespaceContext::new();
        assert!(ctx.file().is_none());
        ctx.enter_file(Path::new("a.fbs"));
        assert_eq!(ctx.file(), Some(Path::new("a.fbs")));
    }
}
