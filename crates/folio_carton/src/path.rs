//! Link/path calculation between generated documents.
//!
//! Every generated page lives at a path derived from its schema file, so a link
//! from one page to another is the relative path between the two page paths.
//! Links are computed from the *current* page, never from the output root, which
//! keeps the generated tree relocatable as a unit.

use std::ffi::OsStr;
use std::path::{Component, Path};

/// A path split into its anchor (prefix, root, leading `..`) and its normal segments.
#[derive(Debug, PartialEq, Eq)]
struct Anchored<'a> {
    prefix: Option<&'a OsStr>,
    has_root: bool,
    leading_parents: usize,
    segments: Vec<&'a OsStr>,
}

impl<'a> Anchored<'a> {
    fn new(path: &'a Path) -> Self {
        let mut anchored = Self {
            prefix: None,
            has_root: false,
            leading_parents: 0,
            segments: Vec::new(),
        };

        for component in path.components() {
            match component {
                Component::Prefix(prefix) => anchored.prefix = Some(prefix.as_os_str()),
                Component::RootDir => anchored.has_root = true,
                Component::CurDir => {}
                Component::ParentDir => {
                    if anchored.segments.pop().is_none() && !anchored.has_root {
                        anchored.leading_parents += 1;
                    }
                }
                Component::Normal(segment) => anchored.segments.push(segment),
            }
        }

        anchored
    }

    #[inline]
    fn same_root(&self, other: &Self) -> bool {
        self.prefix == other.prefix
            && self.has_root == other.has_root
            && self.leading_parents == other.leading_parents
    }
}

/// Compute the hyperlink from the document at `from` to the document at `to`.
///
/// Both paths name files. The result uses `/` separators regardless of platform.
/// When the two paths do not share a common root (one absolute and one relative,
/// different drive prefixes, ...) the target path is returned unchanged.
pub fn relative_href(from: &Path, to: &Path) -> String {
    let source = Anchored::new(from);
    let target = Anchored::new(to);

    if !source.same_root(&target) {
        return to.to_string_lossy().into_owned();
    }

    let from_dir = match source.segments.split_last() {
        Some((_, dir)) => dir,
        None => &[][..],
    };

    let common = from_dir
        .iter()
        .zip(target.segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::with_capacity(from_dir.len() + target.segments.len());
    parts.extend(std::iter::repeat("..".to_string()).take(from_dir.len() - common));
    parts.extend(
        target.segments[common..]
            .iter()
            .map(|s| s.to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        return ".".to_string();
    }

    parts.join("/")
}
