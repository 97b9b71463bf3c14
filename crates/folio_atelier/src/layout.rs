//! Output layout: where each generated document lives.

use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use folio_carton::FxHashMap;
use folio_croquis::Diagnostic;

/// The global overview page.
pub const INDEX_DOCUMENT: &str = "index.html";
/// Shared stylesheet, at the output root.
pub const STYLESHEET: &str = "style.css";
/// Script pinning the page header.
pub const STICKY_HEADER_SCRIPT: &str = "stickyHeader.js";
/// Script driving the collapsible namespace tree of the index.
pub const TREE_SCRIPT: &str = "tree.js";

/// Maps schema source paths to document paths relative to the output root.
///
/// A source keeps its directory structure below `input_root` and gets the
/// document extension. Sources outside `input_root` land at the output root
/// under their file name.
///
/// Two sources can map to the same document, and a source can map to the index
/// page. [`OutputLayout::assign_documents`] settles those before anything is written.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    input_root: PathBuf,
    extension: &'static str,
    /// Sources moved off their natural document path.
    reassigned: FxHashMap<PathBuf, PathBuf>,
}

impl OutputLayout {
    /// Layout for HTML documents below `input_root`.
    pub fn new(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            extension: "html",
            reassigned: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    #[inline]
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Source path relative to the input root (or its file name when outside it).
    pub fn relative_source(&self, source: &Path) -> PathBuf {
        match source.strip_prefix(&self.input_root) {
            Ok(relative) if relative.file_name().is_some() => relative.to_path_buf(),
            _ => source
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| source.to_path_buf()),
        }
    }

    /// Document path of a source, relative to the output root.
    pub fn document_path(&self, source: &Path) -> PathBuf {
        match self.reassigned.get(source) {
            Some(document) => document.clone(),
            None => self.natural_document_path(source),
        }
    }

    /// Document path a source gets when nothing else claims it.
    pub fn natural_document_path(&self, source: &Path) -> PathBuf {
        self.relative_source(source).with_extension(self.extension)
    }

    /// Give every source its own document path.
    ///
    /// The first source mapping to a path keeps it; the index page path is never
    /// given out. Every displaced source gets a numbered path next to the one it
    /// lost (`a.html` becomes `a-2.html`) and a diagnostic.
    pub fn assign_documents<'a>(
        &mut self,
        sources: impl IntoIterator<Item = &'a Path>,
    ) -> Vec<Diagnostic> {
        self.reassigned.clear();

        let mut owners: FxHashMap<PathBuf, &'a Path> = FxHashMap::default();
        let mut displaced: Vec<(&'a Path, PathBuf, Option<&'a Path>)> = Vec::new();

        for source in sources {
            let document = self.natural_document_path(source);
            if document == Path::new(INDEX_DOCUMENT) {
                displaced.push((source, document, None));
                continue;
            }
            match owners.entry(document) {
                Entry::Vacant(slot) => {
                    slot.insert(source);
                }
                Entry::Occupied(slot) => {
                    let owner = *slot.get();
                    if owner != source {
                        displaced.push((source, slot.key().clone(), Some(owner)));
                    }
                }
            }
        }

        let mut diagnostics = Vec::with_capacity(displaced.len());
        for (source, document, owner) in displaced {
            let mut n = 2;
            let assigned = loop {
                let candidate = numbered(&document, n);
                if !owners.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            };

            tracing::debug!(
                source = %source.display(),
                document = %assigned.display(),
                "document path reassigned"
            );
            diagnostics.push(Diagnostic::document_path_collision(
                source, &document, &assigned, owner,
            ));
            owners.insert(assigned.clone(), source);
            self.reassigned.insert(source.to_path_buf(), assigned);
        }

        diagnostics
    }

    /// Source path as shown in page titles, with `/` separators.
    pub fn display_name(&self, source: &Path) -> String {
        self.relative_source(source)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// `dir/a.html` with `n = 2` becomes `dir/a-2.html`.
fn numbered(document: &Path, n: usize) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let mut name = format!("{}-{}", stem, n);
    if let Some(extension) = document.extension() {
        name.push('.');
        name.push_str(&extension.to_string_lossy());
    }
    document.with_file_name(name)
}
