//! Write sinks for generated documents.
//!
//! The rendering pass writes from many threads at once, always to distinct
//! paths, so a sink must be `Sync` and tolerate writes in any order.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

/// Destination of generated documents.
pub trait DocumentSink: Sync {
    /// Make the output root ready. Called once, before the first write of a run.
    fn prepare(&self) -> io::Result<()> {
        Ok(())
    }

    /// Store `content` at `relative_path` below the output root.
    fn write(&self, relative_path: &Path, content: &str) -> io::Result<()>;
}

/// Writes documents below a directory, creating subdirectories as needed.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSink for FsSink {
    fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    fn write(&self, relative_path: &Path, content: &str) -> io::Result<()> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
    }
}

/// Keeps documents in memory. Used by `check` runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: DashMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a stored document.
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<String> {
        self.documents
            .get(relative_path.as_ref())
            .map(|entry| entry.value().clone())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.documents.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Take every stored document, sorted by path.
    pub fn into_documents(self) -> BTreeMap<PathBuf, String> {
        self.documents.into_iter().collect()
    }
}

impl DocumentSink for MemorySink {
    fn write(&self, relative_path: &Path, content: &str) -> io::Result<()> {
        self.documents
            .insert(relative_path.to_path_buf(), content.to_string());
        Ok(())
    }
}
