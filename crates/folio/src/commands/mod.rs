//! CLI commands.

pub mod build;
pub mod check;

use std::path::PathBuf;

use folio::config::FolioConfig;

/// Input paths: arguments first, then the config file, then the current directory.
pub(crate) fn resolve_inputs(paths: Vec<PathBuf>, config: &FolioConfig) -> Vec<PathBuf> {
    if !paths.is_empty() {
        paths
    } else if !config.inputs.is_empty() {
        config.inputs.clone()
    } else {
        vec![PathBuf::from(".")]
    }
}

/// Root folder: argument first, then the config file, then the current directory.
pub(crate) fn resolve_root(root: Option<PathBuf>, config: &FolioConfig) -> PathBuf {
    root.or_else(|| config.root.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configure the global thread pool size.
pub(crate) fn configure_threads(threads: Option<usize>) {
    if let Some(threads) = threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("\x1b[33mWarning:\x1b[0m Failed to configure thread pool: {}", e);
        }
    }
}
