//! Configuration file loading for folio.
//!
//! `folio.config.json` sits in the working directory. Relative paths in it are
//! taken relative to the file itself, and command line arguments always take
//! precedence over it.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "folio.config.json";

/// Top-level folio configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Schema files or directories to document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<PathBuf>,

    /// Output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Folder the page paths are computed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// A configuration file that exists but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FolioConfig {
    /// Read the configuration file in `dir`. `Ok(None)` when there is none.
    pub fn load(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|source| ConfigError::Parse { path, source })?;

        Ok(Some(config.relative_to(dir)))
    }

    /// Anchor relative `inputs`, `output` and `root` at `dir`.
    fn relative_to(mut self, dir: &Path) -> Self {
        for input in &mut self.inputs {
            *input = dir.join(&*input);
        }
        self.output = self.output.map(|output| dir.join(output));
        self.root = self.root.map(|root| dir.join(root));
        self
    }
}

/// Load `folio.config.json` from the given directory (or CWD if None).
///
/// Neither a missing nor a broken file stops a run: both yield the defaults,
/// a broken one with a warning.
pub fn load_config(dir: Option<&Path>) -> FolioConfig {
    let base = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().unwrap_or_default(),
    };

    match FolioConfig::load(&base) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("\x1b[33mWarning:\x1b[0m {}", e);
            FolioConfig::default()
        }
    }
}
