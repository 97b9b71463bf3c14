//! Schema file enumeration.

use ignore::Walk;
use std::path::{Path, PathBuf};

/// Extension of FlatBuffers schema files.
pub const SCHEMA_EXTENSION: &str = "fbs";

/// Collect the schema files named by `inputs`.
///
/// Files are taken as given; directories are walked recursively (honouring
/// `.gitignore`). Only `*.fbs` files are kept. The result holds absolute paths,
/// sorted and deduplicated.
pub fn collect_schema_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            if is_schema(input) {
                files.push(absolute(input));
            }
        } else if input.is_dir() {
            for entry in Walk::new(input).flatten() {
                let path = entry.path();
                if path.is_file() && is_schema(path) {
                    files.push(absolute(path));
                }
            }
        } else {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m {} does not exist, skipping",
                input.display()
            );
        }
    }

    files.sort();
    files.dedup();
    files
}

#[inline]
fn is_schema(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION)
}

/// Resolve a path against the current directory without touching symlinks.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("game/common")).unwrap();
        fs::write(root.join("game/monster.fbs"), "").unwrap();
        fs::write(root.join("game/common/vec.fbs"), "").unwrap();
        fs::write(root.join("game/readme.md"), "").unwrap();
        fs::write(root.join("top.fbs"), "").unwrap();

        let files = collect_schema_files(&[
            root.join("game"),
            root.join("top.fbs"),
            root.join("game/monster.fbs"),
            root.join("game/readme.md"),
        ]);

        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["game/common/vec.fbs", "game/monster.fbs", "top.fbs"]);
    }

    #[test]
    fn test_missing_input_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_schema_files(&[dir.path().join("nope")]).is_empty());
    }
}
