//! Static files shipped with every generated site.

use std::path::Path;

use folio_atelier::{DocumentSink, STICKY_HEADER_SCRIPT, STYLESHEET, TREE_SCRIPT};
use folio_croquis::Diagnostic;

/// `(file name, content)` of each bundled asset.
pub const ASSETS: [(&str, &str); 3] = [
    (STYLESHEET, include_str!("../assets/style.css")),
    (TREE_SCRIPT, include_str!("../assets/tree.js")),
    (STICKY_HEADER_SCRIPT, include_str!("../assets/stickyHeader.js")),
];

/// Write the bundled assets to the output root.
///
/// Returns one diagnostic per asset that could not be written, attributed to `root`.
pub fn write_assets(sink: &dyn DocumentSink, root: &Path) -> Vec<Diagnostic> {
    ASSETS
        .iter()
        .filter_map(|(name, content)| {
            sink.write(Path::new(name), content)
                .err()
                .map(|error| Diagnostic::output_write_failure(Path::new(name), root, &error))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_atelier::MemorySink;

    #[test]
    fn test_assets_are_written() {
        let sink = MemorySink::new();
        assert!(write_assets(&sink, Path::new(".")).is_empty());
        assert_eq!(sink.len(), 3);
        assert!(sink.get("style.css").unwrap().contains(".type_reference"));
        assert!(sink.get("tree.js").unwrap().contains("caret"));
    }
}
