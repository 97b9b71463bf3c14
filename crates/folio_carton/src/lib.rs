//! Carton - The toolbox shared by every Folio crate.
//!
//! Folio turns a corpus of FlatBuffers schema files into cross-linked HTML pages.
//! This crate holds the small pieces every stage needs:
//!
//! - **Collections**: fast hash maps/sets and stack-optimized vectors
//! - **Strings**: `CompactString` for identifiers (SSO for short names)
//! - **Paths**: the link calculator that turns two document paths into a relative href
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use folio_carton::path::relative_href;
//!
//! let href = relative_href(Path::new("api/b.html"), Path::new("core/a.html"));
//! assert_eq!(href, "../core/a.html");
//! ```

pub mod path;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};

/// Strip the surrounding double quotes from a string constant.
///
/// Every leading and trailing `"` is removed, so `"\"name\""` becomes `name`.
#[inline]
pub fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"priority\""), "priority");
        assert_eq!(unquote("bare"), "bare");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\"unterminated"), "unterminated");
    }
}
