//! Reading and decoding schema sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use folio_armature::{parse, ParsedFile};
use folio_croquis::Diagnostic;
use rayon::prelude::*;

/// A schema file that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF32_LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const UTF32_BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decode schema bytes, honouring a byte order mark.
///
/// UTF-16 and UTF-32 are recognised only by their BOM. Everything else is read
/// as UTF-8, replacing invalid sequences.
pub fn decode(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    // The UTF-32 LE mark starts with the UTF-16 LE one.
    if let Some(rest) = bytes.strip_prefix(UTF32_LE_BOM) {
        return decode_utf32(rest, u32::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF32_BE_BOM) {
        return decode_utf32(rest, u32::from_be_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    bytes
        .chunks_exact(4)
        .map(|quad| {
            char::from_u32(unit([quad[0], quad[1], quad[2], quad[3]]))
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

/// Read and decode one schema file.
pub fn read_schema(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes))
}

/// Read and parse every file in parallel.
///
/// Files that cannot be read are left out and reported as diagnostics.
/// The parsed files keep the order of `paths`.
pub fn load_schemas(paths: &[PathBuf]) -> (Vec<ParsedFile>, Vec<Diagnostic>) {
    let loaded: Vec<Result<ParsedFile, Diagnostic>> = paths
        .par_iter()
        .map(|path| match read_schema(path) {
            Ok(source) => Ok(parse(path, &source)),
            Err(SourceError::Io { source, .. }) => Err(Diagnostic::unreadable_source(path, source)),
        })
        .collect();

    let mut files = Vec::with_capacity(loaded.len());
    let mut diagnostics = Vec::new();
    for result in loaded {
        match result {
            Ok(file) => files.push(file),
            Err(diagnostic) => {
                tracing::debug!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    }

    (files, diagnostics)
}
