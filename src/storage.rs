use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;

/// Reads a whole document. A missing or unreadable file yields `None` so the
/// caller starts empty; only the reason differs in the log.
pub(crate) fn read_document(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, starting empty", path.display());
            None
        }
        Err(e) => {
            warn!("Failed to read {}: {}, starting empty", path.display(), e);
            None
        }
    }
}

/// Serializes `value` with 4-space indentation and swaps it over `path` in one
/// rename, so readers see either the old document or the new one.
pub(crate) fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut raw = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut raw, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    raw.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&raw)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", raw.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_document(&dir.path().join("absent.json")).is_none());
    }

    #[test]
    fn written_document_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        write_document(&path, &serde_json::json!({ "a": [1] })).unwrap();

        let raw = read_document(&path).unwrap();
        assert_eq!(raw, "{\n    \"a\": [\n        1\n    ]\n}\n");
    }
}
