//! Atomic file operations for safe JSON persistence.
//!
//! Writes go through a temp file with a unique PID+TID suffix, are synced,
//! then renamed over the target. A crash mid-write leaves the original
//! sidecar intact. No backup copies are kept: a stray backup inside an
//! apartment directory would itself look like an asset on the next pass.

use crate::metadata::MetadataDocument;
use crate::{GalignError, Result};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::process;
use std::thread;
use tracing::debug;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<MetadataDocument> {
    let mut file = File::open(path).map_err(|e| GalignError::Io {
        message: format!("Failed to open {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| GalignError::Io {
            message: format!("Failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;

    let document = serde_json::from_str(&contents).map_err(|e| GalignError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;

    Ok(document)
}

/// Write data to a JSON file atomically.
///
/// Serializes pretty-printed (two-space indent, non-ASCII kept verbatim) to
/// a temp file next to the target, syncs it, then renames it over the
/// target path.
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let pid = process::id();
    let tid = thread_id();
    let temp_path = path.with_extension(format!("json.{}.{}.tmp", pid, tid));

    let serialized = serde_json::to_string_pretty(data).map_err(|e| GalignError::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| GalignError::Io {
                message: format!("Failed to create temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.write_all(serialized.as_bytes())
            .map_err(|e| GalignError::Io {
                message: format!("Failed to write temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.sync_all().map_err(|e| GalignError::Io {
            message: format!("Failed to sync temp file {}", temp_path.display()),
            path: Some(temp_path.clone()),
            source: Some(e),
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| GalignError::Io {
        message: format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        ),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

/// Get a unique thread identifier.
fn thread_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    format!("{:?}", thread::current().id()).hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");

        let document = json!({
            "apartment": "tea",
            "rooms": [{"name": "kitchen"}, {"name": "bath"}]
        });

        write_json_atomic(&path, &document).unwrap();
        assert!(path.exists());

        let read_back = read_json(&path).unwrap();
        assert_eq!(read_back, document);
    }

    #[test]
    fn test_write_is_pretty_printed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");

        write_json_atomic(&path, &json!({"apartment": "tea"})).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "{\n  \"apartment\": \"tea\"\n}");
    }

    #[test]
    fn test_non_ascii_kept_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");

        write_json_atomic(&path, &json!({"gallery_name": "výhled"})).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("výhled"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");

        write_json_atomic(&path, &json!({"apartment": "old"})).unwrap();
        write_json_atomic(&path, &json!({"apartment": "new"})).unwrap();

        let read_back = read_json(&path).unwrap();
        assert_eq!(read_back, json!({"apartment": "new"}));
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");

        write_json_atomic(&path, &json!({"apartment": "tea"})).unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("meta.json")]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, GalignError::Io { .. }));
    }

    #[test]
    fn test_read_malformed_file_is_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{not valid").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, GalignError::Json { .. }));
    }

    #[test]
    fn test_key_order_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.json");
        std::fs::write(&path, "{\"zulu\": 1, \"alpha\": 2, \"mike\": 3}").unwrap();

        let document = read_json(&path).unwrap();
        write_json_atomic(&path, &document).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let zulu = raw.find("zulu").unwrap();
        let alpha = raw.find("alpha").unwrap();
        let mike = raw.find("mike").unwrap();
        assert!(zulu < alpha && alpha < mike);
    }
}
