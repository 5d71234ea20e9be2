//! Two-level tree traversal.
//!
//! The asset hierarchy is `root/<location>/<apartment>/<files>`. The walker
//! yields every apartment directory; names are taken literally from the
//! filesystem, the apartment directory's own name being the single source
//! of truth for canonical naming.

use crate::{GalignError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// An apartment directory discovered under the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDirectory {
    /// Path of the directory.
    pub path: PathBuf,
    /// The directory's own name, used as the canonical apartment token.
    pub name: String,
}

/// Result of walking an asset root.
#[derive(Debug, Clone, Default)]
pub struct TreeListing {
    /// Apartment directories in lexicographic walk order.
    pub directories: Vec<AssetDirectory>,
    /// Entries the walk could not read (path, description).
    pub failures: Vec<(PathBuf, String)>,
}

/// Collect all apartment directories under `root`.
///
/// Only the second level of the hierarchy is yielded; non-directories at
/// either level are skipped. Results come back in lexicographic order so
/// passes over the same tree report in a stable order. An entry the walk
/// cannot read is recorded on the listing's failure list instead of
/// aborting the walk.
pub fn apartment_dirs(root: &Path) -> Result<TreeListing> {
    if !root.is_dir() {
        return Err(GalignError::NotADirectory(root.to_path_buf()));
    }

    let mut listing = TreeListing::default();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Unreadable entry during walk: {}", e);
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                listing.failures.push((path, e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        listing.directories.push(AssetDirectory {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }

    Ok(listing)
}
