//! Per-apartment gallery manifests.
//!
//! The conversion pipeline emits `.webp` renditions named
//! `{base}-{size}.webp`, possibly nested next to their originals. A
//! manifest lists each apartment's renditions by logical basename (size
//! suffix stripped, size variants collapsed) so a site can pick the
//! gallery up without scanning the tree itself. The first entry doubles as
//! the main image.

use crate::align::{apartment_dirs, TreeListing};
use crate::config::{AssetConfig, ManifestOptions};
use crate::metadata;
use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Trailing rendition size suffix, e.g. `-1920` in `foo-1920.webp`.
static SIZE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\d+$").unwrap());

/// A per-apartment gallery listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryManifest {
    /// Logical basename of the main image, if the gallery has any.
    pub main: Option<String>,
    /// All logical basenames in discovery order, main included.
    pub gallery: Vec<String>,
}

impl GalleryManifest {
    /// Build a manifest from logical basenames in discovery order.
    pub fn from_entries(gallery: Vec<String>) -> Self {
        Self {
            main: gallery.first().cloned(),
            gallery,
        }
    }
}

/// Reduce a rendition filename to its logical basename.
///
/// Strips one trailing `-<digits>` group from the stem and normalizes the
/// extension to the canonical rendition extension.
///
/// # Examples
///
/// ```
/// use galign_core::manifest::logical_basename;
///
/// assert_eq!(logical_basename("srima-tea-kitchen-1920.webp"), "srima-tea-kitchen.webp");
/// assert_eq!(logical_basename("srima-tea-kitchen.webp"), "srima-tea-kitchen.webp");
/// ```
pub fn logical_basename(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let logical = SIZE_SUFFIX.replace(&stem, "");
    format!("{}.{}", logical, AssetConfig::GALLERY_EXTENSION)
}

/// Summary of a manifest generation pass.
#[derive(Debug, Clone, Default)]
pub struct ManifestReport {
    /// Apartment directories visited
    pub directories: usize,
    /// Manifests written (or, in dry-run mode, that would be written)
    pub written: usize,
    /// Directories without any gallery renditions
    pub empty: usize,
    /// Per-directory failures (path, description)
    pub errors: Vec<(PathBuf, String)>,
}

/// One observable step of a manifest pass.
#[derive(Debug)]
pub enum ManifestEvent<'a> {
    /// Manifest written (or planned, in dry-run mode) for a directory.
    Written {
        path: &'a Path,
        manifest: &'a GalleryManifest,
    },
    /// Directory had no renditions; no manifest is written.
    Empty { directory: &'a Path },
    /// One directory failed; the pass continues.
    Failed { path: &'a Path, message: &'a str },
}

/// Generate `manifest.json` for every apartment directory under the root.
///
/// Directories without renditions get no manifest. Failures stay contained
/// to the directory that caused them.
pub fn generate_manifests<F>(options: &ManifestOptions, mut observer: F) -> Result<ManifestReport>
where
    F: FnMut(ManifestEvent<'_>),
{
    info!(
        "Starting manifest pass over {} (dry_run={})",
        options.root.display(),
        options.dry_run
    );

    let TreeListing {
        directories,
        failures,
    } = apartment_dirs(&options.root)?;
    let mut report = ManifestReport::default();

    for (path, message) in failures {
        observer(ManifestEvent::Failed {
            path: &path,
            message: &message,
        });
        report.errors.push((path, message));
    }

    for directory in &directories {
        report.directories += 1;

        let entries = collect_entries(&directory.path);
        if entries.is_empty() {
            debug!("No gallery renditions in {}", directory.path.display());
            report.empty += 1;
            observer(ManifestEvent::Empty {
                directory: &directory.path,
            });
            continue;
        }

        let manifest = GalleryManifest::from_entries(entries);
        let path = directory.path.join(AssetConfig::MANIFEST_FILENAME);

        if !options.dry_run {
            if let Err(e) = metadata::write_json_atomic(&path, &manifest) {
                warn!("Could not write {}: {}", path.display(), e);
                let message = e.to_string();
                observer(ManifestEvent::Failed {
                    path: &path,
                    message: &message,
                });
                report.errors.push((path, message));
                continue;
            }
        }

        report.written += 1;
        observer(ManifestEvent::Written {
            path: &path,
            manifest: &manifest,
        });
    }

    info!(
        "Manifest pass complete: {} written, {} empty, {} errors",
        report.written,
        report.empty,
        report.errors.len()
    );

    Ok(report)
}

/// Collect the logical gallery entries for one apartment directory.
///
/// Searches recursively in lexicographic order and collapses size variants
/// to one entry, first occurrence winning.
fn collect_entries(dir: &Path) -> Vec<String> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let name = entry.file_name().to_string_lossy();
        if !has_gallery_extension(&name) {
            continue;
        }
        let logical = logical_basename(&name);
        if !entries.contains(&logical) {
            entries.push(logical);
        }
    }
    entries
}

/// True for `.webp` files, extension matched case-insensitively.
fn has_gallery_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(AssetConfig::GALLERY_EXTENSION))
        .unwrap_or(false)
}
