//! Per-file alignment: drift detection, rename, sidecar reconciliation.
//!
//! Each file is handled independently and lands in exactly one terminal
//! outcome, so a pass can always continue past any single failure. Sidecar
//! content is only inspected for files whose name actually gets corrected;
//! a canonically named file is never opened.

use crate::align::naming::{self, NameAlignment};
use crate::align::walker::AssetDirectory;
use crate::config::AssetConfig;
use crate::metadata;
use crate::{GalignError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Terminal outcome for one file in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Name carries no separator; deliberately excluded from alignment.
    SkippedNoSeparator,
    /// Name already canonical; the sidecar is not inspected.
    AlreadyCorrect,
    /// The aligned name is already taken; nothing was touched.
    CollisionSkipped { destination: PathBuf },
    /// File was renamed (or would be, in dry-run mode).
    Renamed {
        destination: PathBuf,
        metadata: MetadataOutcome,
    },
}

/// What happened to a renamed file's sidecar content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOutcome {
    /// Not a JSON sidecar.
    NotApplicable,
    /// Sidecar had no drifted fields, or could not be parsed.
    Unchanged,
    /// Drifted fields were rewritten (or would be, in dry-run mode).
    Rewritten,
}

/// Align one direct child file of `dir`.
///
/// In dry-run mode every check still runs, including the sidecar scan
/// against the file's current path, but nothing on disk changes.
pub fn align_file(dir: &AssetDirectory, file_name: &str, dry_run: bool) -> Result<FileOutcome> {
    let aligned = match naming::check_alignment(file_name, &dir.name) {
        NameAlignment::NoLocation => {
            debug!("No location token in {:?}, skipping", file_name);
            return Ok(FileOutcome::SkippedNoSeparator);
        }
        NameAlignment::Canonical => return Ok(FileOutcome::AlreadyCorrect),
        NameAlignment::Drifted { aligned } => aligned,
    };

    let source = dir.path.join(file_name);
    let destination = dir.path.join(&aligned);

    if destination.exists() {
        warn!(
            "Destination already exists, skipping rename: {}",
            destination.display()
        );
        return Ok(FileOutcome::CollisionSkipped { destination });
    }

    if dry_run {
        let metadata = if !is_metadata_sidecar(file_name) {
            MetadataOutcome::NotApplicable
        } else if sidecar_needs_fix(&source, &dir.name) {
            MetadataOutcome::Rewritten
        } else {
            MetadataOutcome::Unchanged
        };
        return Ok(FileOutcome::Renamed {
            destination,
            metadata,
        });
    }

    fs::rename(&source, &destination).map_err(|e| GalignError::io_with_path(e, &source))?;
    debug!("Renamed {} -> {}", source.display(), destination.display());

    let metadata = if is_metadata_sidecar(file_name) {
        reconcile_sidecar(&destination, &dir.name)?
    } else {
        MetadataOutcome::NotApplicable
    };

    Ok(FileOutcome::Renamed {
        destination,
        metadata,
    })
}

/// True for `.json` files, extension matched case-insensitively.
fn is_metadata_sidecar(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(AssetConfig::METADATA_EXTENSION))
        .unwrap_or(false)
}

/// Scan a sidecar for drifted fields, failing open.
///
/// An unreadable or malformed sidecar is logged and treated as having no
/// drift; the rename itself is not its concern.
fn sidecar_needs_fix(path: &Path, apartment: &str) -> bool {
    match metadata::read_json(path) {
        Ok(document) => metadata::document_needs_fix(&document, apartment),
        Err(e) => {
            warn!("Could not inspect sidecar {}: {}", path.display(), e);
            false
        }
    }
}

/// Rewrite a renamed sidecar's drifted fields in place.
///
/// Read and parse failures fail open like the scan; a failed write is a
/// real error for this file.
fn reconcile_sidecar(path: &Path, apartment: &str) -> Result<MetadataOutcome> {
    let mut document = match metadata::read_json(path) {
        Ok(document) => document,
        Err(e) => {
            warn!("Could not inspect sidecar {}: {}", path.display(), e);
            return Ok(MetadataOutcome::Unchanged);
        }
    };

    if !metadata::document_needs_fix(&document, apartment) {
        return Ok(MetadataOutcome::Unchanged);
    }

    let changed = metadata::rewrite_document(&mut document, apartment);
    metadata::write_json_atomic(path, &document)?;
    debug!("Rewrote {} field(s) in {}", changed, path.display());

    Ok(MetadataOutcome::Rewritten)
}
