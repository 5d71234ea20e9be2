//! Centralized configuration for the galign engine.
//!
//! This module provides the constants describing the asset naming scheme and
//! sidecar formats, plus the option structs passed explicitly into each pass.

use std::path::PathBuf;

/// Asset naming scheme and sidecar format constants.
pub struct AssetConfig;

impl AssetConfig {
    /// Separator between name segments: `{location}-{apartment}-{rest}`.
    pub const NAME_SEPARATOR: char = '-';
    /// Metadata keys whose string values are tied to the apartment directory.
    /// Matched case-insensitively.
    pub const METADATA_KEYS: &'static [&'static str] = &["apartment", "gallery_name"];
    /// Extension of metadata sidecar files (matched case-insensitively).
    pub const METADATA_EXTENSION: &'static str = "json";
    /// Extension of converted gallery renditions (matched case-insensitively).
    pub const GALLERY_EXTENSION: &'static str = "webp";
    /// Filename of the per-apartment gallery manifest.
    pub const MANIFEST_FILENAME: &'static str = "manifest.json";
}

/// Options for an alignment pass over an asset tree.
#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// Root of the `<location>/<apartment>` hierarchy.
    pub root: PathBuf,
    /// Report planned actions without touching any file.
    pub dry_run: bool,
}

impl AlignOptions {
    /// Create options for an apply-mode pass over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Set dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Options for a manifest generation pass.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Root of the `<location>/<apartment>` hierarchy.
    pub root: PathBuf,
    /// Report planned actions without touching any file.
    pub dry_run: bool,
}

impl ManifestOptions {
    /// Create options for an apply-mode pass over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Set dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
