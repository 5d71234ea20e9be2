//! Galign Core - Headless engine for gallery asset alignment.
//!
//! This crate keeps a two-level tree of apartment image assets
//! (`root/<location>/<apartment>/<files>`) consistent with the directory
//! hierarchy it lives in. Filenames are renamed to the canonical
//! `{location}-{apartment}-` prefix, and recognized fields inside JSON
//! sidecars are rewritten to the enclosing apartment directory's name. A
//! separate pass writes per-apartment `manifest.json` gallery listings for
//! the converted `.webp` renditions.
//!
//! Both passes are re-runnable: a tree already aligned comes out untouched,
//! and dry-run mode performs every check without mutating anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use galign_core::{align_tree, AlignOptions};
//!
//! fn main() -> galign_core::Result<()> {
//!     let options = AlignOptions::new("./output").dry_run(true);
//!     let report = align_tree(&options, |_event| {})?;
//!     println!("would rename {} file(s)", report.renamed);
//!     Ok(())
//! }
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod manifest;
pub mod metadata;

// Re-export commonly used types
pub use align::{
    align_file, align_tree, apartment_dirs, AlignEvent, AlignReport, AssetDirectory, FileOutcome,
    MetadataOutcome, TreeListing,
};
pub use config::{AlignOptions, AssetConfig, ManifestOptions};
pub use error::{GalignError, Result};
pub use manifest::{generate_manifests, GalleryManifest, ManifestEvent, ManifestReport};
pub use metadata::MetadataDocument;
