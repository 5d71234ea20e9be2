//! The alignment engine.
//!
//! This module provides the path from a tree root to repaired assets:
//! - Two-level tree traversal yielding apartment directories
//! - Canonical name derivation and drift checks
//! - Per-file rename plus sidecar reconciliation
//! - The orchestrating pass with per-file failure isolation
//!
//! # Architecture
//!
//! ```text
//! align_tree (orchestrator)
//!     │
//!     ├── walker - enumerate root/<location>/<apartment>
//!     │
//!     └── align_file - one file, one terminal outcome
//!             │
//!             ├── naming - location split, canonical prefix
//!             │
//!             └── metadata - sidecar scan and rewrite
//! ```

mod file;
mod naming;
mod orchestrator;
mod walker;

pub use file::{align_file, FileOutcome, MetadataOutcome};
pub use naming::{canonical_prefix, check_alignment, split_location, NameAlignment};
pub use orchestrator::{align_tree, AlignEvent, AlignReport};
pub use walker::{apartment_dirs, AssetDirectory, TreeListing};
