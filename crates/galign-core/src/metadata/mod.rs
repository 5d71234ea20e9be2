//! Metadata sidecar handling.
//!
//! This module provides:
//! - Atomic JSON file operations
//! - Recursive rewriting of recognized fields inside arbitrary documents

mod atomic;
mod rewrite;

pub use atomic::{read_json, write_json_atomic};
pub use rewrite::{document_needs_fix, rewrite_document};

/// A parsed metadata sidecar.
///
/// Sidecars carry no fixed schema; anything that parses as JSON is accepted.
pub type MetadataDocument = serde_json::Value;
