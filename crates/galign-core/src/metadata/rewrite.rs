//! Recursive rewriting of recognized metadata fields.
//!
//! Sidecar documents carry no fixed schema. `apartment` and `gallery_name`
//! fields may sit at any depth inside objects and arrays, so both the scan
//! and the rewrite walk the whole value tree. Nothing but string values
//! bound to a recognized key is ever touched.

use crate::config::AssetConfig;
use serde_json::Value;

/// True if `key` names a field tied to the apartment directory.
fn is_recognized_key(key: &str) -> bool {
    AssetConfig::METADATA_KEYS
        .iter()
        .any(|k| key.eq_ignore_ascii_case(k))
}

/// Case-insensitive value comparison against the canonical apartment name.
fn matches_apartment(value: &str, apartment: &str) -> bool {
    value.to_lowercase() == apartment.to_lowercase()
}

/// Check whether any recognized field anywhere in `document` differs from
/// `apartment`.
///
/// Comparison is case-insensitive. A recognized key bound to a non-string
/// value is recursed into, never compared.
pub fn document_needs_fix(document: &Value, apartment: &str) -> bool {
    match document {
        Value::Object(map) => map.iter().any(|(key, value)| match value {
            Value::String(s) if is_recognized_key(key) => !matches_apartment(s, apartment),
            other => document_needs_fix(other, apartment),
        }),
        Value::Array(items) => items.iter().any(|item| document_needs_fix(item, apartment)),
        _ => false,
    }
}

/// Rewrite every recognized string field in `document` to `apartment`,
/// verbatim.
///
/// Returns the number of fields whose value changed. A field that already
/// equals `apartment` byte-for-byte is left alone; one that matches only
/// case-insensitively is normalized to the directory name's exact casing.
/// Key order, value types and every non-matching value stay untouched.
pub fn rewrite_document(document: &mut Value, apartment: &str) -> usize {
    match document {
        Value::Object(map) => {
            let mut changed = 0;
            for (key, value) in map.iter_mut() {
                match value {
                    Value::String(existing) if is_recognized_key(key) => {
                        if existing.as_str() != apartment {
                            *existing = apartment.to_string();
                            changed += 1;
                        }
                    }
                    other => changed += rewrite_document(other, apartment),
                }
            }
            changed
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| rewrite_document(item, apartment))
            .sum(),
        _ => 0,
    }
}
