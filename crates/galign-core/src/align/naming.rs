//! Canonical asset naming.
//!
//! Every asset filename is expected to carry the prefix
//! `{location}-{apartment}-`, where `location` is whatever precedes the
//! first separator in the name itself and `apartment` is the enclosing
//! directory's name. Names without a separator carry no location token and
//! are never touched.

use crate::config::AssetConfig;

/// Outcome of checking a filename against its apartment directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAlignment {
    /// No separator in the name; the file carries no location token.
    NoLocation,
    /// The name already starts with the canonical prefix.
    Canonical,
    /// The name drifted; `aligned` is the name it should have.
    Drifted { aligned: String },
}

/// Split a filename into its location token and the remainder after the
/// first separator.
///
/// Returns `None` for names without a separator.
///
/// # Examples
///
/// ```
/// use galign_core::align::split_location;
///
/// assert_eq!(split_location("srima-tea-01.jpg"), Some(("srima", "tea-01.jpg")));
/// assert_eq!(split_location("cover.jpg"), None);
/// ```
pub fn split_location(file_name: &str) -> Option<(&str, &str)> {
    file_name.split_once(AssetConfig::NAME_SEPARATOR)
}

/// Build the canonical prefix for a location/apartment pair.
pub fn canonical_prefix(location: &str, apartment: &str) -> String {
    let sep = AssetConfig::NAME_SEPARATOR;
    format!("{}{}{}{}", location, sep, apartment, sep)
}

/// Compare `file_name` against the canonical scheme for `apartment`.
///
/// The prefix check is byte-exact: casing must match the directory name
/// exactly, unlike the metadata comparisons which are case-insensitive.
/// For a drifted name, the canonical prefix replaces everything up to and
/// including the first separator and the remainder is kept verbatim.
///
/// # Examples
///
/// ```
/// use galign_core::align::{check_alignment, NameAlignment};
///
/// assert_eq!(
///     check_alignment("srima-tea-01.jpg", "tea"),
///     NameAlignment::Canonical
/// );
/// assert_eq!(
///     check_alignment("srima-kitchen.jpg", "tea"),
///     NameAlignment::Drifted { aligned: "srima-tea-kitchen.jpg".to_string() }
/// );
/// assert_eq!(check_alignment("cover.jpg", "tea"), NameAlignment::NoLocation);
/// ```
pub fn check_alignment(file_name: &str, apartment: &str) -> NameAlignment {
    let Some((location, rest)) = split_location(file_name) else {
        return NameAlignment::NoLocation;
    };

    let prefix = canonical_prefix(location, apartment);
    if file_name.starts_with(&prefix) {
        return NameAlignment::Canonical;
    }

    NameAlignment::Drifted {
        aligned: format!("{}{}", prefix, rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_location_basic() {
        assert_eq!(split_location("srima-tea-01.jpg"), Some(("srima", "tea-01.jpg")));
        assert_eq!(split_location("a-b"), Some(("a", "b")));
    }

    #[test]
    fn test_split_location_no_separator() {
        assert_eq!(split_location("cover.jpg"), None);
        assert_eq!(split_location(""), None);
    }

    #[test]
    fn test_split_location_leading_separator() {
        // An empty location token is unusual but allowed.
        assert_eq!(split_location("-tea-01.jpg"), Some(("", "tea-01.jpg")));
    }

    #[test]
    fn test_canonical_prefix() {
        assert_eq!(canonical_prefix("srima", "tea"), "srima-tea-");
        assert_eq!(canonical_prefix("", "tea"), "-tea-");
    }

    #[test]
    fn test_check_alignment_canonical() {
        assert_eq!(check_alignment("srima-tea-01.jpg", "tea"), NameAlignment::Canonical);
    }

    #[test]
    fn test_check_alignment_apartment_with_separator() {
        // Apartment directory names may themselves contain the separator.
        assert_eq!(
            check_alignment("srima-apt-blue-01.jpg", "apt-blue"),
            NameAlignment::Canonical
        );
        assert_eq!(
            check_alignment("srima-kitchen.jpg", "apt-blue"),
            NameAlignment::Drifted {
                aligned: "srima-apt-blue-kitchen.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_check_alignment_prefix_is_case_sensitive() {
        assert_eq!(
            check_alignment("srima-Tea-01.jpg", "tea"),
            NameAlignment::Drifted {
                aligned: "srima-tea-Tea-01.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_check_alignment_keeps_stale_segment_in_rest() {
        // The remainder after the first separator is preserved verbatim,
        // stale apartment segment included.
        assert_eq!(
            check_alignment("split-apt-red-kitchen.json", "apt-blue"),
            NameAlignment::Drifted {
                aligned: "split-apt-blue-apt-red-kitchen.json".to_string()
            }
        );
    }

    #[test]
    fn test_check_alignment_converges() {
        // The aligned name of a drifted file is itself canonical.
        let NameAlignment::Drifted { aligned } = check_alignment("srima-kitchen.jpg", "tea")
        else {
            panic!("expected drift");
        };
        assert_eq!(check_alignment(&aligned, "tea"), NameAlignment::Canonical);
    }

    #[test]
    fn test_check_alignment_no_location() {
        assert_eq!(check_alignment("cover.jpg", "tea"), NameAlignment::NoLocation);
        assert_eq!(check_alignment("manifest.json", "tea"), NameAlignment::NoLocation);
    }

    #[test]
    fn test_check_alignment_trailing_separator_only() {
        assert_eq!(
            check_alignment("srima-", "tea"),
            NameAlignment::Drifted {
                aligned: "srima-tea-".to_string()
            }
        );
    }

    #[test]
    fn test_check_alignment_unicode_names() {
        assert_eq!(
            check_alignment("řeka-pokoj.jpg", "Petřín"),
            NameAlignment::Drifted {
                aligned: "řeka-Petřín-pokoj.jpg".to_string()
            }
        );
    }
}
