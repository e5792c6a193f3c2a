//! Canonical slug derivation for display names.
//!
//! Every generated document keys or cross-references records by slug, so the
//! transform must be deterministic and identical across all generators:
//! NFKD-decompose, drop combining marks, lowercase, collapse any run of
//! non-alphanumeric characters into a single hyphen, trim edge hyphens.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a URL-safe slug from a display name.
///
/// `None` yields the empty string, matching rows whose name column is null.
///
/// # Examples
///
/// ```
/// use romdoc_core::slug::slugify;
///
/// assert_eq!(slugify(Some("Illusion of Gaia")), "illusion-of-gaia");
/// assert_eq!(slugify(Some("  multi   space ")), "multi-space");
/// assert_eq!(slugify(None), "");
/// ```
pub fn slugify(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let mut out = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.nfkd().filter(|c| !is_combining_mark(*c)) {
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(lower);
            } else {
                pending_hyphen = true;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_name() {
        assert_eq!(slugify(Some("Illusion of Gaia")), "illusion-of-gaia");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify(Some("  multi   space ")), "multi-space");
    }

    #[test]
    fn none_is_empty() {
        assert_eq!(slugify(None), "");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(slugify(Some("Pokémon Édition")), "pokemon-edition");
    }

    #[test]
    fn punctuation_becomes_single_hyphen() {
        assert_eq!(slugify(Some("Mother 3 (Japan)!")), "mother-3-japan");
        assert_eq!(slugify(Some("A--B__C")), "a-b-c");
    }

    #[test]
    fn deterministic() {
        let name = Some("Sōken no Gaia");
        assert_eq!(slugify(name), slugify(name));
    }

    #[test]
    fn all_punctuation_is_empty() {
        assert_eq!(slugify(Some("---")), "");
        assert_eq!(slugify(Some("!?")), "");
    }
}
