//! Hex address rendering for ROM file and block layouts.
//!
//! Offsets arrive as loosely-typed JSON numbers (or strings, or nothing at
//! all); anything that isn't a finite number degrades to `None` rather than
//! `0` so the renderer can show "unknown" instead of a bogus address.

/// Render a byte offset as an uppercase `0x`-prefixed hex string.
///
/// Non-finite or absent values yield `None`.
pub fn to_hex(value: Option<f64>) -> Option<String> {
    match value {
        Some(v) if v.is_finite() => Some(format!("0x{:X}", v as i64)),
        _ => None,
    }
}

/// Start/end offsets for a file entry: `start = location`,
/// `end = location + max(0, size - 1)`.
///
/// A missing size still yields a start; a missing location yields neither.
pub fn file_range(location: Option<f64>, size: Option<f64>) -> (Option<f64>, Option<f64>) {
    let start = location.filter(|v| v.is_finite());
    let end = match (start, size.filter(|v| v.is_finite())) {
        (Some(loc), Some(sz)) => Some(loc + (sz - 1.0).max(0.0)),
        _ => None,
    };
    (start, end)
}

/// Fold the address range covered by a block's parts: minimum start offset
/// and maximum end offset across all parts with finite numbers.
///
/// Parts with no finite location are skipped; a block with none yields
/// `(None, None)`.
pub fn block_range<I>(parts: I) -> (Option<f64>, Option<f64>)
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let mut min_start: Option<f64> = None;
    let mut max_end: Option<f64> = None;

    for (location, size) in parts {
        let (start, end) = file_range(location, size);
        if let Some(s) = start {
            min_start = Some(min_start.map_or(s, |m: f64| m.min(s)));
        }
        if let Some(e) = end {
            max_end = Some(max_end.map_or(e, |m: f64| m.max(e)));
        }
    }

    (min_start, max_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_unpadded() {
        assert_eq!(to_hex(Some(100.0)).as_deref(), Some("0x64"));
        assert_eq!(to_hex(Some(10.0)).as_deref(), Some("0xA"));
        assert_eq!(to_hex(Some(0.0)).as_deref(), Some("0x0"));
    }

    #[test]
    fn hex_rejects_non_finite() {
        assert_eq!(to_hex(None), None);
        assert_eq!(to_hex(Some(f64::NAN)), None);
        assert_eq!(to_hex(Some(f64::INFINITY)), None);
    }

    #[test]
    fn file_range_inclusive_end() {
        let (start, end) = file_range(Some(100.0), Some(16.0));
        assert_eq!(to_hex(start).as_deref(), Some("0x64"));
        assert_eq!(to_hex(end).as_deref(), Some("0x73"));
    }

    #[test]
    fn file_range_missing_size_keeps_start() {
        let (start, end) = file_range(Some(100.0), None);
        assert_eq!(to_hex(start).as_deref(), Some("0x64"));
        assert_eq!(end, None);
    }

    #[test]
    fn file_range_zero_size_clamps() {
        let (start, end) = file_range(Some(8.0), Some(0.0));
        assert_eq!(start, Some(8.0));
        assert_eq!(end, Some(8.0));
    }

    #[test]
    fn block_range_folds_min_and_max() {
        let (start, end) = block_range([
            (Some(10.0), Some(5.0)),
            (Some(50.0), Some(10.0)),
        ]);
        assert_eq!(to_hex(start).as_deref(), Some("0xA"));
        assert_eq!(to_hex(end).as_deref(), Some("0x3B"));
    }

    #[test]
    fn block_range_empty_is_none() {
        let (start, end) = block_range(std::iter::empty::<(Option<f64>, Option<f64>)>());
        assert_eq!(start, None);
        assert_eq!(end, None);
    }

    #[test]
    fn block_range_skips_partless_entries() {
        let (start, end) = block_range([(None, Some(4.0)), (Some(32.0), None)]);
        assert_eq!(start, Some(32.0));
        assert_eq!(end, None);
    }
}
