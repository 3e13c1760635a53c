//! Position-by-position comparison of two pre-aligned sequences.
//!
//! [`compare`] turns two equal-length sequences into one [`ColumnPair`] per
//! position. The top cell carries the residue color from
//! [`crate::residue`]; the bottom cell is highlighted only where it differs
//! from the top, so agreeing positions recede visually.
//!
//! No case folding happens here: `'A'` and `'a'` are different residues.
//! Uppercasing is the job of [`crate::validate`].

use thiserror::Error;

use crate::residue::{color_of, Rgb};

/// Background of a mismatching bottom cell.
pub const MISMATCH_COLOR: Rgb = Rgb::from_hex(0xe0e0e0);
/// Text color of a mismatching bottom cell.
pub const DARK_TEXT: Rgb = Rgb::from_hex(0x000000);
/// Text color of an agreeing bottom cell.
pub const MUTED_TEXT: Rgb = Rgb::from_hex(0x777777);

/// Errors raised by the comparator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Sequences must have the same length (top: {top}, bottom: {bottom})")]
    LengthMismatch { top: usize, bottom: usize },
}

/// A cell background: either a solid color or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Transparent,
    Solid(Rgb),
}

/// Top row cell: the reference residue on its class color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCell {
    pub residue: char,
    pub color: Rgb,
}

/// Bottom row cell: highlighted when it disagrees with the top residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomCell {
    pub residue: char,
    pub background: Paint,
    pub text: Rgb,
    pub mismatch: bool,
}

/// Render descriptor for one alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub top: TopCell,
    pub bottom: BottomCell,
}

impl ColumnPair {
    fn new(top: char, bottom: char) -> Self {
        let mismatch = top != bottom;
        let (background, text) = if mismatch {
            (Paint::Solid(MISMATCH_COLOR), DARK_TEXT)
        } else {
            (Paint::Transparent, MUTED_TEXT)
        };
        Self {
            top: TopCell {
                residue: top,
                color: color_of(top),
            },
            bottom: BottomCell {
                residue: bottom,
                background,
                text,
                mismatch,
            },
        }
    }

    pub fn is_mismatch(&self) -> bool {
        self.bottom.mismatch
    }
}

/// Compares two sequences position by position.
///
/// Fails with [`CompareError::LengthMismatch`] when the character counts
/// differ; nothing is truncated.
///
/// # Examples
///
/// ```
/// use pairview::compare::compare;
///
/// let columns = compare("ARN", "ARD").unwrap();
/// assert!(!columns[0].is_mismatch());
/// assert!(columns[2].is_mismatch());
/// ```
pub fn compare(top: &str, bottom: &str) -> Result<Vec<ColumnPair>, CompareError> {
    let top_len = top.chars().count();
    let bottom_len = bottom.chars().count();
    if top_len != bottom_len {
        return Err(CompareError::LengthMismatch {
            top: top_len,
            bottom: bottom_len,
        });
    }

    Ok(top
        .chars()
        .zip(bottom.chars())
        .map(|(t, b)| ColumnPair::new(t, b))
        .collect())
}

/// Summary numbers for a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub length: usize,
    pub mismatches: usize,
}

impl Comparison {
    pub fn of(columns: &[ColumnPair]) -> Self {
        Self {
            length: columns.len(),
            mismatches: columns.iter().filter(|c| c.is_mismatch()).count(),
        }
    }

    pub fn matches(&self) -> usize {
        self.length - self.mismatches
    }

    /// Percentage of agreeing positions (0.0 for an empty comparison).
    pub fn identity(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.matches() as f64 * 100.0 / self.length as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::FALLBACK_COLOR;

    fn flags(columns: &[ColumnPair]) -> Vec<bool> {
        columns.iter().map(ColumnPair::is_mismatch).collect()
    }

    #[test]
    fn test_identical_sequences() {
        let columns = compare("ARN", "ARN").unwrap();
        assert_eq!(columns.len(), 3);
        for col in &columns {
            assert!(!col.bottom.mismatch);
            assert_eq!(col.bottom.background, Paint::Transparent);
            assert_eq!(col.bottom.text, MUTED_TEXT);
        }
        assert_eq!(columns[0].top.color, color_of('A'));
    }

    #[test]
    fn test_single_mismatch() {
        let columns = compare("ARN", "ARD").unwrap();
        assert_eq!(flags(&columns), vec![false, false, true]);
        assert_eq!(columns[2].bottom.residue, 'D');
        assert_eq!(columns[2].bottom.background, Paint::Solid(MISMATCH_COLOR));
        assert_eq!(columns[2].bottom.text, DARK_TEXT);
        // Top row keeps its own residue color
        assert_eq!(columns[2].top.residue, 'N');
        assert_eq!(columns[2].top.color, color_of('N'));
    }

    #[test]
    fn test_gap_uses_fallback_color() {
        let columns = compare("A-N", "A-N").unwrap();
        assert_eq!(columns[1].top.residue, '-');
        assert_eq!(columns[1].top.color, FALLBACK_COLOR);
        assert!(!columns[1].is_mismatch());
    }

    #[test]
    fn test_length_mismatch() {
        let result = compare("ARN", "AR");
        assert_eq!(result, Err(CompareError::LengthMismatch { top: 3, bottom: 2 }));
        assert!(compare("", "A").is_err());
    }

    #[test]
    fn test_no_case_folding() {
        let columns = compare("A", "a").unwrap();
        assert!(columns[0].is_mismatch());
        // Lowercase top falls back rather than crashing
        let columns = compare("a", "a").unwrap();
        assert_eq!(columns[0].top.color, FALLBACK_COLOR);
        assert!(!columns[0].is_mismatch());
    }

    #[test]
    fn test_mismatch_flags_follow_inequality() {
        let pairs = [
            ("ACDEFGHIKL", "ACDEFGHIKL"),
            ("ACDEFGHIKL", "LKIHGFEDCA"),
            ("----------", "MNPQRSTVWY"),
            ("W-W-W", "-W-W-"),
        ];
        for (a, b) in pairs {
            let columns = compare(a, b).unwrap();
            assert_eq!(columns.len(), a.len());
            for (i, (x, y)) in a.chars().zip(b.chars()).enumerate() {
                assert_eq!(columns[i].is_mismatch(), x != y, "{a} / {b} at {i}");
                assert_eq!(columns[i].top.residue, x);
                assert_eq!(columns[i].bottom.residue, y);
            }
        }
    }

    #[test]
    fn test_compare_is_idempotent() {
        let first = compare("MKV-LA", "MRV-LS").unwrap();
        let second = compare("MKV-LA", "MRV-LS").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Two chars vs two chars, even though byte lengths differ
        let columns = compare("Aé", "AA").unwrap();
        assert_eq!(columns.len(), 2);
        assert!(columns[1].is_mismatch());
    }

    #[test]
    fn test_comparison_summary() {
        let columns = compare("ARNDC", "ARNEE").unwrap();
        let summary = Comparison::of(&columns);
        assert_eq!(summary.length, 5);
        assert_eq!(summary.mismatches, 2);
        assert_eq!(summary.matches(), 3);
        assert!((summary.identity() - 60.0).abs() < 1e-9);
        assert_eq!(Comparison::of(&[]).identity(), 0.0);
    }
}
