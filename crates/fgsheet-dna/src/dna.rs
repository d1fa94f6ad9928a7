//! Complement and reverse complement of index sequences.

use crate::CANONICAL_BASES;

/// Returns the Watson-Crick complement of a base (A<->T, C<->G).
///
/// Lowercase input is normalized to uppercase. Anything that is not one of the
/// four canonical bases is returned unchanged, so a malformed index keeps its
/// offending characters and is still reported by format checks downstream.
#[inline]
#[must_use]
pub const fn complement_base(base: u8) -> u8 {
    match base {
        b'A' | b'a' => b'T',
        b'T' | b't' => b'A',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        _ => base,
    }
}

/// True if `base` is one of `A`, `C`, `G` or `T` (uppercase only).
#[inline]
#[must_use]
pub fn is_canonical_base(base: u8) -> bool {
    CANONICAL_BASES.contains(&base)
}

/// Reverse complements an index sequence.
///
/// # Examples
///
/// ```
/// use fgsheet_dna::reverse_complement;
///
/// assert_eq!(reverse_complement("AACCGGTA"), "TACCGGTT");
/// assert_eq!(reverse_complement(""), "");
/// ```
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes().rev().map(|b| char::from(complement_base(b))).collect()
}
