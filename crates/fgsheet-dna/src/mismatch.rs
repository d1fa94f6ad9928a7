//! Mismatch counting between padded index sequences.
//!
//! Padded indexes carry the [`NO_CALL_BASE`] sentinel at positions past the end of
//! the original index. A no-call is a wildcard: it never contributes a mismatch,
//! whatever the other sequence holds at that position.

use crate::NO_CALL_BASE;

/// True if `base` is the no-call sentinel.
#[inline]
#[must_use]
pub const fn is_no_call(base: u8) -> bool {
    base == NO_CALL_BASE
}

/// Counts the positions at which `a` and `b` differ, ignoring no-calls.
///
/// Sequences are expected to be padded to the same length. If they are not, the
/// positions past the end of the shorter one are treated as no-calls.
///
/// # Examples
///
/// ```
/// use fgsheet_dna::count_mismatches;
///
/// assert_eq!(count_mismatches(b"ACGT", b"ACTT"), 1);
/// assert_eq!(count_mismatches(b"ACGN", b"ACTA"), 1);
/// assert_eq!(count_mismatches(b"NNNN", b"ACGT"), 0);
/// ```
#[must_use]
pub fn count_mismatches(a: &[u8], b: &[u8]) -> u32 {
    let mut mismatches = 0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x != y && !is_no_call(x) && !is_no_call(y) {
            mismatches += 1;
        }
    }
    mismatches
}
