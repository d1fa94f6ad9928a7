#![deny(unsafe_code)]

//! DNA index utilities for sample sheet validation.
//!
//! This crate provides the leaf operations used when comparing sample indexes:
//! - Complement and reverse-complement of index sequences
//! - The no-call sentinel used to pad short indexes
//! - Mismatch counting that treats no-calls as wildcards

pub mod dna;
pub mod mismatch;

// Re-export submodule contents at crate root for convenience
pub use dna::{complement_base, is_canonical_base, reverse_complement};
pub use mismatch::{count_mismatches, is_no_call};

/// No-call sentinel used to pad index positions beyond the end of a short index.
pub const NO_CALL_BASE: u8 = b'N';

/// The four canonical nucleotides, in the order used by per-base tallies.
pub const CANONICAL_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
