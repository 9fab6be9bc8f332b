//! A permuted haploid sequence: one literal (or wildcard) token per kept
//! position, in locus order. Kept as a `Vec<String>` rather than a
//! concatenated `String` so that multi-base indel tokens never collide with
//! adjacent single-base tokens under concatenation.

use std::fmt;

/// Sentinel token standing in for a position the sample did not call, or
/// that a named allele leaves unspecified. Matches anything during
/// comparison (see [`Sequence::compatible_at`]).
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(pub Vec<String>);

impl Sequence {
    pub fn new(tokens: Vec<String>) -> Self {
        Sequence(tokens)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two tokens at the same position are compatible if either is a
    /// wildcard or they are literally equal.
    pub fn compatible_at(&self, index: usize, other: &str) -> bool {
        let mine = &self.0[index];
        mine == WILDCARD || other == WILDCARD || mine == other
    }

    /// Position-wise compatibility against another fully-wildcard-aware
    /// sequence of the same length.
    pub fn compatible_with(&self, other: &Sequence) -> bool {
        self.0.len() == other.0.len()
            && (0..self.0.len()).all(|i| self.compatible_at(i, &other.0[i]))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(""))
    }
}
