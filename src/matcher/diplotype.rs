//! `Diplotype`: a ranked pair of matches explaining both chromosomes at a
//! gene.

use std::cmp::Ordering;

use crate::matcher::base_match::{compare_matches, BaseMatch};

#[derive(Debug, Clone)]
pub struct Diplotype {
    pub left: BaseMatch,
    pub right: BaseMatch,
    pub score: i32,
    /// True for a phased sample, where `left`/`right` carry
    /// chromosome-of-origin meaning and must not be swapped for display or
    /// deduplication.
    pub ordered: bool,
}

impl Diplotype {
    pub fn ordered(left: BaseMatch, right: BaseMatch) -> Self {
        let score = left.score() + right.score();
        Diplotype {
            left,
            right,
            score,
            ordered: true,
        }
    }

    /// Builds an unordered diplotype, canonicalizing side order via
    /// [`compare_matches`] so `(A, B)` and `(B, A)` collapse to the same
    /// representation for dedup purposes.
    pub fn unordered(a: BaseMatch, b: BaseMatch) -> Self {
        let score = a.score() + b.score();
        let (left, right) = if compare_matches(&a, &b) != Ordering::Greater {
            (a, b)
        } else {
            (b, a)
        };
        Diplotype {
            left,
            right,
            score,
            ordered: false,
        }
    }

    pub fn dedup_key(&self) -> (String, String) {
        (self.left.id().to_string(), self.right.id().to_string())
    }
}

/// Total order used to rank the diplotype list: score desc, then the
/// ordered-pair name comparison (itself carrying the name-lex,
/// reference-earlier, and off-reference-last rules).
pub fn compare_diplotypes(a: &Diplotype, b: &Diplotype) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| compare_matches(&a.left, &b.left))
        .then_with(|| compare_matches(&a.right, &b.right))
}
