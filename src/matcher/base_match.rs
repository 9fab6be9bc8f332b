//! `BaseMatch`: a tagged sum
//! type carrying the fields shared by every candidate match, with
//! variant-specific payload held inline rather than via a back-pointer.

use std::cmp::Ordering;

use indexmap::IndexSet;

use crate::catalog::NamedAllele;
use crate::sequence::Sequence;

/// Marker prefix for off-reference partial names, used by the
/// comparator to sort them after every other match regardless of score.
pub const OFF_REFERENCE_MARKER: &str = "g.";

#[derive(Debug, Clone)]
pub struct HaplotypeMatch {
    pub allele: NamedAllele,
    pub sequences: IndexSet<Sequence>,
}

#[derive(Debug, Clone)]
pub struct CombinationMatch {
    /// The synthesized, merged `NamedAllele`.
    pub synthesized: NamedAllele,
    /// Components in the order they were incorporated. For an
    /// off-reference partial this is just `[reference]`.
    pub components: Vec<NamedAllele>,
    pub sequences: IndexSet<Sequence>,
    pub is_off_reference: bool,
}

#[derive(Debug, Clone)]
pub enum BaseMatch {
    Haplotype(HaplotypeMatch),
    Combination(CombinationMatch),
}

impl BaseMatch {
    pub fn name(&self) -> &str {
        match self {
            BaseMatch::Haplotype(h) => &h.allele.name,
            BaseMatch::Combination(c) => &c.synthesized.name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BaseMatch::Haplotype(h) => &h.allele.id,
            BaseMatch::Combination(c) => &c.synthesized.id,
        }
    }

    pub fn score(&self) -> i32 {
        match self {
            BaseMatch::Haplotype(h) => h.allele.score,
            BaseMatch::Combination(c) => c.synthesized.score,
        }
    }

    pub fn sequences(&self) -> &IndexSet<Sequence> {
        match self {
            BaseMatch::Haplotype(h) => &h.sequences,
            BaseMatch::Combination(c) => &c.sequences,
        }
    }

    pub fn is_reference(&self) -> bool {
        match self {
            BaseMatch::Haplotype(h) => h.allele.is_reference,
            BaseMatch::Combination(c) => c.synthesized.is_reference,
        }
    }

    pub fn is_off_reference_partial(&self) -> bool {
        match self {
            BaseMatch::Haplotype(_) => false,
            BaseMatch::Combination(c) => c.is_off_reference,
        }
    }

    pub fn allele(&self) -> &NamedAllele {
        match self {
            BaseMatch::Haplotype(h) => &h.allele,
            BaseMatch::Combination(c) => &c.synthesized,
        }
    }
}

/// Lexicographic name comparison with a prefix rule: if one name is a
/// prefix of the other (e.g. a plain allele name next to a combination it
/// participates in), the shorter, more fundamental name sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if b.starts_with(a) {
        return Ordering::Less;
    }
    if a.starts_with(b) {
        return Ordering::Greater;
    }
    a.cmp(b)
}

/// Total order over candidate matches: score desc, then name lex (prefix
/// rule), then reference-earlier, then off-reference-partial last.
pub fn compare_matches(a: &BaseMatch, b: &BaseMatch) -> Ordering {
    b.score()
        .cmp(&a.score())
        .then_with(|| compare_names(a.name(), b.name()))
        .then_with(|| b.is_reference().cmp(&a.is_reference()))
        .then_with(|| {
            a.is_off_reference_partial()
                .cmp(&b.is_off_reference_partial())
        })
}
