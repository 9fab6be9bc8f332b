//! Per-position genotype, expanded and ready for permutation.

use std::collections::BTreeSet;

use crate::iupac;
use crate::sequence::WILDCARD;
use crate::variant::SampleAllele;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGenotype {
    pub missing: bool,
    pub homozygous: bool,
    pub phased: bool,
    /// Literal alternatives on the "left" side: haplotype 1 if phased,
    /// otherwise just one of the two unordered observed alleles.
    pub left_literals: BTreeSet<String>,
    pub right_literals: BTreeSet<String>,
}

impl PositionGenotype {
    pub fn from_sample_allele(sample: &SampleAllele) -> Self {
        if sample.is_missing {
            let wildcard = BTreeSet::from([WILDCARD.to_string()]);
            return PositionGenotype {
                missing: true,
                homozygous: false,
                phased: false,
                left_literals: wildcard.clone(),
                right_literals: wildcard,
            };
        }
        let left = iupac::expand(&sample.alleles[0]);
        let right = iupac::expand(&sample.alleles[1]);
        PositionGenotype {
            missing: false,
            homozygous: sample.is_homozygous(),
            phased: sample.phased,
            left_literals: left,
            right_literals: right,
        }
    }

    /// The domain of literals a single haploid sequence may draw from at
    /// this position when phase is unknown (union of both sides).
    pub fn unordered_domain(&self) -> Vec<String> {
        self.left_literals
            .union(&self.right_literals)
            .cloned()
            .collect()
    }

    pub fn has_ambiguity_code(&self, sample: &SampleAllele) -> bool {
        !sample.is_missing
            && (iupac::is_ambiguous(&sample.alleles[0]) || iupac::is_ambiguous(&sample.alleles[1]))
    }
}
