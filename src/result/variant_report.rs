//! Per-position `VariantReport`: records
//! what was actually observed at a kept catalog position, independent of
//! which diplotype ultimately explains it.

use crate::catalog::VariantLocus;
use crate::iupac;
use crate::variant::SampleAllele;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub chromosome: String,
    pub position: u32,
    pub rsid: String,
    /// The two observed allele strings, `|`-joined if phased else `/`-joined;
    /// empty if the call is missing.
    pub call: String,
    pub missing: bool,
    pub heterozygous: bool,
    /// True if an observed allele string is not one of the catalog's
    /// declared reference/alternate literals (after IUPAC expansion) — a
    /// novel call the catalog did not anticipate at this position.
    pub mismatch: bool,
}

impl VariantReport {
    pub fn build(locus: &VariantLocus, sample: &SampleAllele) -> Self {
        if sample.is_missing {
            return VariantReport {
                chromosome: locus.chromosome.clone(),
                position: locus.position,
                rsid: locus.rsid.clone(),
                call: String::new(),
                missing: true,
                heterozygous: false,
                mismatch: false,
            };
        }

        let mut known = iupac::expand(&locus.reference_allele);
        for alt in &locus.alternate_alleles {
            known.extend(iupac::expand(alt));
        }
        let mismatch = [0usize, 1]
            .iter()
            .any(|&i| !iupac::expand(&sample.alleles[i]).is_subset(&known));

        let sep = if sample.phased { "|" } else { "/" };
        VariantReport {
            chromosome: locus.chromosome.clone(),
            position: locus.position,
            rsid: locus.rsid.clone(),
            call: format!("{}{}{}", sample.alleles[0], sep, sample.alleles[1]),
            missing: false,
            heterozygous: sample.is_heterozygous(),
            mismatch,
        }
    }
}
