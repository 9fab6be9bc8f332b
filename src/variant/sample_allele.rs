//! `SampleAllele`: a sample's observed genotype at a single catalog
//! position.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAllele {
    pub chromosome: String,
    pub position: u32,
    /// Two observed allele strings. Unordered for unphased calls (index 0
    /// and 1 carry no chromosome-of-origin meaning); ordered for phased
    /// calls (index 0 is haplotype 1, index 1 is haplotype 2).
    pub alleles: [String; 2],
    pub phased: bool,
    pub is_missing: bool,
}

impl SampleAllele {
    pub fn called(
        chromosome: impl Into<String>,
        position: u32,
        allele1: impl Into<String>,
        allele2: impl Into<String>,
        phased: bool,
    ) -> Self {
        SampleAllele {
            chromosome: chromosome.into(),
            position,
            alleles: [allele1.into(), allele2.into()],
            phased,
            is_missing: false,
        }
    }

    pub fn missing(chromosome: impl Into<String>, position: u32) -> Self {
        SampleAllele {
            chromosome: chromosome.into(),
            position,
            alleles: [String::new(), String::new()],
            phased: false,
            is_missing: true,
        }
    }

    pub fn is_homozygous(&self) -> bool {
        !self.is_missing && self.alleles[0] == self.alleles[1]
    }

    pub fn is_heterozygous(&self) -> bool {
        !self.is_missing && self.alleles[0] != self.alleles[1]
    }

    pub fn key(&self) -> (String, u32) {
        (self.chromosome.clone(), self.position)
    }
}
