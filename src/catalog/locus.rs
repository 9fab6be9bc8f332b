//! `VariantLocus`: one catalog-defined genomic position relevant to a gene.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantLocus {
    pub chromosome: String,
    /// 1-based position, matching VCF convention.
    pub position: u32,
    pub reference_allele: String,
    pub alternate_alleles: Vec<String>,
    /// External identifier, usually an rsID; empty string if unknown.
    pub rsid: String,
}

impl VariantLocus {
    pub fn new(
        chromosome: impl Into<String>,
        position: u32,
        reference_allele: impl Into<String>,
        alternate_alleles: Vec<String>,
        rsid: impl Into<String>,
    ) -> Self {
        VariantLocus {
            chromosome: chromosome.into(),
            position,
            reference_allele: reference_allele.into(),
            alternate_alleles,
            rsid: rsid.into(),
        }
    }

    pub fn key(&self) -> (String, u32) {
        (self.chromosome.clone(), self.position)
    }
}
