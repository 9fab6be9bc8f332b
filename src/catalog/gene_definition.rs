//! `GeneDefinition`: a gene symbol, its ordered `VariantLocus` vector, and
//! the `NamedAllele`s defined against it. Loading this from a catalog's
//! authored JSON form is out of scope; callers construct
//! a `GeneDefinition` directly (or via [`GeneDefinitionBuilder`]) and then
//! ask the Definition Model to initialize it.

use crate::catalog::locus::VariantLocus;
use crate::catalog::named_allele::NamedAllele;
use crate::errors::MatcherError;

#[derive(Debug, Clone)]
pub struct GeneDefinition {
    pub gene: String,
    pub loci: Vec<VariantLocus>,
    pub named_alleles: Vec<NamedAllele>,
}

impl GeneDefinition {
    pub fn new(gene: impl Into<String>, loci: Vec<VariantLocus>, named_alleles: Vec<NamedAllele>) -> Self {
        GeneDefinition {
            gene: gene.into(),
            loci,
            named_alleles,
        }
    }

    /// Initializes every named allele against this gene's locus vector.
    /// Fatal for the whole run if any allele's shape is inconsistent with
    /// the catalog (`MalformedCatalog`).
    pub fn initialize(&mut self) -> Result<(), MatcherError> {
        if self.named_alleles.iter().filter(|a| a.is_reference).count() != 1 {
            return Err(MatcherError::MalformedCatalog(format!(
                "gene '{}' must designate exactly one reference named allele",
                self.gene
            )));
        }
        let locus_count = self.loci.len();
        for allele in &mut self.named_alleles {
            allele.initialize(locus_count, None)?;
        }
        Ok(())
    }
}

/// A read-only collection of gene definitions, shared across gene tasks.
#[derive(Debug, Clone, Default)]
pub struct DefinitionModel {
    pub genes: Vec<GeneDefinition>,
}

impl DefinitionModel {
    pub fn new(genes: Vec<GeneDefinition>) -> Self {
        DefinitionModel { genes }
    }

    /// Initializes every gene's named alleles. A single malformed gene aborts
    /// the whole run rather than being skipped, since a catalog load error
    /// means the run has no trustworthy basis for matching any gene.
    pub fn initialize(&mut self) -> Result<(), MatcherError> {
        for gene in &mut self.genes {
            gene.initialize()?;
        }
        Ok(())
    }

    pub fn gene(&self, symbol: &str) -> Option<&GeneDefinition> {
        self.genes.iter().find(|g| g.gene == symbol)
    }
}

/// Builder used by tests and the demo CLI to assemble a `GeneDefinition`
/// without a catalog file parser.
#[derive(Debug, Default)]
pub struct GeneDefinitionBuilder {
    gene: String,
    loci: Vec<VariantLocus>,
    named_alleles: Vec<NamedAllele>,
}

impl GeneDefinitionBuilder {
    pub fn new(gene: impl Into<String>) -> Self {
        GeneDefinitionBuilder {
            gene: gene.into(),
            loci: Vec::new(),
            named_alleles: Vec::new(),
        }
    }

    pub fn locus(mut self, locus: VariantLocus) -> Self {
        self.loci.push(locus);
        self
    }

    pub fn named_allele(mut self, allele: NamedAllele) -> Self {
        self.named_alleles.push(allele);
        self
    }

    pub fn build(self) -> GeneDefinition {
        GeneDefinition::new(self.gene, self.loci, self.named_alleles)
    }
}
