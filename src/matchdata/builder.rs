//! Match Data Builder: restricts a gene's catalog to the
//! positions a sample actually covers, expands ambiguity/heterozygosity
//! into permutations, and packages the result as [`MatchData`].

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::catalog::named_allele::cartesian_sequences;
use crate::catalog::{GeneDefinition, NamedAllele, VariantLocus};
use crate::errors::MatcherError;
use crate::matchdata::position::PositionGenotype;
use crate::sequence::{Sequence, WILDCARD};
use crate::variant::SampleAllele;
use crate::warning::Warning;

#[derive(Debug, Clone)]
pub struct MatchData {
    pub gene: String,
    /// Catalog positions the sample asserted, in original catalog order.
    pub kept_loci: Vec<VariantLocus>,
    /// Each kept locus's index in the gene's full locus vector.
    pub kept_indices: Vec<usize>,
    pub genotypes: Vec<PositionGenotype>,
    pub sample_alleles: Vec<SampleAllele>,
    pub named_alleles: Vec<NamedAllele>,
    pub permutations: IndexSet<Sequence>,
    pub effective_phased: bool,
    pub warnings: Vec<Warning>,
}

impl MatchData {
    pub fn kept_position_count(&self) -> usize {
        self.kept_loci.len()
    }
}

/// Returns `Some(product)` of domain sizes, or `None` on overflow (treated
/// the same as "exceeds the cap").
fn checked_product_size(domains: &[Vec<String>]) -> Option<usize> {
    domains
        .iter()
        .try_fold(1usize, |acc, domain| acc.checked_mul(domain.len().max(1)))
}

fn domain_for(genotype: &PositionGenotype, side: Side) -> Vec<String> {
    if genotype.missing {
        return vec![WILDCARD.to_string()];
    }
    match side {
        Side::Left => genotype.left_literals.iter().cloned().collect(),
        Side::Right => genotype.right_literals.iter().cloned().collect(),
        Side::Unordered => genotype.unordered_domain(),
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
    Unordered,
}

pub fn build_match_data(
    gene: &GeneDefinition,
    sample: &HashMap<(String, u32), SampleAllele>,
    max_permutations: usize,
) -> Result<MatchData, MatcherError> {
    let mut kept_loci = Vec::new();
    let mut kept_indices = Vec::new();
    let mut sample_alleles = Vec::new();
    let mut warnings = Vec::new();

    for (i, locus) in gene.loci.iter().enumerate() {
        match sample.get(&locus.key()) {
            Some(sa) => {
                kept_loci.push(locus.clone());
                kept_indices.push(i);
                sample_alleles.push(sa.clone());
            }
            None => {
                warnings.push(Warning::position_missing(&locus.chromosome, locus.position));
            }
        }
    }

    if kept_loci.is_empty() {
        return Err(MatcherError::NoCoverage);
    }

    let genotypes: Vec<PositionGenotype> = sample_alleles
        .iter()
        .map(PositionGenotype::from_sample_allele)
        .collect();

    for (locus, sa) in kept_loci.iter().zip(sample_alleles.iter()) {
        let pg = PositionGenotype::from_sample_allele(sa);
        if pg.has_ambiguity_code(sa) {
            warnings.push(Warning::ambiguity_expanded(&locus.chromosome, locus.position));
        }
    }

    let any_het = genotypes.iter().any(|g| !g.missing && !g.homozygous);
    // "Effectively phased": a
    // sample with no heterozygous kept position carries no phase
    // ambiguity at all, so it is always treated as phased.
    let effective_phased = if any_het {
        genotypes
            .iter()
            .filter(|g| !g.missing && !g.homozygous)
            .all(|g| g.phased)
    } else {
        true
    };

    let permutations = build_permutations(&genotypes, effective_phased, max_permutations)?;

    let named_alleles = gene
        .named_alleles
        .iter()
        .map(|a| a.restrict_to(&kept_indices))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MatchData {
        gene: gene.gene.clone(),
        kept_loci,
        kept_indices,
        genotypes,
        sample_alleles,
        named_alleles,
        permutations,
        effective_phased,
        warnings,
    })
}

fn build_permutations(
    genotypes: &[PositionGenotype],
    phased: bool,
    cap: usize,
) -> Result<IndexSet<Sequence>, MatcherError> {
    if phased {
        let left_domains: Vec<Vec<String>> =
            genotypes.iter().map(|g| domain_for(g, Side::Left)).collect();
        let right_domains: Vec<Vec<String>> =
            genotypes.iter().map(|g| domain_for(g, Side::Right)).collect();

        let total = checked_product_size(&left_domains)
            .zip(checked_product_size(&right_domains))
            .and_then(|(l, r)| l.checked_add(r));
        match total {
            Some(n) if n <= cap => {}
            Some(n) => return Err(MatcherError::ExcessivePermutations { found: n, cap }),
            None => {
                return Err(MatcherError::ExcessivePermutations {
                    found: usize::MAX,
                    cap,
                })
            }
        }

        let mut merged = cartesian_sequences(&left_domains);
        for seq in cartesian_sequences(&right_domains) {
            merged.insert(seq);
        }
        Ok(merged)
    } else {
        let domains: Vec<Vec<String>> = genotypes
            .iter()
            .map(|g| domain_for(g, Side::Unordered))
            .collect();
        match checked_product_size(&domains) {
            Some(n) if n <= cap => Ok(cartesian_sequences(&domains)),
            Some(n) => Err(MatcherError::ExcessivePermutations { found: n, cap }),
            None => Err(MatcherError::ExcessivePermutations {
                found: usize::MAX,
                cap,
            }),
        }
    }
}
