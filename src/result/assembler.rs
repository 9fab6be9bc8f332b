//! Result Assembler: runs every gene through the matching
//! pipeline and folds the outcome into a `GeneResult`, independently and in
//! parallel, while keeping the emitted order
//! equal to the caller-supplied gene order rather than completion order.

use std::collections::HashMap;

use log::{debug, warn};
use rayon::prelude::*;

use crate::catalog::{DefinitionModel, GeneDefinition};
use crate::combination::synthesize_combinations;
use crate::config::MatcherConfig;
use crate::errors::MatcherError;
use crate::matchdata::build_match_data;
use crate::matcher::{enumerate_diplotypes, find_haplotype_matches, rank_and_filter, BaseMatch};
use crate::result::variant_report::VariantReport;
use crate::variant::SampleAllele;
use crate::warning::Warning;

/// Top-level output of one matcher invocation across every gene the caller
/// asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub genes: Vec<GeneResult>,
}

impl RunReport {
    pub fn new(genes: Vec<GeneResult>) -> Self {
        RunReport { genes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiplotypeRecord {
    pub left: String,
    pub right: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneResult {
    pub gene: String,
    /// True iff at least one diplotype was emitted.
    pub called: bool,
    pub phased: bool,
    pub diplotypes: Vec<DiplotypeRecord>,
    pub variants: Vec<VariantReport>,
    pub warnings: Vec<Warning>,
    /// Set when the gene failed outright; gene-local failures are captured
    /// here rather than aborting the run.
    pub error: Option<MatcherError>,
}

impl GeneResult {
    fn failed(gene: &str, error: MatcherError) -> Self {
        GeneResult {
            gene: gene.to_string(),
            called: false,
            phased: false,
            diplotypes: Vec::new(),
            variants: Vec::new(),
            warnings: Vec::new(),
            error: Some(error),
        }
    }
}

/// Runs the full per-gene state machine (Init -> Restricted -> Permuted ->
/// Matched -> (Straight | Combining) -> Ranked -> Emitted) for one gene.
fn process_gene(
    gene: &GeneDefinition,
    sample: &HashMap<(String, u32), SampleAllele>,
    config: &MatcherConfig,
) -> GeneResult {
    debug!("{}: Init -> Restricted", gene.gene);
    let match_data = match build_match_data(gene, sample, config.max_permutations) {
        Ok(md) => md,
        Err(err) => {
            warn!("{}: restriction failed: {err}", gene.gene);
            return GeneResult::failed(&gene.gene, err);
        }
    };
    debug!(
        "{}: Restricted -> Permuted ({} positions, {} permutations, phased={})",
        gene.gene,
        match_data.kept_position_count(),
        match_data.permutations.len(),
        match_data.effective_phased
    );

    if config.require_phased && !match_data.effective_phased {
        let err = MatcherError::MalformedVariant(format!(
            "gene '{}' requires phased input but the sample carries unresolved heterozygous positions",
            gene.gene
        ));
        warn!("{}: {err}", gene.gene);
        return GeneResult::failed(&gene.gene, err);
    }

    let mut warnings = match_data.warnings.clone();
    for w in &warnings {
        warn!("{}: {:?} — {}", gene.gene, w.code, w.detail);
    }

    let haplotype_matches = find_haplotype_matches(&match_data);
    debug!(
        "{}: Permuted -> Matched ({} haplotype matches)",
        gene.gene,
        haplotype_matches.len()
    );

    // Combinations are evaluated whenever enabled, not merely as a fallback
    // for an empty straight list: a synthesized combination can outscore
    // every pure haplotype pairing (e.g. two in-cis partial markers beat
    // either marker paired alone with the reference), so straight and
    // combined candidates are ranked together and the comparator picks the
    // winner.
    let diplotypes = if config.enable_combinations {
        debug!("{}: Matched -> Combining", gene.gene);
        let pool = match synthesize_combinations(&match_data, &haplotype_matches) {
            Ok(pool) => pool,
            Err(err) => {
                warn!("{}: combination synthesis failed: {err}", gene.gene);
                return GeneResult::failed(&gene.gene, err);
            }
        };
        enumerate_diplotypes(&pool, &match_data)
    } else {
        debug!("{}: Matched -> Straight", gene.gene);
        let straight_pool: Vec<BaseMatch> = haplotype_matches
            .iter()
            .cloned()
            .map(BaseMatch::Haplotype)
            .collect();
        enumerate_diplotypes(&straight_pool, &match_data)
    };

    let ranked = rank_and_filter(diplotypes, config.output_mode);
    debug!("{}: -> Ranked -> Emitted ({} diplotypes)", gene.gene, ranked.len());
    let called = !ranked.is_empty();

    if config.enable_combinations
        && ranked.iter().any(|d| {
            !matches!(&d.left, BaseMatch::Haplotype(_)) || !matches!(&d.right, BaseMatch::Haplotype(_))
        })
    {
        let w = Warning::no_straight_match();
        warn!("{}: {}", gene.gene, w.detail);
        warnings.push(w);
    }

    let variants = match_data
        .kept_loci
        .iter()
        .zip(match_data.sample_alleles.iter())
        .map(|(locus, sample)| VariantReport::build(locus, sample))
        .collect();

    GeneResult {
        gene: gene.gene.clone(),
        called,
        phased: match_data.effective_phased,
        diplotypes: ranked
            .into_iter()
            .map(|d| DiplotypeRecord {
                left: d.left.name().to_string(),
                right: d.right.name().to_string(),
                score: d.score,
            })
            .collect(),
        variants,
        warnings,
        error: None,
    }
}

/// Runs every gene in `definition_model` against its sample data. Genes run
/// concurrently via `rayon`, but the returned vector preserves
/// `definition_model.genes`' original order regardless of which gene
/// finished first.
pub fn run_all_genes(
    definition_model: &DefinitionModel,
    samples_by_gene: &HashMap<String, HashMap<(String, u32), SampleAllele>>,
    config: &MatcherConfig,
) -> Vec<GeneResult> {
    definition_model
        .genes
        .par_iter()
        .map(|gene| match samples_by_gene.get(&gene.gene) {
            Some(sample) => process_gene(gene, sample, config),
            None => GeneResult::failed(&gene.gene, MatcherError::NoCoverage),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlleleCode, GeneDefinitionBuilder, NamedAllele, VariantLocus};

    fn two_gene_model() -> DefinitionModel {
        let mut cyp = GeneDefinitionBuilder::new("CYP2C19")
            .locus(VariantLocus::new("chr10", 100, "A", vec!["G".into()], "rs1"))
            .named_allele(NamedAllele::new(
                "CYP2C19*1",
                "*1",
                vec![AlleleCode::literal("A")],
                true,
            ))
            .named_allele(NamedAllele::new(
                "CYP2C19*2",
                "*2",
                vec![AlleleCode::literal("G")],
                false,
            ))
            .build();
        let mut tpmt = GeneDefinitionBuilder::new("TPMT")
            .locus(VariantLocus::new("chr6", 500, "C", vec!["T".into()], "rs2"))
            .named_allele(NamedAllele::new("TPMT*1", "*1", vec![AlleleCode::literal("C")], true))
            .build();
        cyp.initialize().unwrap();
        tpmt.initialize().unwrap();
        DefinitionModel::new(vec![cyp, tpmt])
    }

    #[test]
    fn preserves_gene_order_and_skips_uncovered_genes() {
        let model = two_gene_model();
        let mut samples = HashMap::new();
        let mut cyp_sample = HashMap::new();
        cyp_sample.insert(
            ("chr10".to_string(), 100),
            SampleAllele::called("chr10", 100, "A", "A", false),
        );
        samples.insert("CYP2C19".to_string(), cyp_sample);
        // TPMT has no sample data at all.

        let results = run_all_genes(&model, &samples, &MatcherConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].gene, "CYP2C19");
        assert!(results[0].called);
        assert_eq!(results[1].gene, "TPMT");
        assert!(!results[1].called);
        assert!(matches!(results[1].error, Some(MatcherError::NoCoverage)));
    }

    #[test]
    fn off_reference_partial_falls_back_to_combinations() {
        let mut gene = GeneDefinitionBuilder::new("TPMT")
            .locus(VariantLocus::new("chr6", 500, "C", vec!["T".into()], "rs2"))
            .named_allele(NamedAllele::new("TPMT*1", "*1", vec![AlleleCode::literal("C")], true))
            .build();
        gene.initialize().unwrap();
        let model = DefinitionModel::new(vec![gene]);

        let mut sample = HashMap::new();
        sample.insert(
            ("chr6".to_string(), 500),
            SampleAllele::called("chr6", 500, "A", "A", false),
        );
        let mut samples = HashMap::new();
        samples.insert("TPMT".to_string(), sample);

        let results = run_all_genes(&model, &samples, &MatcherConfig::default());
        assert!(results[0].called);
        assert!(results[0]
            .warnings
            .iter()
            .any(|w| w.code == crate::warning::WarningCode::NoStraightMatch));
        assert!(results[0].diplotypes[0].left.starts_with("g."));
    }
}
