//! End-to-end scenario tests driving `run_all_genes` the way `pgx-match`
//! does, covering the representative cases the matcher is expected to
//! handle: homozygous/heterozygous straight calls, a multi-way score tie
//! among near-identical alleles, and both the phased and unphased
//! in-cis-combination paths.

use std::collections::HashMap;

use named_allele_matcher::catalog::{
    AlleleCode, DefinitionModel, GeneDefinitionBuilder, NamedAllele, VariantLocus,
};
use named_allele_matcher::variant::SampleAllele;
use named_allele_matcher::{run_all_genes, MatcherConfig};

fn cyp2c19_model() -> DefinitionModel {
    let mut gene = GeneDefinitionBuilder::new("CYP2C19")
        .locus(VariantLocus::new(
            "chr10",
            94781859,
            "G",
            vec!["A".into()],
            "rs4244285",
        ))
        .locus(VariantLocus::new(
            "chr10",
            94761900,
            "C",
            vec!["T".into()],
            "rs28399504",
        ))
        .named_allele(NamedAllele::new(
            "CYP2C19*1",
            "*1",
            vec![AlleleCode::literal("G"), AlleleCode::literal("C")],
            true,
        ))
        .named_allele(NamedAllele::new(
            "CYP2C19*2",
            "*2",
            vec![AlleleCode::literal("A"), AlleleCode::literal("C")],
            false,
        ))
        .named_allele(NamedAllele::new(
            "CYP2C19*4A",
            "*4A",
            vec![AlleleCode::literal("A"), AlleleCode::literal("C")],
            false,
        ))
        .named_allele(NamedAllele::new(
            "CYP2C19*4B",
            "*4B",
            vec![AlleleCode::literal("A"), AlleleCode::literal("T")],
            false,
        ))
        .named_allele(NamedAllele::new(
            "CYP2C19*4C",
            "*4C",
            vec![AlleleCode::literal("A"), AlleleCode::literal("G")],
            false,
        ))
        .build();
    gene.initialize().unwrap();
    DefinitionModel::new(vec![gene])
}

fn samples(entries: Vec<((&str, u32), SampleAllele)>) -> HashMap<String, HashMap<(String, u32), SampleAllele>> {
    let mut by_gene = HashMap::new();
    let mut map = HashMap::new();
    for ((chrom, pos), sa) in entries {
        map.insert((chrom.to_string(), pos), sa);
    }
    by_gene.insert("CYP2C19".to_string(), map);
    by_gene
}

#[test]
fn cyp2c19_homozygous_reference_calls_star1_star1() {
    let model = cyp2c19_model();
    let samples = samples(vec![
        (("chr10", 94781859), SampleAllele::called("chr10", 94781859, "G", "G", false)),
        (("chr10", 94761900), SampleAllele::called("chr10", 94761900, "C", "C", false)),
    ]);
    let results = run_all_genes(&model, &samples, &MatcherConfig::default());
    assert_eq!(results.len(), 1);
    let gene = &results[0];
    assert!(gene.called);
    assert_eq!(gene.diplotypes.len(), 1);
    assert_eq!(gene.diplotypes[0].left, "*1");
    assert_eq!(gene.diplotypes[0].right, "*1");
}

#[test]
fn cyp2c19_heterozygous_calls_star1_star2() {
    let model = cyp2c19_model();
    let samples = samples(vec![
        (("chr10", 94781859), SampleAllele::called("chr10", 94781859, "A", "G", false)),
        (("chr10", 94761900), SampleAllele::called("chr10", 94761900, "C", "C", false)),
    ]);
    let results = run_all_genes(&model, &samples, &MatcherConfig::default());
    let gene = &results[0];
    assert!(gene.called);
    assert_eq!(gene.diplotypes.len(), 1);
    let mut names = [gene.diplotypes[0].left.as_str(), gene.diplotypes[0].right.as_str()];
    names.sort();
    assert_eq!(names, ["*1", "*2"]);
}

/// rs28399504 goes unasserted entirely, so *4A/*4B/*4C collapse to an
/// identical restricted code at the one kept position and tie on score —
/// every surviving pair among them should show up in `AllMatches` mode.
#[test]
fn cyp2c19_unasserted_position_ties_the_star4_variants() {
    let model = cyp2c19_model();
    let mut config = MatcherConfig::default();
    config.output_mode = named_allele_matcher::config::OutputMode::AllMatches;

    let samples = samples(vec![(
        ("chr10", 94781859),
        SampleAllele::called("chr10", 94781859, "A", "A", false),
    )]);
    let results = run_all_genes(&model, &samples, &config);
    let gene = &results[0];
    assert!(gene.called);

    let top_score = gene.diplotypes.iter().map(|d| d.score).max().unwrap();
    let top_tier: Vec<&str> = gene
        .diplotypes
        .iter()
        .filter(|d| d.score == top_score)
        .flat_map(|d| [d.left.as_str(), d.right.as_str()])
        .collect();
    let distinct_star4: std::collections::HashSet<&str> = top_tier
        .iter()
        .copied()
        .filter(|n| n.starts_with("*4"))
        .collect();
    assert!(
        distinct_star4.len() > 1,
        "expected more than one *4 variant tied at the top score, got {top_tier:?}"
    );

    // The unasserted position should surface as a missing-position warning.
    assert!(gene
        .warnings
        .iter()
        .any(|w| w.code == named_allele_matcher::warning::WarningCode::PositionMissingFromSample));
}

fn ugt1a1_model() -> DefinitionModel {
    let mut gene = GeneDefinitionBuilder::new("UGT1A1")
        .locus(VariantLocus::new("chr2", 234668879, "T", vec!["A".into()], "rs887829"))
        .locus(VariantLocus::new("chr2", 234669144, "C", vec!["G".into()], "rs4148323"))
        .named_allele(NamedAllele::new(
            "UGT1A1*1",
            "*1",
            vec![AlleleCode::literal("T"), AlleleCode::literal("C")],
            true,
        ))
        .named_allele(NamedAllele::new(
            "UGT1A1*80",
            "*80",
            vec![AlleleCode::literal("A"), AlleleCode::Unspecified],
            false,
        ))
        .named_allele(NamedAllele::new(
            "UGT1A1*28",
            "*28",
            vec![AlleleCode::Unspecified, AlleleCode::literal("G")],
            false,
        ))
        .build();
    gene.initialize().unwrap();
    DefinitionModel::new(vec![gene])
}

fn ugt1a1_samples(phased: bool) -> HashMap<String, HashMap<(String, u32), SampleAllele>> {
    let mut by_gene = HashMap::new();
    let mut map = HashMap::new();
    map.insert(
        ("chr2".to_string(), 234668879),
        SampleAllele::called("chr2", 234668879, "A", "T", phased),
    );
    map.insert(
        ("chr2".to_string(), 234669144),
        SampleAllele::called("chr2", 234669144, "G", "C", phased),
    );
    by_gene.insert("UGT1A1".to_string(), map);
    by_gene
}

#[test]
fn ugt1a1_phased_compound_het_calls_combination_over_star1() {
    let model = ugt1a1_model();
    let samples = ugt1a1_samples(true);
    let results = run_all_genes(&model, &samples, &MatcherConfig::default());
    let gene = &results[0];
    assert!(gene.called);
    assert!(gene.phased);
    assert_eq!(gene.diplotypes.len(), 1);
    assert_eq!(gene.diplotypes[0].score, 4);
    let mut names = [gene.diplotypes[0].left.as_str(), gene.diplotypes[0].right.as_str()];
    names.sort();
    assert_eq!(names, ["*1", "*28 + *80"]);
}

/// Without phase information the genotype is ambiguous between the
/// straight pairing `*80`/`*28` (score 2) and the in-cis synthesized
/// combination `*1`/`(*28 + *80)` (score 4) — the combination wins.
#[test]
fn ugt1a1_unphased_compound_het_prefers_synthesized_combination() {
    let model = ugt1a1_model();
    let samples = ugt1a1_samples(false);
    let results = run_all_genes(&model, &samples, &MatcherConfig::default());
    let gene = &results[0];
    assert!(gene.called);
    assert!(!gene.phased);
    assert_eq!(gene.diplotypes.len(), 1);
    assert_eq!(gene.diplotypes[0].score, 4);
    let mut names = [gene.diplotypes[0].left.as_str(), gene.diplotypes[0].right.as_str()];
    names.sort();
    assert_eq!(names, ["*1", "*28 + *80"]);
    assert!(gene
        .warnings
        .iter()
        .any(|w| w.code == named_allele_matcher::warning::WarningCode::NoStraightMatch));
}

/// Disabling combinations falls back to the best pure-haplotype pairings:
/// `*1`/`*80` and `*1`/`*28` each score 3 and tie for the top, ahead of
/// `*80`/`*28` at 2 — since the synthesized combination that would beat
/// both (score 4) is never considered.
#[test]
fn ugt1a1_unphased_without_combinations_keeps_straight_pairing() {
    let model = ugt1a1_model();
    let mut config = MatcherConfig::default();
    config.enable_combinations = false;
    let samples = ugt1a1_samples(false);
    let results = run_all_genes(&model, &samples, &config);
    let gene = &results[0];
    assert!(gene.called);
    assert_eq!(gene.diplotypes.len(), 2);
    for d in &gene.diplotypes {
        assert_eq!(d.score, 3);
        let mut names = [d.left.as_str(), d.right.as_str()];
        names.sort();
        assert_eq!(names[0], "*1");
        assert!(names[1] == "*28" || names[1] == "*80");
    }
}

fn tpmt_model() -> DefinitionModel {
    let mut gene = GeneDefinitionBuilder::new("TPMT")
        .locus(VariantLocus::new("chr6", 18143955, "A", vec!["G".into()], "rs1142345"))
        .named_allele(NamedAllele::new("TPMT*1", "*1", vec![AlleleCode::literal("A")], true))
        .build();
    gene.initialize().unwrap();
    DefinitionModel::new(vec![gene])
}

#[test]
fn tpmt_novel_homozygous_call_synthesizes_off_reference_partial() {
    let model = tpmt_model();
    let mut by_gene = HashMap::new();
    let mut map = HashMap::new();
    map.insert(
        ("chr6".to_string(), 18143955),
        SampleAllele::called("chr6", 18143955, "T", "T", false),
    );
    by_gene.insert("TPMT".to_string(), map);

    let results = run_all_genes(&model, &by_gene, &MatcherConfig::default());
    let gene = &results[0];
    assert!(gene.called);
    assert_eq!(gene.diplotypes.len(), 1);
    assert!(gene.diplotypes[0].left.starts_with("g."));
    assert!(gene.diplotypes[0].right.starts_with("g."));
    assert_eq!(gene.diplotypes[0].score, 0);
    assert!(gene
        .warnings
        .iter()
        .any(|w| w.code == named_allele_matcher::warning::WarningCode::NoStraightMatch));
}

#[test]
fn gene_with_no_sample_coverage_is_reported_as_not_called() {
    let model = cyp2c19_model();
    let empty: HashMap<String, HashMap<(String, u32), SampleAllele>> = HashMap::new();
    let results = run_all_genes(&model, &empty, &MatcherConfig::default());
    assert!(!results[0].called);
    assert!(results[0].error.is_some());
}

fn cyp2b6_model() -> DefinitionModel {
    let mut gene = GeneDefinitionBuilder::new("CYP2B6")
        .locus(VariantLocus::new("chr19", 41512841, "A", vec!["G".into()], "rs3745274"))
        .locus(VariantLocus::new("chr19", 41515263, "C", vec!["T".into()], "rs2279343"))
        .locus(VariantLocus::new("chr19", 41497931, "T", vec![], "rs8192709"))
        .named_allele(NamedAllele::new(
            "CYP2B6*1",
            "*1",
            vec![AlleleCode::literal("A"), AlleleCode::literal("C"), AlleleCode::literal("T")],
            true,
        ))
        .named_allele(NamedAllele::new(
            "CYP2B6*34",
            "*34",
            vec![AlleleCode::literal("G"), AlleleCode::literal("T"), AlleleCode::literal("T")],
            false,
        ))
        .named_allele(NamedAllele::new(
            "CYP2B6*33",
            "*33",
            vec![AlleleCode::literal("A"), AlleleCode::literal("T"), AlleleCode::Unspecified],
            false,
        ))
        .named_allele(NamedAllele::new(
            "CYP2B6*36",
            "*36",
            vec![AlleleCode::literal("G"), AlleleCode::literal("C"), AlleleCode::Unspecified],
            false,
        ))
        .build();
    gene.initialize().unwrap();
    DefinitionModel::new(vec![gene])
}

fn cyp2b6_samples() -> HashMap<String, HashMap<(String, u32), SampleAllele>> {
    let mut by_gene = HashMap::new();
    let mut map = HashMap::new();
    map.insert(
        ("chr19".to_string(), 41512841),
        SampleAllele::called("chr19", 41512841, "A", "G", false),
    );
    map.insert(
        ("chr19".to_string(), 41515263),
        SampleAllele::called("chr19", 41515263, "C", "T", false),
    );
    map.insert(
        ("chr19".to_string(), 41497931),
        SampleAllele::called("chr19", 41497931, "T", "T", false),
    );
    by_gene.insert("CYP2B6".to_string(), map);
    by_gene
}

/// The sample reconstructs both as the fully-specified `*1`/`*34` (score 6)
/// and as the partially-specified `*33`/`*36` (score 4). Top-match mode
/// keeps only the higher; all-matches mode reports both, higher first.
#[test]
fn cyp2b6_top_match_keeps_only_the_higher_scoring_pair() {
    let model = cyp2b6_model();
    let samples = cyp2b6_samples();
    let results = run_all_genes(&model, &samples, &MatcherConfig::default());
    let gene = &results[0];
    assert!(gene.called);
    assert_eq!(gene.diplotypes.len(), 1);
    assert_eq!(gene.diplotypes[0].score, 6);
    let mut names = [gene.diplotypes[0].left.as_str(), gene.diplotypes[0].right.as_str()];
    names.sort();
    assert_eq!(names, ["*1", "*34"]);
}

#[test]
fn cyp2b6_all_matches_reports_both_pairs_in_score_order() {
    let model = cyp2b6_model();
    let mut config = MatcherConfig::default();
    config.output_mode = named_allele_matcher::config::OutputMode::AllMatches;
    let samples = cyp2b6_samples();
    let results = run_all_genes(&model, &samples, &config);
    let gene = &results[0];
    assert_eq!(gene.diplotypes.len(), 2);
    assert_eq!(gene.diplotypes[0].score, 6);
    assert_eq!(gene.diplotypes[1].score, 4);
    let mut lower_names = [gene.diplotypes[1].left.as_str(), gene.diplotypes[1].right.as_str()];
    lower_names.sort();
    assert_eq!(lower_names, ["*33", "*36"]);
}
