//! `pgx-match`: a thin CLI that drives the named-allele matcher library
//! end to end for a single invocation.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::process;

use clap::{Arg, ArgAction, Command};
use env_logger::Builder;
use log::{info, warn, LevelFilter};

use named_allele_matcher::catalog::{AlleleCode, DefinitionModel, GeneDefinition, GeneDefinitionBuilder, NamedAllele, VariantLocus};
use named_allele_matcher::errors::MatcherError;
use named_allele_matcher::variant::{read_sample_alleles, RawVariantRecord, SampleAllele};
use named_allele_matcher::{run_all_genes, MatcherConfig, RunReport};

fn build_cli() -> Command {
    Command::new("pgx-match")
        .about("Enumerates candidate diplotypes for one or more genes from a curated allele catalog and a sample's variant calls")
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("PATH")
                .required(true)
                .help("path to a demo catalog file (see the crate's minimal catalog format, not PharmCAT's authored JSON)"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .value_name("PATH")
                .required(true)
                .help("path to a tab-delimited sample-variant file"),
        )
        .arg(
            Arg::new("gene")
                .long("gene")
                .value_name("SYMBOL")
                .action(ArgAction::Append)
                .help("restrict to this gene symbol; may be repeated. Default: every gene in the catalog"),
        )
        .arg(
            Arg::new("all-matches")
                .long("all-matches")
                .action(ArgAction::SetTrue)
                .help("emit every top-scoring-and-below diplotype instead of just the top tier"),
        )
        .arg(
            Arg::new("no-combinations")
                .long("no-combinations")
                .action(ArgAction::SetTrue)
                .help("never fall back to the Combination Synthesizer when no straight diplotype matches"),
        )
        .arg(
            Arg::new("require-phased")
                .long("require-phased")
                .action(ArgAction::SetTrue)
                .help("fail a gene instead of guessing when its sample carries unresolved heterozygous positions"),
        )
        .arg(
            Arg::new("max-permutations")
                .long("max-permutations")
                .value_name("N")
                .help("abort a gene instead of enumerating more than N haploid permutations"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("raise log level to debug"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("lower log level to error"),
        )
}

fn set_log_level(matches: &clap::ArgMatches) {
    let mut log_level = LevelFilter::Info;
    if matches.get_flag("verbose") {
        log_level = LevelFilter::Debug;
    }
    if matches.get_flag("quiet") {
        log_level = LevelFilter::Error;
    }
    let mut builder = Builder::new();
    builder.filter_level(log_level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        eprintln!("warning: logger already initialized");
    }
}

/// Parses the crate's minimal demo catalog format: repeated blocks of
/// ```text
/// GENE <symbol>
/// LOCUS <chrom> <pos> <ref> <alt1,alt2,...> <rsid>
/// ALLELE <id> <name> <is_reference> <code1,code2,...>
/// ```
/// This is a CLI-only demo convenience, not a PharmCAT catalog parser
/// — library callers are expected to build a
/// `GeneDefinition` programmatically instead.
fn parse_demo_catalog(text: &str) -> Result<DefinitionModel, MatcherError> {
    let mut genes: Vec<GeneDefinitionBuilder> = Vec::new();

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.first().copied() {
            Some("GENE") => {
                let symbol = fields.get(1).ok_or_else(|| {
                    MatcherError::MalformedCatalog(format!("line {}: GENE needs a symbol", lineno + 1))
                })?;
                genes.push(GeneDefinitionBuilder::new(*symbol));
            }
            Some("LOCUS") => {
                let builder = genes.last_mut().ok_or_else(|| {
                    MatcherError::MalformedCatalog(format!("line {}: LOCUS before any GENE", lineno + 1))
                })?;
                if fields.len() != 6 {
                    return Err(MatcherError::MalformedCatalog(format!(
                        "line {}: LOCUS needs chrom pos ref alts rsid",
                        lineno + 1
                    )));
                }
                let position: u32 = fields[2].parse().map_err(|_| {
                    MatcherError::MalformedCatalog(format!("line {}: bad position '{}'", lineno + 1, fields[2]))
                })?;
                let alts: Vec<String> = fields[4].split(',').map(|s| s.to_string()).collect();
                *builder = std::mem::replace(builder, GeneDefinitionBuilder::new(""))
                    .locus(VariantLocus::new(fields[1], position, fields[3], alts, fields[5]));
            }
            Some("ALLELE") => {
                let builder = genes.last_mut().ok_or_else(|| {
                    MatcherError::MalformedCatalog(format!("line {}: ALLELE before any GENE", lineno + 1))
                })?;
                if fields.len() != 5 {
                    return Err(MatcherError::MalformedCatalog(format!(
                        "line {}: ALLELE needs id name is_reference codes",
                        lineno + 1
                    )));
                }
                let is_reference: bool = fields[3].parse().map_err(|_| {
                    MatcherError::MalformedCatalog(format!(
                        "line {}: is_reference must be true/false, found '{}'",
                        lineno + 1,
                        fields[3]
                    ))
                })?;
                let codes: Vec<AlleleCode> = fields[4]
                    .split(',')
                    .map(|tok| {
                        if tok == "*" {
                            AlleleCode::Unspecified
                        } else {
                            AlleleCode::literal(tok)
                        }
                    })
                    .collect();
                *builder = std::mem::replace(builder, GeneDefinitionBuilder::new(""))
                    .named_allele(NamedAllele::new(fields[1], fields[2], codes, is_reference));
            }
            other => {
                return Err(MatcherError::MalformedCatalog(format!(
                    "line {}: unrecognized record '{:?}'",
                    lineno + 1,
                    other
                )));
            }
        }
    }

    let mut definitions: Vec<GeneDefinition> = genes.into_iter().map(|b| b.build()).collect();
    let mut model = DefinitionModel::new(std::mem::take(&mut definitions));
    model.initialize()?;
    Ok(model)
}

fn print_report(report: &RunReport) {
    for gene in &report.genes {
        println!("GENE {} called={} phased={}", gene.gene, gene.called, gene.phased);
        if let Some(err) = &gene.error {
            println!("  ERROR {err}");
        }
        for d in &gene.diplotypes {
            println!("  DIPLOTYPE {}/{} score={}", d.left, d.right, d.score);
        }
        for v in &gene.variants {
            println!(
                "  VARIANT {}:{} rsid={} call={} missing={} mismatch={}",
                v.chromosome, v.position, v.rsid, v.call, v.missing, v.mismatch
            );
        }
        for w in &gene.warnings {
            println!("  WARNING {:?}: {}", w.code, w.detail);
        }
    }
}

fn run() -> Result<RunReport, MatcherError> {
    let app = build_cli();
    let matches = app.get_matches();
    set_log_level(&matches);

    let config = MatcherConfig::from_args(&matches);

    let catalog_path = matches.get_one::<String>("catalog").expect("required");
    let catalog_text = fs::read_to_string(catalog_path)
        .map_err(|e| MatcherError::MalformedCatalog(format!("reading '{catalog_path}': {e}")))?;
    let mut definition_model = parse_demo_catalog(&catalog_text)?;

    if let Some(wanted) = matches.get_many::<String>("gene") {
        let wanted: Vec<&String> = wanted.collect();
        definition_model
            .genes
            .retain(|g| wanted.iter().any(|w| w.as_str() == g.gene));
    }

    let sample_path = matches.get_one::<String>("sample").expect("required");
    let sample_text = fs::read_to_string(sample_path)
        .map_err(|e| MatcherError::MalformedVariant(format!("reading '{sample_path}': {e}")))?;
    let raw_records: Vec<RawVariantRecord> = sample_text
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .map(RawVariantRecord::parse_line)
        .collect::<Result<_, _>>()?;

    let mut samples_by_gene: HashMap<String, HashMap<(String, u32), SampleAllele>> = HashMap::new();
    for gene in &definition_model.genes {
        let sample = read_sample_alleles(&raw_records, &gene.loci)?;
        samples_by_gene.insert(gene.gene.clone(), sample);
    }

    info!("pgx-match: matching {} gene(s)", definition_model.genes.len());
    let genes = run_all_genes(&definition_model, &samples_by_gene, &config);
    Ok(RunReport::new(genes))
}

fn main() {
    match run() {
        Ok(report) => {
            let failed = report.genes.iter().any(|g| g.error.is_some());
            print_report(&report);
            if failed {
                warn!("one or more genes failed; see ERROR lines above");
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("pgx-match: {err}");
            process::exit(err.exit_code());
        }
    }
}
