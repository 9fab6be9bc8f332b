//! Variant Reader: turns raw per-sample variant records into a
//! `SampleAllele` at every catalog position.
//!
//! Parsing a real VCF is outside this crate's scope;
//! [`RawVariantRecord::parse_line`] reads the minimal tab-delimited demo
//! format used by the CLI and tests.
//! Production integrations are expected to construct `RawVariantRecord`
//! values directly from whatever VCF/BCF library they already use.

use std::collections::HashMap;

use crate::catalog::VariantLocus;
use crate::errors::MatcherError;
use crate::variant::sample_allele::SampleAllele;

/// One parsed input record, already resolved to literal allele strings but
/// not yet restricted to a gene's kept positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariantRecord {
    pub chromosome: String,
    pub position: u32,
    pub reference_allele: String,
    pub alternate_alleles: Vec<String>,
    /// Genotype as two 0-based allele indices (0 = reference), `None` for a
    /// no-call (`.`).
    pub genotype: [Option<usize>; 2],
    pub phased: bool,
}

impl RawVariantRecord {
    /// Parses a `chrom\tpos\tref\talts\tgt\tphased` line. `alts` is a
    /// comma-separated list; `gt` is two allele indices joined by `/` or
    /// `|` (or `.` for a missing call); `phased` is `true`/`false` and is
    /// consulted only when `gt`'s separator doesn't already disambiguate.
    pub fn parse_line(line: &str) -> Result<Self, MatcherError> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() != 6 {
            return Err(MatcherError::MalformedVariant(format!(
                "expected 6 tab-separated fields, found {}: {:?}",
                fields.len(),
                line
            )));
        }
        let [chrom, pos, reference, alts, gt, phased_col] = [
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        ];

        let position: u32 = pos.parse().map_err(|_| {
            MatcherError::MalformedVariant(format!("bad position '{pos}' in line: {line}"))
        })?;
        let alternate_alleles: Vec<String> = if alts.is_empty() || alts == "." {
            Vec::new()
        } else {
            alts.split(',').map(|s| s.to_string()).collect()
        };

        if gt == "." || gt == "./." || gt == ".|." {
            return Ok(RawVariantRecord {
                chromosome: chrom.to_string(),
                position,
                reference_allele: reference.to_string(),
                alternate_alleles,
                genotype: [None, None],
                phased: false,
            });
        }

        let (sep_is_pipe, parts) = if gt.contains('|') {
            (true, gt.split('|').collect::<Vec<_>>())
        } else if gt.contains('/') {
            (false, gt.split('/').collect::<Vec<_>>())
        } else {
            return Err(MatcherError::MalformedVariant(format!(
                "genotype '{gt}' is missing a '/' or '|' separator"
            )));
        };
        if parts.len() != 2 {
            return Err(MatcherError::MalformedVariant(format!(
                "genotype '{gt}' must name exactly two alleles"
            )));
        }
        let mut genotype = [None, None];
        for (i, part) in parts.iter().enumerate() {
            genotype[i] = if *part == "." {
                None
            } else {
                Some(part.parse::<usize>().map_err(|_| {
                    MatcherError::MalformedVariant(format!("bad genotype index '{part}'"))
                })?)
            };
        }

        let phased = sep_is_pipe || phased_col.eq_ignore_ascii_case("true");

        Ok(RawVariantRecord {
            chromosome: chrom.to_string(),
            position,
            reference_allele: reference.to_string(),
            alternate_alleles,
            genotype,
            phased,
        })
    }

    fn allele_literal(&self, index: usize) -> Result<String, MatcherError> {
        if index == 0 {
            Ok(self.reference_allele.clone())
        } else {
            self.alternate_alleles
                .get(index - 1)
                .cloned()
                .ok_or_else(|| {
                    MatcherError::MalformedVariant(format!(
                        "genotype index {index} at {}:{} has no matching alt allele",
                        self.chromosome, self.position
                    ))
                })
        }
    }
}

/// Reads every `raw` record into a `SampleAllele` keyed by (chromosome,
/// position), restricted to the positions named in `loci`.
///
/// Only positions the sample's input actually *mentions* are present in
/// the returned map — a locus the catalog defines but the input never
/// touches is "not asserted" and simply absent. A mentioned locus whose
/// call failed (`./.`) is still
/// present, just flagged `is_missing`, and contributes a wildcard during
/// permutation.
pub fn read_sample_alleles(
    raw: &[RawVariantRecord],
    loci: &[VariantLocus],
) -> Result<HashMap<(String, u32), SampleAllele>, MatcherError> {
    let mut by_key: HashMap<(String, u32), &RawVariantRecord> = HashMap::new();
    for record in raw {
        let key = (record.chromosome.clone(), record.position);
        if let Some(existing) = by_key.get(&key) {
            if *existing != record {
                return Err(MatcherError::AmbiguousLocus {
                    chrom: record.chromosome.clone(),
                    position: record.position,
                });
            }
        } else {
            by_key.insert(key, record);
        }
    }

    let mut result = HashMap::with_capacity(loci.len());
    for locus in loci {
        let key = locus.key();
        if let Some(record) = by_key.get(&key) {
            if record.genotype[0].is_none() || record.genotype[1].is_none() {
                result.insert(
                    key.clone(),
                    SampleAllele::missing(&locus.chromosome, locus.position),
                );
                continue;
            }
            let a1 = record.allele_literal(record.genotype[0].unwrap())?;
            let a2 = record.allele_literal(record.genotype[1].unwrap())?;
            // A homozygous call carries no phase ambiguity regardless of
            // its input separator, so it's treated as effectively phased.
            let phased = record.phased || a1 == a2;
            result.insert(
                key.clone(),
                SampleAllele::called(&locus.chromosome, locus.position, a1, a2, phased),
            );
        }
    }
    Ok(result)
}
