//! Combination Synthesizer: on-demand construction of
//! *combination* named alleles and *off-reference partial* alleles for
//! sample permutations no straight named allele explains.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use itertools::Itertools;

use crate::catalog::named_allele::AlleleCode;
use crate::catalog::NamedAllele;
use crate::errors::MatcherError;
use crate::matchdata::MatchData;
use crate::matcher::base_match::{BaseMatch, CombinationMatch, HaplotypeMatch, OFF_REFERENCE_MARKER};
use crate::sequence::{Sequence, WILDCARD};

/// Positions a restricted named allele actually constrains.
fn defined_positions(allele: &NamedAllele) -> HashSet<usize> {
    (0..allele.codes.len())
        .filter(|i| !allele.missing_positions.contains(i))
        .collect()
}

/// Greedily selects a maximal, pairwise-disjoint set of non-reference
/// named alleles that all match `s`, seeding with the highest-scoring
/// candidate and repeatedly incorporating the next one whose defined
/// positions don't collide. Deterministic: candidates are ranked by score
/// desc then name asc before the greedy walk.
fn select_components<'a>(s: &Sequence, match_data: &'a MatchData) -> Vec<&'a NamedAllele> {
    let mut candidates: Vec<&NamedAllele> = match_data
        .named_alleles
        .iter()
        .filter(|a| !a.is_reference && a.matches(s))
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut chosen = Vec::new();
    for cand in candidates {
        let positions = defined_positions(cand);
        if positions.is_empty() || !positions.is_disjoint(&claimed) {
            continue;
        }
        claimed.extend(positions);
        chosen.push(cand);
    }
    chosen
}

/// Merges disjoint components into a single synthesized `NamedAllele`.
/// Fails with `CatalogConflict` if two components turn out to define the
/// same position; this should be unreachable given `select_components`
/// already enforces disjointness, but a corrupt catalog could still
/// violate it.
fn merge_components(
    components: &[&NamedAllele],
    kept_len: usize,
) -> Result<NamedAllele, MatcherError> {
    let mut codes = vec![AlleleCode::Unspecified; kept_len];
    let mut owner: Vec<Option<&str>> = vec![None; kept_len];

    for component in components {
        for (i, code) in component.codes.iter().enumerate() {
            if code.is_unspecified() {
                continue;
            }
            if let Some(existing) = owner[i] {
                return Err(MatcherError::CatalogConflict(format!(
                    "positions {i} claimed by both '{existing}' and '{}'",
                    component.name
                )));
            }
            owner[i] = Some(component.name.as_str());
            codes[i] = code.clone();
        }
    }

    let name = components.iter().map(|c| c.name.as_str()).join(" + ");
    let id = components.iter().map(|c| c.id.as_str()).join(" + ");
    let mut merged = NamedAllele::new(id, name, codes, false);
    merged.num_combinations = components.len();
    merged.initialize(kept_len, None)?;
    Ok(merged)
}

/// Builds the off-reference partial for `s`: the gene's reference allele
/// plus an HGVS-style label for every position where `s` disagrees with it.
fn synthesize_off_reference(s: &Sequence, match_data: &MatchData) -> Result<BaseMatch, MatcherError> {
    let reference = match_data
        .named_alleles
        .iter()
        .find(|a| a.is_reference)
        .ok_or_else(|| MatcherError::MalformedCatalog("gene has no reference allele".into()))?;

    let mut labels = Vec::new();
    for (i, locus) in match_data.kept_loci.iter().enumerate() {
        let observed = &s.0[i];
        if observed == WILDCARD {
            continue;
        }
        let ref_literal = match &reference.codes[i] {
            AlleleCode::Literal(base) => base.as_str(),
            _ => locus.reference_allele.as_str(),
        };
        if observed != ref_literal {
            labels.push(format!(
                "{}{}{}>{}",
                OFF_REFERENCE_MARKER, locus.position, ref_literal, observed
            ));
        }
    }

    let name = if labels.is_empty() {
        format!("{OFF_REFERENCE_MARKER}=")
    } else {
        labels.join(" + ")
    };
    let mut synthesized = NamedAllele::new(name.clone(), name, reference.codes.clone(), false);
    synthesized.initialize(match_data.kept_position_count(), Some(0))?;

    Ok(BaseMatch::Combination(CombinationMatch {
        synthesized,
        components: vec![reference.clone()],
        sequences: IndexSet::from([s.clone()]),
        is_off_reference: true,
    }))
}

fn synthesize_one(s: &Sequence, match_data: &MatchData) -> Result<BaseMatch, MatcherError> {
    let components = select_components(s, match_data);
    if components.is_empty() {
        return synthesize_off_reference(s, match_data);
    }
    let synthesized = merge_components(&components, match_data.kept_position_count())?;
    Ok(BaseMatch::Combination(CombinationMatch {
        synthesized,
        components: components.into_iter().cloned().collect(),
        sequences: IndexSet::from([s.clone()]),
        is_off_reference: false,
    }))
}

/// Builds the full candidate pool for diplotype enumeration: every
/// existing `HaplotypeMatch` plus one synthesized `CombinationMatch` per
/// group of sample permutations no plain named allele explains. Matches
/// synthesized for different permutations but made of the same components
/// are merged into a single entry with a combined sequence set.
pub fn synthesize_combinations(
    match_data: &MatchData,
    haplotype_matches: &[HaplotypeMatch],
) -> Result<Vec<BaseMatch>, MatcherError> {
    // A sequence already explained by a *fully specified* single allele (one
    // that defines every kept position, e.g. the reference) can never be
    // improved on by a merge — a combination's score is the sum of its
    // components' specified-position counts, which tops out at the same
    // total. Only sequences no fully-specified allele covers are worth
    // attempting to synthesize; this is what lets an in-cis pair like
    // `*80`+`*28` (each only partially specified) be found even though each
    // half already has its own, lower-scoring, standalone haplotype match.
    let full_score = match_data.kept_position_count() as i32;
    let fully_explained: HashSet<&Sequence> = haplotype_matches
        .iter()
        .filter(|h| h.allele.score == full_score)
        .flat_map(|h| h.sequences.iter())
        .collect();

    let orphans: Vec<&Sequence> = match_data
        .permutations
        .iter()
        .filter(|s| !fully_explained.contains(s))
        .collect();

    let mut by_identity: HashMap<String, BaseMatch> = HashMap::new();
    for s in orphans {
        let candidate = synthesize_one(s, match_data)?;
        by_identity
            .entry(candidate.id().to_string())
            .and_modify(|existing| {
                if let BaseMatch::Combination(c) = existing {
                    c.sequences.insert(s.clone());
                }
            })
            .or_insert(candidate);
    }

    let mut pool: Vec<BaseMatch> = haplotype_matches
        .iter()
        .cloned()
        .map(BaseMatch::Haplotype)
        .collect();
    pool.extend(by_identity.into_values());
    // Deterministic order regardless of hash-map iteration order.
    pool.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(pool)
}
