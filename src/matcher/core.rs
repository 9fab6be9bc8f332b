//! Core Matcher: enumerates `HaplotypeMatch`es from a gene's
//! `MatchData`, pairs them into diplotypes, and ranks the result.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::config::OutputMode;
use crate::matchdata::{MatchData, PositionGenotype};
use crate::matcher::base_match::{BaseMatch, HaplotypeMatch};
use crate::matcher::diplotype::{compare_diplotypes, Diplotype};
use crate::sequence::Sequence;

/// Matches every restricted named allele in `match_data` against the
/// sample's permutation set, keeping only alleles that explain at least
/// one permutation.
pub fn find_haplotype_matches(match_data: &MatchData) -> Vec<HaplotypeMatch> {
    match_data
        .named_alleles
        .iter()
        .filter_map(|allele| {
            let sequences: IndexSet<Sequence> = match_data
                .permutations
                .iter()
                .filter(|s| allele.matches(s))
                .cloned()
                .collect();
            if sequences.is_empty() {
                None
            } else {
                Some(HaplotypeMatch {
                    allele: allele.clone(),
                    sequences,
                })
            }
        })
        .collect()
}

/// True iff `(s1, s2)`, read left-to-right, jointly reproduce the sample's
/// observed genotype at every kept position. For a phased sample `s1`/`s2` carry
/// chromosome-of-origin meaning and the check is order-sensitive; for an
/// unphased sample either left-right assignment at each position is
/// accepted independently, since unphased data carries no cross-position
/// phase information to preserve.
pub fn reconstructs(genotypes: &[PositionGenotype], s1: &Sequence, s2: &Sequence) -> bool {
    for (i, g) in genotypes.iter().enumerate() {
        if g.missing {
            continue;
        }
        let a = &s1.0[i];
        let b = &s2.0[i];
        if g.homozygous {
            if a != b || !g.left_literals.contains(a) {
                return false;
            }
            continue;
        }
        if g.phased {
            if !(g.left_literals.contains(a) && g.right_literals.contains(b)) {
                return false;
            }
        } else {
            let direct = g.left_literals.contains(a) && g.right_literals.contains(b);
            let swapped = g.left_literals.contains(b) && g.right_literals.contains(a);
            if !(direct || swapped) {
                return false;
            }
        }
    }
    true
}

fn any_pair_reconstructs(
    genotypes: &[PositionGenotype],
    left_seqs: &IndexSet<Sequence>,
    right_seqs: &IndexSet<Sequence>,
) -> bool {
    left_seqs
        .iter()
        .any(|s1| right_seqs.iter().any(|s2| reconstructs(genotypes, s1, s2)))
}

/// Enumerates diplotypes from a pool of candidate matches. The
/// pool may be pure `HaplotypeMatch`es, or may already include
/// `CombinationMatch`es supplied by the Combination Synthesizer — the
/// pairing rule is identical either way.
pub fn enumerate_diplotypes(matches: &[BaseMatch], match_data: &MatchData) -> Vec<Diplotype> {
    let mut diplotypes = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    if match_data.effective_phased {
        for left in matches {
            for right in matches {
                if any_pair_reconstructs(&match_data.genotypes, left.sequences(), right.sequences())
                {
                    let d = Diplotype::ordered(left.clone(), right.clone());
                    diplotypes.push(d);
                }
            }
        }
    } else {
        for i in 0..matches.len() {
            for j in i..matches.len() {
                if any_pair_reconstructs(
                    &match_data.genotypes,
                    matches[i].sequences(),
                    matches[j].sequences(),
                ) {
                    let d = Diplotype::unordered(matches[i].clone(), matches[j].clone());
                    if seen.insert(d.dedup_key()) {
                        diplotypes.push(d);
                    }
                }
            }
        }
    }
    diplotypes
}

/// Sorts by the full comparator and applies the configured output mode.
pub fn rank_and_filter(mut diplotypes: Vec<Diplotype>, mode: OutputMode) -> Vec<Diplotype> {
    diplotypes.sort_by(compare_diplotypes);
    match mode {
        OutputMode::AllMatches => diplotypes,
        OutputMode::TopMatch => match diplotypes.first().map(|d| d.score) {
            None => diplotypes,
            Some(top) => diplotypes.into_iter().take_while(|d| d.score == top).collect(),
        },
    }
}
