//! IUPAC nucleotide ambiguity code expansion.
//!
//! Allele codes in a gene's named-allele catalog are normally single literal
//! bases, but a handful of positions are defined with an IUPAC ambiguity
//! code to cover more than one observed base at once (e.g. `R` for `A`/`G`).
//! This module expands a stored allele token into the set of concrete
//! literal tokens it represents. Anything that is not a single-character
//! ambiguity code (multi-base indels, `*` spanning deletions, already
//! literal bases) passes through unchanged.

use std::collections::BTreeSet;

/// Returns the literal bases an IUPAC code stands for, or `None` if `code`
/// is not a recognized single-letter ambiguity code.
fn ambiguity_set(code: char) -> Option<&'static [char]> {
    match code.to_ascii_uppercase() {
        'A' => Some(&['A']),
        'C' => Some(&['C']),
        'G' => Some(&['G']),
        'T' => Some(&['T']),
        'R' => Some(&['A', 'G']),
        'Y' => Some(&['C', 'T']),
        'S' => Some(&['G', 'C']),
        'W' => Some(&['A', 'T']),
        'K' => Some(&['G', 'T']),
        'M' => Some(&['A', 'C']),
        'B' => Some(&['C', 'G', 'T']),
        'D' => Some(&['A', 'G', 'T']),
        'H' => Some(&['A', 'C', 'T']),
        'V' => Some(&['A', 'C', 'G']),
        'N' => Some(&['A', 'C', 'G', 'T']),
        _ => None,
    }
}

/// True iff `code` is an ambiguity code that expands to more than one base
/// (i.e. excludes the four plain literals, which are "ambiguous" over a
/// singleton set and not worth flagging in a warning).
pub fn is_ambiguous(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => matches!(ambiguity_set(c), Some(set) if set.len() > 1),
        _ => false,
    }
}

/// Expands a stored allele token into its literal alternatives.
///
/// Multi-character tokens (indels, HGVS fragments, structural markers) are
/// never ambiguity codes in this catalog format and are returned as a
/// single-element set unchanged.
pub fn expand(token: &str) -> BTreeSet<String> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match ambiguity_set(c) {
            Some(bases) => bases.iter().map(|b| b.to_string()).collect(),
            None => BTreeSet::from([token.to_string()]),
        },
        _ => BTreeSet::from([token.to_string()]),
    }
}
