//! `NamedAllele`: a named allele definition for a single gene.
//!
//! A freshly loaded `NamedAllele` is *uninitialized* — its `codes` vector
//! exists but no permutation set or score has been derived yet.
//! [`NamedAllele::initialize`] binds it to a gene's `VariantLocus` vector,
//! and [`NamedAllele::restrict_to`] later projects an initialized allele
//! onto the subset of positions a particular sample actually covers.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::errors::MatcherError;
use crate::iupac;
use crate::sequence::{Sequence, WILDCARD};

/// One entry in a `NamedAllele`'s allele-code vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlleleCode {
    Literal(String),
    Iupac(char),
    Unspecified,
}

impl AlleleCode {
    pub fn literal(base: impl Into<String>) -> Self {
        AlleleCode::Literal(base.into())
    }

    /// The literal alternatives this code stands for; empty for
    /// `Unspecified`, which never constrains a permutation.
    fn expand(&self) -> BTreeSet<String> {
        match self {
            AlleleCode::Literal(base) => iupac::expand(base),
            AlleleCode::Iupac(code) => iupac::expand(&code.to_string()),
            AlleleCode::Unspecified => BTreeSet::new(),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, AlleleCode::Unspecified)
    }

    pub fn as_display(&self) -> String {
        match self {
            AlleleCode::Literal(base) => base.clone(),
            AlleleCode::Iupac(code) => code.to_string(),
            AlleleCode::Unspecified => WILDCARD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAllele {
    pub id: String,
    pub name: String,
    pub codes: Vec<AlleleCode>,
    /// Indices into `codes` (and, post-restriction, into the restricted
    /// locus vector) that this allele does not assert.
    pub missing_positions: BTreeSet<usize>,
    pub is_reference: bool,
    pub num_combinations: usize,
    pub num_partials: usize,
    /// `None` until `initialize` has run.
    pub permutations: Option<IndexSet<Sequence>>,
    pub score: i32,
}

impl NamedAllele {
    /// Constructs an uninitialized named allele as loaded from the catalog.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        codes: Vec<AlleleCode>,
        is_reference: bool,
    ) -> Self {
        NamedAllele {
            id: id.into(),
            name: name.into(),
            codes,
            missing_positions: BTreeSet::new(),
            is_reference,
            num_combinations: 1,
            num_partials: 0,
            permutations: None,
            score: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.permutations.is_some()
    }

    /// Binds this allele to `locus_count` positions. Computes
    /// the permuted sequence set, records unspecified positions as
    /// missing, and scores the allele by the number of specified
    /// positions — unless `score_override` is given, in which case the
    /// score is forced to that value (used for off-reference partials,
    /// which are always scored 0).
    pub fn initialize(
        &mut self,
        locus_count: usize,
        score_override: Option<i32>,
    ) -> Result<(), MatcherError> {
        if self.codes.len() != locus_count {
            return Err(MatcherError::MalformedCatalog(format!(
                "named allele '{}' has {} allele codes but gene defines {} positions",
                self.name,
                self.codes.len(),
                locus_count
            )));
        }

        self.missing_positions.clear();
        let mut specified = 0usize;
        let mut domains: Vec<Vec<String>> = Vec::with_capacity(self.codes.len());
        for (i, code) in self.codes.iter().enumerate() {
            if code.is_unspecified() {
                self.missing_positions.insert(i);
                domains.push(vec![WILDCARD.to_string()]);
            } else {
                specified += 1;
                let expanded: Vec<String> = code.expand().into_iter().collect();
                if expanded.is_empty() {
                    return Err(MatcherError::MalformedCatalog(format!(
                        "named allele '{}' has an empty expansion at position {}",
                        self.name, i
                    )));
                }
                domains.push(expanded);
            }
        }

        self.permutations = Some(cartesian_sequences(&domains));
        self.score = score_override.unwrap_or(specified as i32);
        Ok(())
    }

    /// Projects an initialized allele onto `kept_indices` (indices into the
    /// original, full-gene locus vector), recomputing missing positions and
    /// score in the restricted coordinate space. `gene_missing` are
    /// positions the sample lacks entirely and that every restricted allele
    /// must therefore record as missing regardless of its own codes.
    pub fn restrict_to(&self, kept_indices: &[usize]) -> Result<NamedAllele, MatcherError> {
        if !self.is_initialized() {
            return Err(MatcherError::MalformedCatalog(format!(
                "named allele '{}' restricted before initialization",
                self.name
            )));
        }

        let codes: Vec<AlleleCode> = kept_indices
            .iter()
            .map(|&i| self.codes[i].clone())
            .collect();

        let mut restricted = NamedAllele::new(
            self.id.clone(),
            self.name.clone(),
            codes,
            self.is_reference,
        );
        restricted.num_combinations = self.num_combinations;
        restricted.num_partials = self.num_partials;
        restricted.initialize(kept_indices.len(), None)?;
        Ok(restricted)
    }

    /// True iff, for every kept position, this allele's code is unspecified
    /// or literally equal to `sequence`'s token there.
    pub fn matches(&self, sequence: &Sequence) -> bool {
        match &self.permutations {
            None => false,
            Some(perms) => perms.iter().any(|p| p.compatible_with(sequence)),
        }
    }
}

/// Cartesian product of per-position literal domains, each already
/// expanded, deduplicated into an insertion-ordered set for determinism.
pub fn cartesian_sequences(domains: &[Vec<String>]) -> IndexSet<Sequence> {
    if domains.is_empty() {
        return IndexSet::new();
    }
    let mut acc: Vec<Vec<String>> = vec![Vec::new()];
    for domain in domains {
        let mut next = Vec::with_capacity(acc.len() * domain.len());
        for prefix in &acc {
            for token in domain {
                let mut seq = prefix.clone();
                seq.push(token.clone());
                next.push(seq);
            }
        }
        acc = next;
    }
    acc.into_iter().map(Sequence::new).collect()
}
