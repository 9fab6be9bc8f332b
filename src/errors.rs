//! Error kinds for the named-allele matcher.
//!
//! Per-gene failures are captured into that gene's `GeneResult` rather than
//! aborting the run, while catalog load failures are fatal for the whole
//! invocation. See `result::assembler::run_all_genes` for where these are
//! caught and folded into a non-fatal `GeneResult`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    #[error("malformed variant record: {0}")]
    MalformedVariant(String),

    #[error("ambiguous locus at {chrom}:{position} — conflicting records")]
    AmbiguousLocus { chrom: String, position: u32 },

    #[error("no catalog position has sample data")]
    NoCoverage,

    #[error("permutation cap exceeded: {found} > {cap}")]
    ExcessivePermutations { found: usize, cap: usize },

    #[error("catalog conflict while merging components: {0}")]
    CatalogConflict(String),
}

impl MatcherError {
    /// Process exit code convention: 0 success, 2 bad catalog, 3 bad
    /// sample, 4 excessive permutations, 1 internal/other error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MatcherError::MalformedCatalog(_) | MatcherError::CatalogConflict(_) => 2,
            MatcherError::MalformedVariant(_) | MatcherError::AmbiguousLocus { .. } => 3,
            MatcherError::ExcessivePermutations { .. } => 4,
            MatcherError::NoCoverage => 3,
        }
    }

    /// True for errors that only invalidate a single gene's result rather
    /// than the whole run.
    pub fn is_gene_local(&self) -> bool {
        !matches!(self, MatcherError::MalformedCatalog(_))
    }
}
