//! Core Matcher.

pub mod base_match;
pub mod core;
pub mod diplotype;

pub use base_match::{compare_matches, BaseMatch, CombinationMatch, HaplotypeMatch, OFF_REFERENCE_MARKER};
pub use core::{enumerate_diplotypes, find_haplotype_matches, rank_and_filter, reconstructs};
pub use diplotype::{compare_diplotypes, Diplotype};
