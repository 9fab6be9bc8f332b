//! Pharmacogenomic named-allele matcher: diplotype enumeration from curated
//! allele catalogs and sample variant calls.

pub mod catalog;
pub mod combination;
pub mod config;
pub mod errors;
pub mod iupac;
pub mod matchdata;
pub mod matcher;
pub mod result;
pub mod sequence;
pub mod variant;
pub mod warning;

pub use catalog::{DefinitionModel, GeneDefinition};
pub use config::MatcherConfig;
pub use errors::MatcherError;
pub use result::{run_all_genes, GeneResult, RunReport};
