//! Definition Model: in-memory representation of a gene's
//! curated allele catalog.

pub mod gene_definition;
pub mod locus;
pub mod named_allele;

pub use gene_definition::{DefinitionModel, GeneDefinition, GeneDefinitionBuilder};
pub use locus::VariantLocus;
pub use named_allele::{AlleleCode, NamedAllele};
